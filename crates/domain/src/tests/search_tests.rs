// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::search::{JoinCardinality, JoinKind, MemberSearchFilter, TeamJoin};

#[test]
fn empty_filter_is_unconstrained() {
    let filter: MemberSearchFilter = MemberSearchFilter::new();
    assert!(filter.is_unconstrained());
    assert_eq!(filter.user_name(), None);
    assert_eq!(filter.team_name(), None);
    assert_eq!(filter.age_goe(), None);
    assert_eq!(filter.age_loe(), None);
}

#[test]
fn filter_fields_are_independent() {
    let filter: MemberSearchFilter = MemberSearchFilter::new().with_age_goe(30);
    assert!(!filter.is_unconstrained());
    assert_eq!(filter.age_goe(), Some(30));
    assert_eq!(filter.age_loe(), None);
    assert_eq!(filter.user_name(), None);
}

#[test]
fn filter_builders_compose() {
    let filter: MemberSearchFilter = MemberSearchFilter::new()
        .with_user_name("member4")
        .with_team_name("team2")
        .with_age_goe(30)
        .with_age_loe(60);
    assert_eq!(filter.user_name(), Some("member4"));
    assert_eq!(filter.team_name(), Some("team2"));
    assert_eq!(filter.age_goe(), Some(30));
    assert_eq!(filter.age_loe(), Some(60));
}

#[test]
fn filter_preserves_blank_input_verbatim() {
    // Blank strings are interpreted as absent by the predicate layer, not
    // rewritten by the value object.
    let filter: MemberSearchFilter = MemberSearchFilter::new().with_user_name("  ");
    assert_eq!(filter.user_name(), Some("  "));
    assert!(!filter.is_unconstrained());
}

#[test]
fn default_join_is_row_preserving_left_outer() {
    let join: TeamJoin = TeamJoin::default();
    assert_eq!(join.kind(), JoinKind::LeftOuter);
    assert_eq!(join.cardinality(), JoinCardinality::RowPreserving);
}

#[test]
fn join_cardinality_can_be_overridden() {
    let join: TeamJoin =
        TeamJoin::inner().with_cardinality(JoinCardinality::RowMultiplying);
    assert_eq!(join.kind(), JoinKind::Inner);
    assert_eq!(join.cardinality(), JoinCardinality::RowMultiplying);
}
