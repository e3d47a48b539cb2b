// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A set of independently-optional member search criteria.
///
/// Each field is either absent (no constraint) or present with a concrete
/// value. An entirely absent filter matches every member. Blank strings are
/// treated as absent by the predicate layer, so callers may pass raw
/// request input through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MemberSearchFilter {
    /// Exact user name to match.
    user_name: Option<String>,
    /// Exact name of the member's team to match.
    team_name: Option<String>,
    /// Inclusive lower bound on age.
    age_goe: Option<i32>,
    /// Inclusive upper bound on age.
    age_loe: Option<i32>,
}

impl MemberSearchFilter {
    /// Creates a filter with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the filter to members with exactly this user name.
    #[must_use]
    pub fn with_user_name<S: Into<String>>(mut self, user_name: S) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// Constrains the filter to members whose team has exactly this name.
    #[must_use]
    pub fn with_team_name<S: Into<String>>(mut self, team_name: S) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Constrains the filter to members at least this old.
    #[must_use]
    pub const fn with_age_goe(mut self, age_goe: i32) -> Self {
        self.age_goe = Some(age_goe);
        self
    }

    /// Constrains the filter to members at most this old.
    #[must_use]
    pub const fn with_age_loe(mut self, age_loe: i32) -> Self {
        self.age_loe = Some(age_loe);
        self
    }

    /// The user name constraint, if present.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// The team name constraint, if present.
    #[must_use]
    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    /// The inclusive lower age bound, if present.
    #[must_use]
    pub const fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    /// The inclusive upper age bound, if present.
    #[must_use]
    pub const fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }

    /// Whether no field carries a constraint.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.user_name.is_none()
            && self.team_name.is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

/// How the team relation is joined to the member root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Only members that belong to a team are returned.
    Inner,
    /// All members are returned; team columns are null for teamless members.
    LeftOuter,
}

/// Whether the join can change the number of rows per root member.
///
/// A to-one join never multiplies rows. A to-many join can, in which case
/// the total count must deduplicate by root identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinCardinality {
    /// At most one joined row per member; plain counts are correct.
    RowPreserving,
    /// Joined rows can repeat a member; counts must be distinct by member.
    RowMultiplying,
}

/// The join specification for a member search.
///
/// Pure data consulted by the search executor; the column projection itself
/// is fixed at compile time by the executor's select clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamJoin {
    kind: JoinKind,
    cardinality: JoinCardinality,
}

impl TeamJoin {
    /// A left outer join: teamless members are preserved.
    ///
    /// The member→team relation is to-one, so the default cardinality is
    /// row-preserving.
    #[must_use]
    pub const fn left_outer() -> Self {
        Self {
            kind: JoinKind::LeftOuter,
            cardinality: JoinCardinality::RowPreserving,
        }
    }

    /// An inner join: only members that belong to a team are returned.
    #[must_use]
    pub const fn inner() -> Self {
        Self {
            kind: JoinKind::Inner,
            cardinality: JoinCardinality::RowPreserving,
        }
    }

    /// Overrides the declared cardinality of this join.
    #[must_use]
    pub const fn with_cardinality(mut self, cardinality: JoinCardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// The join operator to apply.
    #[must_use]
    pub const fn kind(&self) -> JoinKind {
        self.kind
    }

    /// The declared row cardinality of the join.
    #[must_use]
    pub const fn cardinality(&self) -> JoinCardinality {
        self.cardinality
    }
}

impl Default for TeamJoin {
    fn default() -> Self {
        Self::left_outer()
    }
}
