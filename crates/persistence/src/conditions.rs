// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dynamic search predicates for member queries.
//!
//! Each optional field of a [`MemberSearchFilter`] maps to a pure builder
//! that yields either a concrete Diesel expression or nothing: absent and
//! blank inputs contribute no condition at all, never a default-true or
//! default-false one. [`member_filter`] AND-composes whatever is present
//! into a single boxed predicate; with zero present fields it returns
//! `None` and the executor applies no `WHERE` clause, so an empty filter
//! matches every row.
//!
//! Predicates are built over the joined query source. The builders are
//! generic over which join is in effect (inner or left outer), so the same
//! composition serves both; the executor instantiates them with
//! [`InnerJoinedMembers`] or [`LeftJoinedMembers`]. Expression building
//! never touches the store.

use diesel::dsl;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};
use diesel::sqlite::Sqlite;

use crate::diesel_schema::{members, teams};
use roster_domain::MemberSearchFilter;

/// Query source of members inner-joined with teams.
pub type InnerJoinedMembers = dsl::InnerJoinQuerySource<members::table, teams::table>;

/// Query source of members left-outer-joined with teams.
pub type LeftJoinedMembers = dsl::LeftJoinQuerySource<members::table, teams::table>;

/// An opaque boolean filter expression over the joined query source `QS`.
///
/// The `SqlType` is `Nullable<Bool>` because conditions on left-joined
/// team columns are nullable in SQL; null never matches, which is exactly
/// the semantics a present `team_name` filter needs for teamless members.
pub type BoxedCondition<QS> =
    Box<dyn BoxableExpression<QS, Sqlite, SqlType = Nullable<Bool>>>;

pub(crate) type UserNameEq = dsl::Nullable<dsl::Eq<members::user_name, String>>;
pub(crate) type TeamNameEq = dsl::Eq<dsl::Nullable<teams::team_name>, String>;
pub(crate) type AgeGoe = dsl::Nullable<dsl::GtEq<members::age, i32>>;
pub(crate) type AgeLoe = dsl::Nullable<dsl::LtEq<members::age, i32>>;

/// Strips absent-equivalent string input: `None`, empty, and
/// whitespace-only all mean "no constraint".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Equality on `members.user_name`, or nothing for blank input.
fn user_name_eq(user_name: Option<&str>) -> Option<UserNameEq> {
    non_blank(user_name).map(|name| members::user_name.eq(name.to_owned()).nullable())
}

/// Equality on the joined `teams.team_name`, or nothing for blank input.
fn team_name_eq(team_name: Option<&str>) -> Option<TeamNameEq> {
    non_blank(team_name).map(|name| teams::team_name.nullable().eq(name.to_owned()))
}

/// Inclusive lower bound on `members.age`, or nothing.
fn age_goe(age_goe: Option<i32>) -> Option<AgeGoe> {
    age_goe.map(|bound| members::age.ge(bound).nullable())
}

/// Inclusive upper bound on `members.age`, or nothing.
fn age_loe(age_loe: Option<i32>) -> Option<AgeLoe> {
    age_loe.map(|bound| members::age.le(bound).nullable())
}

/// Composes the present conditions of `filter` into one AND-ed predicate.
///
/// Returns `None` when no field is present; callers must then leave the
/// query unfiltered rather than filtering on a constant.
pub fn member_filter<QS: 'static>(filter: &MemberSearchFilter) -> Option<BoxedCondition<QS>>
where
    UserNameEq: BoxableExpression<QS, Sqlite, SqlType = Nullable<Bool>>,
    TeamNameEq: BoxableExpression<QS, Sqlite, SqlType = Nullable<Bool>>,
    AgeGoe: BoxableExpression<QS, Sqlite, SqlType = Nullable<Bool>>,
    AgeLoe: BoxableExpression<QS, Sqlite, SqlType = Nullable<Bool>>,
{
    let mut conditions: Vec<BoxedCondition<QS>> = Vec::new();

    if let Some(condition) = user_name_eq(filter.user_name()) {
        conditions.push(Box::new(condition));
    }
    if let Some(condition) = team_name_eq(filter.team_name()) {
        conditions.push(Box::new(condition));
    }
    if let Some(condition) = age_goe(filter.age_goe()) {
        conditions.push(Box::new(condition));
    }
    if let Some(condition) = age_loe(filter.age_loe()) {
        conditions.push(Box::new(condition));
    }

    conditions
        .into_iter()
        .reduce(|lhs, rhs| Box::new(lhs.and(rhs)) as BoxedCondition<QS>)
}
