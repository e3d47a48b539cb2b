// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The member search executor.
//!
//! Executes filtered, joined, optionally sorted member/team queries and
//! returns either a full result set or exactly one page plus the total
//! matching row count.
//!
//! ## Count elision
//!
//! A paged search issues one content query and, only when necessary, one
//! count query. The count query is skipped whenever the page shape already
//! determines the total: if the returned content is shorter than the
//! requested limit, no further rows exist past this page, so
//! `total = offset + content.len()` (and plain `content.len()` on the
//! first page). An empty page at a non-zero offset proves nothing about
//! rows before the offset, so the count query always runs in that case.
//!
//! ## Join cardinality
//!
//! The count query joins the same relation as the content query. For a
//! join declared row-multiplying, counting rows would overcount members
//! with several joined rows, so the count switches to
//! `COUNT(DISTINCT members.member_id)`.

use diesel::SqliteConnection;
use diesel::dsl::{count_distinct, count_star};
use diesel::prelude::*;
use tracing::debug;

use crate::conditions::{
    BoxedCondition, InnerJoinedMembers, LeftJoinedMembers, member_filter,
};
use crate::data_models::MemberTeamData;
use crate::diesel_schema::{members, teams};
use crate::error::PersistenceError;
use roster_domain::{
    JoinCardinality, JoinKind, MemberSearchFilter, PageRequest, PageResult,
    SortDirection, SortField, TeamJoin,
};

/// Diesel row struct for the member search projection.
#[derive(Queryable)]
struct MemberTeamRow {
    member_id: i64,
    user_name: String,
    age: i32,
    team_id: Option<i64>,
    team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamData {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            member_id: row.member_id,
            user_name: row.user_name,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

type MemberTeamSelection = (
    members::member_id,
    members::user_name,
    members::age,
    diesel::dsl::Nullable<teams::team_id>,
    diesel::dsl::Nullable<teams::team_name>,
);

/// The fixed five-column projection every member search materializes.
///
/// Restricting the select clause to exactly the output shape keeps the
/// transferred columns to what the caller receives; `created_at` and any
/// future bookkeeping columns never travel.
fn member_team_selection() -> MemberTeamSelection {
    (
        members::member_id,
        members::user_name,
        members::age,
        teams::team_id.nullable(),
        teams::team_name.nullable(),
    )
}

/// Derives the total analytically from the page shape, if possible.
///
/// Content shorter than the limit proves this is the final page: with
/// `fetched < limit`, the store had no more rows to give, so
/// `total = offset + fetched`. At offset zero that collapses to `fetched`
/// alone, including the empty case. An empty page at a non-zero offset is
/// ambiguous (the offset may lie past the end by any distance) and yields
/// `None`.
pub(crate) const fn resolved_total(offset: u64, limit: u32, fetched: usize) -> Option<u64> {
    let fetched: u64 = fetched as u64;
    if fetched >= limit as u64 {
        return None;
    }
    if offset == 0 {
        return Some(fetched);
    }
    if fetched > 0 {
        return Some(offset + fetched);
    }
    None
}

/// Executes a paged member search and returns one page plus the total.
///
/// Issues one content query, then either derives the total from the page
/// shape or issues one count query with the same filter and join.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - The search criteria; absent fields constrain nothing
/// * `join` - The team join specification
/// * `page` - The validated page request
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn search_members_page(
    conn: &mut SqliteConnection,
    filter: &MemberSearchFilter,
    join: TeamJoin,
    page: &PageRequest,
) -> Result<PageResult<MemberTeamData>, PersistenceError> {
    debug!(
        offset = page.offset(),
        limit = page.limit(),
        unconstrained = filter.is_unconstrained(),
        "Executing paged member search"
    );

    let offset: i64 = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    let limit: i64 = i64::from(page.limit());

    let rows: Vec<MemberTeamRow> = match join.kind() {
        JoinKind::LeftOuter => {
            let predicate: Option<BoxedCondition<LeftJoinedMembers>> = member_filter(filter);
            let mut query = members::table
                .left_join(teams::table)
                .select(member_team_selection())
                .into_boxed();
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            for key in page.sort() {
                query = match (key.field(), key.direction()) {
                    (SortField::MemberId, SortDirection::Ascending) => {
                        query.then_order_by(members::member_id.asc())
                    }
                    (SortField::MemberId, SortDirection::Descending) => {
                        query.then_order_by(members::member_id.desc())
                    }
                    (SortField::UserName, SortDirection::Ascending) => {
                        query.then_order_by(members::user_name.asc())
                    }
                    (SortField::UserName, SortDirection::Descending) => {
                        query.then_order_by(members::user_name.desc())
                    }
                    (SortField::Age, SortDirection::Ascending) => {
                        query.then_order_by(members::age.asc())
                    }
                    (SortField::Age, SortDirection::Descending) => {
                        query.then_order_by(members::age.desc())
                    }
                    (SortField::TeamName, SortDirection::Ascending) => {
                        query.then_order_by(teams::team_name.nullable().asc())
                    }
                    (SortField::TeamName, SortDirection::Descending) => {
                        query.then_order_by(teams::team_name.nullable().desc())
                    }
                };
            }
            query
                .offset(offset)
                .limit(limit)
                .load::<MemberTeamRow>(conn)?
        }
        JoinKind::Inner => {
            let predicate: Option<BoxedCondition<InnerJoinedMembers>> = member_filter(filter);
            let mut query = members::table
                .inner_join(teams::table)
                .select(member_team_selection())
                .into_boxed();
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            for key in page.sort() {
                query = match (key.field(), key.direction()) {
                    (SortField::MemberId, SortDirection::Ascending) => {
                        query.then_order_by(members::member_id.asc())
                    }
                    (SortField::MemberId, SortDirection::Descending) => {
                        query.then_order_by(members::member_id.desc())
                    }
                    (SortField::UserName, SortDirection::Ascending) => {
                        query.then_order_by(members::user_name.asc())
                    }
                    (SortField::UserName, SortDirection::Descending) => {
                        query.then_order_by(members::user_name.desc())
                    }
                    (SortField::Age, SortDirection::Ascending) => {
                        query.then_order_by(members::age.asc())
                    }
                    (SortField::Age, SortDirection::Descending) => {
                        query.then_order_by(members::age.desc())
                    }
                    (SortField::TeamName, SortDirection::Ascending) => {
                        query.then_order_by(teams::team_name.nullable().asc())
                    }
                    (SortField::TeamName, SortDirection::Descending) => {
                        query.then_order_by(teams::team_name.nullable().desc())
                    }
                };
            }
            query
                .offset(offset)
                .limit(limit)
                .load::<MemberTeamRow>(conn)?
        }
    };

    let content: Vec<MemberTeamData> = rows.into_iter().map(MemberTeamData::from).collect();

    let total: u64 = match resolved_total(page.offset(), page.limit(), content.len()) {
        Some(total) => {
            debug!(total, "Total count derived from page shape; count query elided");
            total
        }
        None => count_members(conn, filter, join)?,
    };

    Ok(PageResult::new(content, page.clone(), total))
}

/// Executes an unpaged member search.
///
/// Same filter, join, and projection pipeline as the paged search, without
/// pagination or ordering. Intended for small, bounded result sets.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `filter` - The search criteria; absent fields constrain nothing
/// * `join` - The team join specification
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn search_members(
    conn: &mut SqliteConnection,
    filter: &MemberSearchFilter,
    join: TeamJoin,
) -> Result<Vec<MemberTeamData>, PersistenceError> {
    debug!(
        unconstrained = filter.is_unconstrained(),
        "Executing unpaged member search"
    );

    let rows: Vec<MemberTeamRow> = match join.kind() {
        JoinKind::LeftOuter => {
            let predicate: Option<BoxedCondition<LeftJoinedMembers>> = member_filter(filter);
            let mut query = members::table
                .left_join(teams::table)
                .select(member_team_selection())
                .into_boxed();
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            query.load::<MemberTeamRow>(conn)?
        }
        JoinKind::Inner => {
            let predicate: Option<BoxedCondition<InnerJoinedMembers>> = member_filter(filter);
            let mut query = members::table
                .inner_join(teams::table)
                .select(member_team_selection())
                .into_boxed();
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            query.load::<MemberTeamRow>(conn)?
        }
    };

    Ok(rows.into_iter().map(MemberTeamData::from).collect())
}

/// Counts all members matching the filter, ignoring pagination.
///
/// The join is carried into the count query because a present `team_name`
/// condition references the joined relation; for a row-multiplying join
/// the count deduplicates by member identity.
pub(crate) fn count_members(
    conn: &mut SqliteConnection,
    filter: &MemberSearchFilter,
    join: TeamJoin,
) -> Result<u64, PersistenceError> {
    debug!("Counting members matching filter");

    let count: i64 = match join.kind() {
        JoinKind::LeftOuter => {
            let predicate: Option<BoxedCondition<LeftJoinedMembers>> = member_filter(filter);
            let mut query = match join.cardinality() {
                JoinCardinality::RowPreserving => members::table
                    .left_join(teams::table)
                    .select(count_star())
                    .into_boxed(),
                JoinCardinality::RowMultiplying => members::table
                    .left_join(teams::table)
                    .select(count_distinct(members::member_id))
                    .into_boxed(),
            };
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            query.first::<i64>(conn)?
        }
        JoinKind::Inner => {
            let predicate: Option<BoxedCondition<InnerJoinedMembers>> = member_filter(filter);
            let mut query = match join.cardinality() {
                JoinCardinality::RowPreserving => members::table
                    .inner_join(teams::table)
                    .select(count_star())
                    .into_boxed(),
                JoinCardinality::RowMultiplying => members::table
                    .inner_join(teams::table)
                    .select(count_distinct(members::member_id))
                    .into_boxed(),
            };
            if let Some(predicate) = predicate {
                query = query.filter(predicate);
            }
            query.first::<i64>(conn)?
        }
    };

    Ok(u64::try_from(count).unwrap_or(0))
}
