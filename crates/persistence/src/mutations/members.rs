// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member registration.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::members;
use crate::error::PersistenceError;
use crate::mutations::current_timestamp;
use roster_domain::{validate_member_age, validate_user_name};

/// Creates a new member, optionally assigned to a team.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_name` - The member's user name
/// * `age` - The member's age
/// * `team_id` - The member's team, or `None` for a teamless member
///
/// # Errors
///
/// Returns `PersistenceError::InvalidInput` if a field fails domain
/// validation, `PersistenceError::TeamNotFound` if `team_id` references no
/// existing team, or a database error otherwise.
pub fn create_member(
    conn: &mut SqliteConnection,
    user_name: &str,
    age: i32,
    team_id: Option<i64>,
) -> Result<i64, PersistenceError> {
    validate_user_name(user_name)?;
    validate_member_age(age)?;

    let created_at: String = current_timestamp()?;

    diesel::insert_into(members::table)
        .values((
            members::user_name.eq(user_name),
            members::age.eq(age),
            members::team_id.eq(team_id),
            members::created_at.eq(&created_at),
        ))
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            ) => PersistenceError::TeamNotFound(team_id.unwrap_or_default()),
            other => PersistenceError::from(other),
        })?;

    let member_id: i64 = get_last_insert_rowid(conn)?;

    info!(member_id, user_name, "Member created");
    Ok(member_id)
}
