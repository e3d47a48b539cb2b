// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team registration.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::teams;
use crate::error::PersistenceError;
use crate::mutations::current_timestamp;
use roster_domain::validate_team_name;

/// Creates a new team.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_name` - The team name (must be unique)
///
/// # Errors
///
/// Returns `PersistenceError::InvalidInput` if the name fails domain
/// validation, `PersistenceError::DuplicateTeam` if a team with this name
/// already exists, or a database error otherwise.
pub fn create_team(conn: &mut SqliteConnection, team_name: &str) -> Result<i64, PersistenceError> {
    validate_team_name(team_name)?;

    let created_at: String = current_timestamp()?;

    diesel::insert_into(teams::table)
        .values((
            teams::team_name.eq(team_name),
            teams::created_at.eq(&created_at),
        ))
        .execute(conn)
        .map_err(|e| match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => PersistenceError::DuplicateTeam(team_name.to_string()),
            other => PersistenceError::from(other),
        })?;

    let team_id: i64 = get_last_insert_rowid(conn)?;

    info!(team_id, team_name, "Team created");
    Ok(team_id)
}
