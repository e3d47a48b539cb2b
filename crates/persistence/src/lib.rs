// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Roster search service.
//!
//! This crate provides the relational store behind member search: the
//! dynamic search predicates, the paginated search executor with its
//! count-elision optimization, and the registration mutations that
//! populate the store. It is built on Diesel over `SQLite`.
//!
//! ## Architecture
//!
//! - `conditions` — turns a `MemberSearchFilter` into zero or more Diesel
//!   predicates and one AND-composed filter expression
//! - `queries` — read-only search and count queries
//! - `mutations` — team and member registration
//! - `backend` — `SQLite` connection initialization and PRAGMA handling
//!
//! The public surface is the [`Persistence`] adapter, which owns a single
//! connection and wraps every logical operation in its own transaction.
//!
//! ## Testing Philosophy
//!
//! All tests run against fast, deterministic in-memory `SQLite` databases;
//! each test receives a unique instance. Count-query elision is asserted
//! by observing the SQL actually issued through Diesel's connection
//! instrumentation, not by mocking the store.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use roster_domain::{MemberSearchFilter, PageRequest, PageResult, TeamJoin};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod conditions;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::MemberTeamData;
pub use error::PersistenceError;

/// Persistence adapter for the member/team store.
///
/// Owns a single `SQLite` connection and no other state; every operation
/// is stateless with respect to prior calls and runs in its own
/// transaction.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via an atomic
    /// counter, ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("roster_memdb_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection =
            backend::sqlite::initialize_database(&shared_memory_url)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Executes a paged member search.
    ///
    /// Returns one page of the member/team projection together with the
    /// total matching row count. The total-count query is elided whenever
    /// the page shape already determines the total; otherwise one count
    /// query with the same filter and join is issued. Both queries run in
    /// a single transaction and therefore observe one snapshot.
    ///
    /// # Arguments
    ///
    /// * `filter` - The search criteria; absent fields constrain nothing
    /// * `join` - The team join specification
    /// * `page` - The validated page request
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub fn search_members_page(
        &mut self,
        filter: &MemberSearchFilter,
        join: TeamJoin,
        page: &PageRequest,
    ) -> Result<PageResult<MemberTeamData>, PersistenceError> {
        self.conn
            .transaction(|conn| queries::members::search_members_page(conn, filter, join, page))
    }

    /// Executes an unpaged member search.
    ///
    /// Intended for small, bounded result sets; no pagination and no
    /// count optimization applies.
    ///
    /// # Arguments
    ///
    /// * `filter` - The search criteria; absent fields constrain nothing
    /// * `join` - The team join specification
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn search_members(
        &mut self,
        filter: &MemberSearchFilter,
        join: TeamJoin,
    ) -> Result<Vec<MemberTeamData>, PersistenceError> {
        self.conn
            .transaction(|conn| queries::members::search_members(conn, filter, join))
    }

    /// Registers a new team and returns its identifier.
    ///
    /// # Arguments
    ///
    /// * `team_name` - The team name (must be unique)
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the name is taken, or the
    /// insert fails.
    pub fn register_team(&mut self, team_name: &str) -> Result<i64, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::teams::create_team(conn, team_name))
    }

    /// Registers a new member and returns its identifier.
    ///
    /// # Arguments
    ///
    /// * `user_name` - The member's user name
    /// * `age` - The member's age
    /// * `team_id` - The member's team, or `None` for a teamless member
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the team does not exist, or
    /// the insert fails.
    pub fn register_member(
        &mut self,
        user_name: &str,
        age: i32,
        team_id: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::members::create_member(conn, user_name, age, team_id))
    }

    /// Loads the demo dataset: `teamA`, `teamB`, and one hundred members
    /// `member0..member99` with age equal to their index, alternating
    /// between the two teams.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub fn seed_demo_data(&mut self) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            let team_a: i64 = mutations::teams::create_team(conn, "teamA")?;
            let team_b: i64 = mutations::teams::create_team(conn, "teamB")?;

            for index in 0..100_i32 {
                let team_id: i64 = if index % 2 == 0 { team_a } else { team_b };
                let user_name: String = format!("member{index}");
                mutations::members::create_member(conn, &user_name, index, Some(team_id))?;
            }

            info!("Seeded demo dataset: 2 teams, 100 members");
            Ok(())
        })
    }
}
