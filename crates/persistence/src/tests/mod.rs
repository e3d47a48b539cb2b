// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use std::sync::{Arc, Mutex};

use diesel::connection::InstrumentationEvent;
use diesel::prelude::*;

use crate::{MemberTeamData, Persistence};

/// Creates a fresh, empty in-memory persistence instance.
pub fn create_empty_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Seeds the canonical member fixture.
///
/// Three teams (`team3` stays empty) and seven members:
/// `member1`..`member3` (ages 10, 20, 30) in `team1`,
/// `member4`..`member7` (ages 40, 50, 60, 70) in `team2`.
pub fn seed_canonical_members(persistence: &mut Persistence) {
    let team1: i64 = persistence.register_team("team1").unwrap();
    let team2: i64 = persistence.register_team("team2").unwrap();
    persistence.register_team("team3").unwrap();

    persistence.register_member("member1", 10, Some(team1)).unwrap();
    persistence.register_member("member2", 20, Some(team1)).unwrap();
    persistence.register_member("member3", 30, Some(team1)).unwrap();
    persistence.register_member("member4", 40, Some(team2)).unwrap();
    persistence.register_member("member5", 50, Some(team2)).unwrap();
    persistence.register_member("member6", 60, Some(team2)).unwrap();
    persistence.register_member("member7", 70, Some(team2)).unwrap();
}

/// Adds a member that belongs to no team.
pub fn seed_teamless_member(persistence: &mut Persistence) {
    persistence.register_member("member8", 80, None).unwrap();
}

/// Records the SQL of every query the connection issues from now on.
///
/// Uses Diesel's connection instrumentation, so the assertion observes
/// what was actually sent to the store.
pub fn record_queries(persistence: &mut Persistence) -> Arc<Mutex<Vec<String>>> {
    let queries: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink: Arc<Mutex<Vec<String>>> = Arc::clone(&queries);

    persistence
        .conn
        .set_instrumentation(move |event: InstrumentationEvent<'_>| {
            if let InstrumentationEvent::StartQuery { query, .. } = event {
                if let Ok(mut log) = sink.lock() {
                    log.push(format!("{query:?}"));
                }
            }
        });

    queries
}

/// The number of recorded queries that contain a COUNT aggregate.
pub fn count_queries_issued(queries: &Arc<Mutex<Vec<String>>>) -> usize {
    queries
        .lock()
        .map(|log| {
            log.iter()
                .filter(|sql| sql.to_uppercase().contains("COUNT("))
                .count()
        })
        .unwrap_or(0)
}

/// The user names of the given rows, sorted for order-insensitive
/// comparison.
pub fn sorted_user_names(rows: &[MemberTeamData]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|row| row.user_name.clone()).collect();
    names.sort();
    names
}

/// The user names of the given rows in result order.
pub fn user_names(rows: &[MemberTeamData]) -> Vec<String> {
    rows.iter().map(|row| row.user_name.clone()).collect()
}
