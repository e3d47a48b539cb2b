// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// One row of the member search projection: a member joined with its team.
///
/// This is the only shape search queries materialize. The select clause is
/// restricted to exactly these five columns; team columns are `None` when
/// a left-joined member has no team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTeamData {
    /// The member's numeric identifier.
    pub member_id: i64,
    /// The member's user name.
    pub user_name: String,
    /// The member's age.
    pub age: i32,
    /// The identifier of the member's team, if any.
    pub team_id: Option<i64>,
    /// The name of the member's team, if any.
    pub team_name: Option<String>,
}
