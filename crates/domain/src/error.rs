// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page limit must be greater than zero.
    InvalidPageLimit(u32),
    /// Page offset exceeds the addressable range of the store.
    InvalidPageOffset(u64),
    /// Sort field name is not recognized.
    InvalidSortField(String),
    /// Sort direction is not recognized.
    InvalidSortDirection(String),
    /// Sort key text could not be parsed.
    InvalidSortKey(String),
    /// User name is empty or invalid.
    InvalidUserName(String),
    /// Team name is empty or invalid.
    InvalidTeamName(String),
    /// Member age is outside the accepted range.
    InvalidMemberAge(i32),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPageLimit(limit) => {
                write!(f, "Invalid page limit: {limit} (must be greater than zero)")
            }
            Self::InvalidPageOffset(offset) => {
                write!(f, "Invalid page offset: {offset} (exceeds addressable range)")
            }
            Self::InvalidSortField(field) => write!(f, "Invalid sort field: '{field}'"),
            Self::InvalidSortDirection(direction) => {
                write!(f, "Invalid sort direction: '{direction}'")
            }
            Self::InvalidSortKey(key) => write!(f, "Invalid sort key: '{key}'"),
            Self::InvalidUserName(msg) => write!(f, "Invalid user name: {msg}"),
            Self::InvalidTeamName(msg) => write!(f, "Invalid team name: {msg}"),
            Self::InvalidMemberAge(age) => write!(f, "Invalid member age: {age}"),
        }
    }
}

impl std::error::Error for DomainError {}
