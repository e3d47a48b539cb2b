// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation for member and team registration.
//!
//! Search input is never validated here; absent or blank search fields
//! degrade to predicate omission. These checks guard data that is about to
//! be written to the store.

use crate::error::DomainError;

/// The longest accepted user or team name.
pub const MAX_NAME_LENGTH: usize = 64;

/// The largest accepted member age.
pub const MAX_MEMBER_AGE: i32 = 150;

/// Validates a user name for registration.
///
/// # Errors
///
/// Returns `DomainError::InvalidUserName` if the name is blank or longer
/// than [`MAX_NAME_LENGTH`] characters.
pub fn validate_user_name(user_name: &str) -> Result<(), DomainError> {
    if user_name.trim().is_empty() {
        return Err(DomainError::InvalidUserName(String::from(
            "user name must not be blank",
        )));
    }
    if user_name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidUserName(format!(
            "user name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a team name for registration.
///
/// # Errors
///
/// Returns `DomainError::InvalidTeamName` if the name is blank or longer
/// than [`MAX_NAME_LENGTH`] characters.
pub fn validate_team_name(team_name: &str) -> Result<(), DomainError> {
    if team_name.trim().is_empty() {
        return Err(DomainError::InvalidTeamName(String::from(
            "team name must not be blank",
        )));
    }
    if team_name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidTeamName(format!(
            "team name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a member age for registration.
///
/// # Errors
///
/// Returns `DomainError::InvalidMemberAge` if the age is negative or
/// greater than [`MAX_MEMBER_AGE`].
pub const fn validate_member_age(age: i32) -> Result<(), DomainError> {
    if age < 0 || age > MAX_MEMBER_AGE {
        return Err(DomainError::InvalidMemberAge(age));
    }
    Ok(())
}
