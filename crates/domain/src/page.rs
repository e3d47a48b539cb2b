// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The largest accepted page offset.
///
/// The relational store addresses rows with signed 64-bit offsets, so
/// offsets beyond `i64::MAX` are rejected at construction.
#[allow(clippy::cast_sign_loss)]
pub const MAX_PAGE_OFFSET: u64 = i64::MAX as u64;

/// Direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    Ascending,
    /// Largest values first.
    Descending,
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(DomainError::InvalidSortDirection(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SortDirection {
    /// Converts this direction to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A sortable column of the member search projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    /// The member's numeric identifier.
    MemberId,
    /// The member's user name.
    UserName,
    /// The member's age.
    Age,
    /// The joined team's name.
    TeamName,
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member_id" => Ok(Self::MemberId),
            "user_name" => Ok(Self::UserName),
            "age" => Ok(Self::Age),
            "team_name" => Ok(Self::TeamName),
            _ => Err(DomainError::InvalidSortField(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SortField {
    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MemberId => "member_id",
            Self::UserName => "user_name",
            Self::Age => "age",
            Self::TeamName => "team_name",
        }
    }
}

/// One (field, direction) pair of a multi-key sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    field: SortField,
    direction: SortDirection,
}

impl SortKey {
    /// Creates a new sort key.
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Creates an ascending sort key for the given field.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Creates a descending sort key for the given field.
    #[must_use]
    pub const fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// The sorted field.
    #[must_use]
    pub const fn field(&self) -> SortField {
        self.field
    }

    /// The sort direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    /// Parses `"field"` or `"field:direction"` (e.g. `"age:desc"`).
    ///
    /// A bare field name sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None => Ok(Self::ascending(SortField::from_str(s)?)),
            Some((field, direction)) if !field.is_empty() => Ok(Self::new(
                SortField::from_str(field)?,
                SortDirection::from_str(direction)?,
            )),
            Some(_) => Err(DomainError::InvalidSortKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

/// A validated request for one page of results.
///
/// `offset` is zero-based and counts rows, not pages. `limit` is the
/// maximum number of rows the page may contain and is always greater than
/// zero. `sort` is applied in order, each key with its own direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: u64,
    limit: u32,
    sort: Vec<SortKey>,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Arguments
    ///
    /// * `offset` - Zero-based row offset
    /// * `limit` - Maximum number of rows to return (must be > 0)
    /// * `sort` - Ordered sort keys, outermost first
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageLimit` if `limit` is zero, or
    /// `DomainError::InvalidPageOffset` if `offset` exceeds
    /// [`MAX_PAGE_OFFSET`].
    pub fn new(offset: u64, limit: u32, sort: Vec<SortKey>) -> Result<Self, DomainError> {
        if limit == 0 {
            return Err(DomainError::InvalidPageLimit(limit));
        }
        if offset > MAX_PAGE_OFFSET {
            return Err(DomainError::InvalidPageOffset(offset));
        }
        Ok(Self {
            offset,
            limit,
            sort,
        })
    }

    /// Creates an unsorted page request.
    ///
    /// # Errors
    ///
    /// Same as [`PageRequest::new`].
    pub fn unsorted(offset: u64, limit: u32) -> Result<Self, DomainError> {
        Self::new(offset, limit, Vec::new())
    }

    /// The zero-based row offset.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// The maximum number of rows the page may contain.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// The ordered sort keys.
    #[must_use]
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }
}

/// One page of results together with the total matching row count.
///
/// Invariants: `content.len() <= request.limit()` and
/// `total >= content.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    content: Vec<T>,
    request: PageRequest,
    total: u64,
}

impl<T> PageResult<T> {
    /// Assembles a page result from a content slice, the request that
    /// produced it, and the total matching row count.
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            content,
            request,
            total,
        }
    }

    /// The rows of this page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consumes the result, returning the rows of this page.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// The request this page was produced for.
    #[must_use]
    pub const fn request(&self) -> &PageRequest {
        &self.request
    }

    /// The total number of rows matching the filter, ignoring pagination.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The number of rows in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether this page contains no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether another page exists after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.request.offset() + (self.content.len() as u64) < self.total
    }
}
