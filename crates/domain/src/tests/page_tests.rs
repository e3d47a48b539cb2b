// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::page::{
    MAX_PAGE_OFFSET, PageRequest, PageResult, SortDirection, SortField, SortKey,
};
use std::str::FromStr;

#[test]
fn page_request_accepts_valid_bounds() {
    let request: PageRequest = PageRequest::unsorted(0, 1).unwrap();
    assert_eq!(request.offset(), 0);
    assert_eq!(request.limit(), 1);
    assert!(request.sort().is_empty());
}

#[test]
fn page_request_rejects_zero_limit() {
    let result = PageRequest::unsorted(0, 0);
    assert_eq!(result.unwrap_err(), DomainError::InvalidPageLimit(0));
}

#[test]
fn page_request_rejects_offset_beyond_addressable_range() {
    let result = PageRequest::unsorted(MAX_PAGE_OFFSET + 1, 10);
    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidPageOffset(MAX_PAGE_OFFSET + 1)
    );
}

#[test]
fn page_request_accepts_maximum_offset() {
    assert!(PageRequest::unsorted(MAX_PAGE_OFFSET, 10).is_ok());
}

#[test]
fn page_request_preserves_sort_key_order() {
    let sort: Vec<SortKey> = vec![
        SortKey::descending(SortField::Age),
        SortKey::ascending(SortField::UserName),
    ];
    let request: PageRequest = PageRequest::new(0, 10, sort.clone()).unwrap();
    assert_eq!(request.sort(), sort.as_slice());
}

#[test]
fn sort_key_parses_bare_field_as_ascending() {
    let key: SortKey = SortKey::from_str("age").unwrap();
    assert_eq!(key.field(), SortField::Age);
    assert_eq!(key.direction(), SortDirection::Ascending);
}

#[test]
fn sort_key_parses_field_with_direction() {
    let key: SortKey = SortKey::from_str("user_name:desc").unwrap();
    assert_eq!(key.field(), SortField::UserName);
    assert_eq!(key.direction(), SortDirection::Descending);
}

#[test]
fn sort_key_round_trips_through_display() {
    let key: SortKey = SortKey::descending(SortField::TeamName);
    let parsed: SortKey = SortKey::from_str(&key.to_string()).unwrap();
    assert_eq!(parsed, key);
}

#[test]
fn sort_key_rejects_unknown_field() {
    let result = SortKey::from_str("created_at:asc");
    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidSortField(String::from("created_at"))
    );
}

#[test]
fn sort_key_rejects_unknown_direction() {
    let result = SortKey::from_str("age:down");
    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidSortDirection(String::from("down"))
    );
}

#[test]
fn sort_key_rejects_empty_field() {
    let result = SortKey::from_str(":desc");
    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidSortKey(String::from(":desc"))
    );
}

#[test]
fn page_result_reports_next_page_when_rows_remain() {
    let request: PageRequest = PageRequest::unsorted(0, 3).unwrap();
    let result: PageResult<i32> = PageResult::new(vec![1, 2, 3], request, 7);
    assert_eq!(result.len(), 3);
    assert_eq!(result.total(), 7);
    assert!(result.has_next());
}

#[test]
fn page_result_reports_no_next_page_on_last_page() {
    let request: PageRequest = PageRequest::unsorted(6, 3).unwrap();
    let result: PageResult<i32> = PageResult::new(vec![7], request, 7);
    assert_eq!(result.len(), 1);
    assert!(!result.has_next());
}

#[test]
fn empty_page_result_is_empty() {
    let request: PageRequest = PageRequest::unsorted(10, 3).unwrap();
    let result: PageResult<i32> = PageResult::new(Vec::new(), request, 7);
    assert!(result.is_empty());
    assert!(!result.has_next());
}
