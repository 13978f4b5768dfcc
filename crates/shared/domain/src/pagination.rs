//! Pagination types and the page window calculation for list endpoints.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::error::{DomainError, DomainResult};

/// Requested pagination as received from a caller.
///
/// Values are kept raw; normalization happens in [`paginate`] so that
/// out-of-range input falls back to defaults instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub paginate: bool,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: None,
            limit: None,
            paginate: true,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: i64, limit: i64, paginate: bool) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            paginate,
        }
    }

    /// Build a query from raw string parameters.
    ///
    /// Unparsable numbers are treated as absent and an unparsable `paginate`
    /// flag means `true`.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, paginate: Option<&str>) -> Self {
        Self {
            page: page.and_then(|p| p.trim().parse().ok()),
            limit: limit.and_then(|l| l.trim().parse().ok()),
            paginate: paginate.and_then(parse_flag).unwrap_or(true),
        }
    }

    /// Page number after normalization (1-indexed)
    pub fn normalized_page(&self) -> u64 {
        positive_or(self.page, DEFAULT_PAGE_NUMBER)
    }

    /// Page size after normalization
    pub fn normalized_limit(&self) -> u64 {
        positive_or(self.limit, DEFAULT_PAGE_SIZE)
    }
}

fn positive_or(value: Option<i64>, default: u64) -> u64 {
    match value {
        Some(v) if v >= 1 => v as u64,
        _ => default,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Pagination metadata returned alongside a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_page: u64,
    /// Previous page number, 0 when there is none
    pub prev: u64,
    /// Next page number, 0 when there is none
    pub next: u64,
}

/// Concrete read window for the store plus the metadata describing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
    pub metadata: PaginationData,
}

/// Compute the read window and metadata for `total` matching rows.
///
/// With `paginate == false` the whole match set is a single page of
/// `total` rows.
pub fn paginate(query: &PaginationQuery, total: u64) -> DomainResult<PageWindow> {
    let (page, per_page, total_page) = if query.paginate {
        let page = query.normalized_page();
        let per_page = query.normalized_limit();
        (page, per_page, total_pages(total, per_page)?)
    } else {
        (1, total, 1)
    };

    let prev = if page <= 1 { 0 } else { page - 1 };
    let next = if page < total_page { page + 1 } else { 0 };

    Ok(PageWindow {
        skip: (page - 1).saturating_mul(per_page),
        limit: per_page,
        metadata: PaginationData {
            page,
            per_page,
            total,
            total_page,
            prev,
            next,
        },
    })
}

/// Number of pages needed for `total` rows, `ceil(total / per_page)`
pub fn total_pages(total: u64, per_page: u64) -> DomainResult<u64> {
    if per_page == 0 {
        return Err(DomainError::invalid_argument("page size must be greater than zero"));
    }
    Ok(total.div_ceil(per_page))
}

/// A page of results with its metadata
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationData,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, meta: PaginationData) -> Self {
        Self { data, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(page: i64, limit: i64, total: u64) -> PaginationData {
        paginate(&PaginationQuery::new(page, limit, true), total)
            .unwrap()
            .metadata
    }

    #[test]
    fn test_non_positive_page_and_limit_use_defaults() {
        for bad in [0, -1, -50] {
            let window = paginate(&PaginationQuery::new(bad, bad, true), 100).unwrap();
            assert_eq!(window.metadata.page, 1);
            assert_eq!(window.metadata.per_page, 20);
            assert_eq!(window.skip, 0);
        }
    }

    #[test]
    fn test_non_numeric_params_use_defaults() {
        let query = PaginationQuery::from_params(Some("abc"), Some("2.5"), Some("maybe"));
        assert_eq!(query.page, None);
        assert_eq!(query.limit, None);
        assert!(query.paginate);

        let window = paginate(&query, 10).unwrap();
        assert_eq!(window.metadata.page, 1);
        assert_eq!(window.limit, 20);
    }

    #[test]
    fn test_paginate_flag_parsing() {
        assert!(!PaginationQuery::from_params(None, None, Some("false")).paginate);
        assert!(!PaginationQuery::from_params(None, None, Some("0")).paginate);
        assert!(PaginationQuery::from_params(None, None, Some("TRUE")).paginate);
        assert!(PaginationQuery::from_params(None, None, None).paginate);
    }

    #[test]
    fn test_forty_five_rows_by_twenty() {
        let first = meta(1, 20, 45);
        assert_eq!(first.total_page, 3);
        assert_eq!((first.prev, first.next), (0, 2));

        let second = meta(2, 20, 45);
        assert_eq!((second.prev, second.next), (1, 3));

        let third = meta(3, 20, 45);
        assert_eq!((third.prev, third.next), (2, 0));
    }

    #[test]
    fn test_skip_is_offset_of_requested_page() {
        let window = paginate(&PaginationQuery::new(3, 10, true), 45).unwrap();
        assert_eq!(window.skip, 20);
        assert_eq!(window.limit, 10);
    }

    #[test]
    fn test_total_page_bounds_hold() {
        for total in 1..=120u64 {
            for limit in 1..=25i64 {
                let m = meta(1, limit, total);
                let per_page = limit as u64;
                assert_eq!(m.total_page, (total + per_page - 1) / per_page);
                assert!(per_page * (m.total_page - 1) < total);
                assert!(total <= per_page * m.total_page);
            }
        }
    }

    #[test]
    fn test_single_page_has_no_links() {
        let m = meta(1, 20, 5);
        assert_eq!(m.total_page, 1);
        assert_eq!((m.prev, m.next), (0, 0));
    }

    #[test]
    fn test_empty_collection() {
        let m = meta(1, 20, 0);
        assert_eq!(m.total_page, 0);
        assert_eq!((m.prev, m.next), (0, 0));
    }

    #[test]
    fn test_page_past_the_end_points_back() {
        let m = meta(7, 20, 45);
        assert_eq!((m.prev, m.next), (6, 0));
    }

    #[test]
    fn test_unpaginated_returns_everything_as_one_page() {
        let window = paginate(&PaginationQuery::new(4, 5, false), 37).unwrap();
        assert_eq!(window.skip, 0);
        assert_eq!(window.limit, 37);
        assert_eq!(
            window.metadata,
            PaginationData {
                page: 1,
                per_page: 37,
                total: 37,
                total_page: 1,
                prev: 0,
                next: 0,
            }
        );
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let err = total_pages(10, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let json = serde_json::to_value(meta(2, 10, 25)).unwrap();
        assert_eq!(json["perPage"], 10);
        assert_eq!(json["totalPage"], 3);
    }
}
