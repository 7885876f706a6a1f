//! Pagination primitives shared across list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_PER_PAGE: i64 = 100;

    /// Default items per page.
    const DEFAULT_PER_PAGE: i64 = 5;

    pub fn limit(&self) -> i64 {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    /// Rows to skip; saturates for absurd page numbers so the page is just empty.
    pub fn offset(&self) -> i64 {
        (self.current_page() - 1).saturating_mul(self.limit())
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Paged result envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let per_page = pagination.limit();
        let total_pages = (total + per_page - 1) / per_page;
        Self {
            items,
            total,
            page: pagination.current_page(),
            per_page,
            total_pages,
        }
    }
}

impl<T: Serialize + Clone> PagedResult<T> {
    /// Page through a list that is already in memory.
    pub fn from_slice(all: &[T], pagination: &Pagination) -> Self {
        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(0);
        let items = all.iter().skip(offset).take(limit).cloned().collect();
        Self::new(items, all.len() as i64, pagination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 5);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn pagination_clamps_per_page() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(500),
        };
        assert_eq!(p.limit(), 100);
    }

    #[test]
    fn pagination_offset_calculation() {
        let p = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn paged_result_total_pages() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(10),
        };
        let result = PagedResult::new(vec![1, 2, 3], 25, &p);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total, 25);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn slice_second_page() {
        let all: Vec<i32> = (1..=7).collect();
        let p = Pagination {
            page: Some(2),
            per_page: None,
        };
        let result = PagedResult::from_slice(&all, &p);
        assert_eq!(result.items, vec![6, 7]);
        assert_eq!(result.total, 7);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let all = vec!["a", "b"];
        let p = Pagination {
            page: Some(9),
            per_page: Some(5),
        };
        let result = PagedResult::from_slice(&all, &p);
        assert!(result.items.is_empty());
        assert_eq!(result.page, 9);
    }

    #[test]
    fn huge_page_saturates_offset() {
        let p = Pagination {
            page: Some(i64::MAX),
            per_page: None,
        };
        assert_eq!(p.offset(), i64::MAX);

        let result = PagedResult::from_slice(&[1, 2, 3], &p);
        assert!(result.items.is_empty());
        assert_eq!(result.total, 3);
        assert_eq!(result.page, i64::MAX);
    }

    #[test]
    fn negative_page_is_first_page() {
        let p = Pagination {
            page: Some(i64::MIN),
            per_page: Some(2),
        };
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }
}
