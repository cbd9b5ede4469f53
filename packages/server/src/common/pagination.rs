//! Offset-based pagination types for list and search endpoints.
//!
//! # Usage
//!
//! ```rust,ignore
//! let params = PageParams::new(search.page, search.size);
//! let (items, total) = Movie::search(&search, &params, pool).await?;
//! let page = Page::new(items, &params, total);
//! ```

use serde::Serialize;

/// Page request: zero-based page index plus page size.
///
/// Construction clamps the values (page >= 0, size 1-100) so a hostile or
/// sloppy caller cannot request an unbounded page.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub size: i64,
}

impl PageParams {
    pub fn new(page: i64, size: i64) -> Self {
        PageParams {
            page: page.max(0),
            size: size.clamp(1, 100),
        }
    }

    /// SQL OFFSET for this page.
    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams { page: 0, size: 10 }
    }
}

/// A page of results with totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Build a page envelope from one page of items and the overall count.
    pub fn new(content: Vec<T>, params: &PageParams, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + params.size - 1) / params.size
        };

        Page {
            content,
            page: params.page,
            size: params.size,
            total_elements,
            total_pages,
        }
    }

    /// Map the items of this page, keeping the envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_clamps() {
        let params = PageParams::new(-3, 0);
        assert_eq!(params.page, 0);
        assert_eq!(params.size, 1);

        let params = PageParams::new(2, 500);
        assert_eq!(params.page, 2);
        assert_eq!(params.size, 100);
    }

    #[test]
    fn test_offset() {
        let params = PageParams::new(3, 10);
        assert_eq!(params.offset(), 30);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], &PageParams::new(0, 10), 21);
        assert_eq!(page.total_pages, 3);

        let page = Page::new(Vec::<i32>::new(), &PageParams::new(0, 10), 0);
        assert_eq!(page.total_pages, 0);

        let page = Page::new(vec![1], &PageParams::new(0, 10), 10);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_map_keeps_envelope() {
        let page = Page::new(vec![1, 2], &PageParams::new(1, 2), 6);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_elements, 6);
        assert_eq!(mapped.total_pages, 3);
    }
}
