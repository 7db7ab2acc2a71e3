use serde::{Deserialize, Serialize};

/// Zero-based page selector carried on the paged report endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page: usize,
    /// Rows per page.
    #[serde(default = "PageRequest::default_per_page")]
    pub per_page: usize,
}

impl PageRequest {
    fn default_per_page() -> usize {
        20
    }

    /// Start/end row offsets of this page within a list of `total` rows.
    pub(crate) fn slice_bounds(&self, total: usize) -> (usize, usize) {
        let per_page = self.per_page.max(1);
        let start = self.page.saturating_mul(per_page).min(total);
        let end = (start + per_page).min(total);
        (start, end)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: Self::default_per_page(),
        }
    }
}

/// One page of report rows, with the size of the full result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows on this page.
    pub items: Vec<T>,
    /// Zero-based page index.
    pub page: usize,
    /// Requested rows per page.
    pub per_page: usize,
    /// Total rows across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Wraps an already-sliced page of rows.
    pub fn new(items: Vec<T>, request: &PageRequest, total: usize) -> Self {
        Self {
            items,
            page: request.page,
            per_page: request.per_page.max(1),
            total,
        }
    }
}
