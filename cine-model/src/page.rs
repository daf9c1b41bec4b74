#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Paged list envelope shared by the listing endpoints.
///
/// Trending and review responses only guarantee `results`; the paging
/// counters default to zero when absent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page<T> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub page: u32,
    #[cfg_attr(feature = "serde", serde(default = "Vec::new"))]
    pub results: Vec<T>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_results: u32,
}

impl<T> Page<T> {
    pub fn single(results: Vec<T>) -> Self {
        let total = results.len() as u32;
        Self {
            page: 1,
            results,
            total_pages: 1,
            total_results: total,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 0,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }
}
