//! View-state configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::ITEMS_PER_PAGE;

/// Default quiet period of a debounced search (milliseconds).
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Settings shared by collection view-states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Items on one page (at least 1).
    pub items_per_page: u32,
    /// Quiet period before a search is applied.
    pub search_debounce_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: ITEMS_PER_PAGE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    #[must_use]
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Page size with a zero value from deserialization lifted to 1.
    pub fn page_size(&self) -> u32 {
        self.items_per_page.max(1)
    }
}
