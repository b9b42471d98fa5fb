//! Pagination state and the derived page-window helpers.

use serde::{Deserialize, Serialize};

/// Default number of items on one page.
pub const ITEMS_PER_PAGE: u32 = 10;

/// Page numbers shown without ellipsis when there are at most this many pages.
const MAX_PLAIN_PAGES: u32 = 7;
/// Pages shown next to the first or last page before switching to a centered window.
const EDGE_WINDOW: u32 = 6;

/// Page cursor and totals of a collection view.
///
/// `total_items` counts the *filtered* collection; `total_pages` never drops
/// below 1, so an empty view still has a (blank) first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    /// Current page (1-indexed).
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub items_per_page: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(ITEMS_PER_PAGE)
    }
}

impl PaginationState {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Whether `page` is a valid navigation target.
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Zero-based `[start, end)` window of the current page over `total_items`.
    pub fn bounds(&self) -> (usize, usize) {
        let per_page = self.items_per_page as usize;
        let start = (self.current_page.saturating_sub(1) as usize).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(self.total_items);
        (start.min(self.total_items), end)
    }

    /// One-based inclusive range of displayed items; `(0, 0)` when empty.
    pub fn item_range(&self) -> (usize, usize) {
        let (start, end) = self.bounds();
        if start >= end {
            (0, 0)
        } else {
            (start + 1, end)
        }
    }

    /// `"Showing 21 to 30 of 50 items"`.
    pub fn display_range(&self, item_type: &str) -> String {
        let (first, last) = self.item_range();
        format!(
            "Showing {first} to {last} of {} {item_type}",
            self.total_items
        )
    }

    /// Page buttons to render, with ellipses standing in for skipped runs.
    ///
    /// Up to 7 pages are all listed. Beyond that the first and last page are
    /// always present; near either edge six pages are listed next to it,
    /// elsewhere the current page and its two neighbours.
    pub fn page_window(&self) -> Vec<PageSlot> {
        let total = self.total_pages;
        let current = self.current_page.clamp(1, total.max(1));

        if total <= MAX_PLAIN_PAGES {
            return (1..=total).map(PageSlot::Page).collect();
        }

        let mut slots = Vec::with_capacity(EDGE_WINDOW as usize + 2);
        if current <= EDGE_WINDOW - 2 {
            slots.extend((1..=EDGE_WINDOW).map(PageSlot::Page));
            slots.push(PageSlot::Ellipsis);
            slots.push(PageSlot::Page(total));
        } else if current + EDGE_WINDOW - 3 >= total {
            slots.push(PageSlot::Page(1));
            slots.push(PageSlot::Ellipsis);
            slots.extend((total + 1 - EDGE_WINDOW..=total).map(PageSlot::Page));
        } else {
            slots.push(PageSlot::Page(1));
            slots.push(PageSlot::Ellipsis);
            slots.extend((current - 1..=current + 1).map(PageSlot::Page));
            slots.push(PageSlot::Ellipsis);
            slots.push(PageSlot::Page(total));
        }
        slots
    }
}

/// One entry of [`PaginationState::page_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

impl std::fmt::Display for PageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(n) => write!(f, "{n}"),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}
