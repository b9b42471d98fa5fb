//! In-memory filter, sort and pagination over a fetched collection.

use std::cmp::Ordering;

use swapi_catalog_client::CatalogItem;

use crate::types::{SortField, SortOrder};

/// Items whose name contains `query`, case-insensitively, in input order.
///
/// An empty query matches everything; an item with an empty name matches
/// only the empty query.
pub fn filter_by_name<'a, T: CatalogItem>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let name = item.name();
            !name.is_empty() && name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stable sort on `field`; equal keys keep their relative order in both directions.
pub fn sort_by<'a, T: CatalogItem>(
    mut items: Vec<&'a T>,
    field: SortField,
    order: SortOrder,
) -> Vec<&'a T> {
    items.sort_by(|a, b| {
        let ordering = compare(*a, *b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    items
}

fn compare<T: CatalogItem>(a: &T, b: &T, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name().cmp(b.name()),
        // ISO 8601 timestamps in one format order lexicographically
        SortField::Created => a.created().cmp(b.created()),
    }
}

/// Items of 1-indexed `page`; the last page may be short, pages past the end are empty.
pub fn paginate<T>(items: &[T], page: u32, per_page: u32) -> &[T] {
    let per_page = per_page.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// `ceil(total_items / per_page)`, never less than 1.
pub fn calculate_total_pages(total_items: usize, per_page: u32) -> u32 {
    let per_page = per_page.max(1) as usize;
    let pages = total_items.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}
