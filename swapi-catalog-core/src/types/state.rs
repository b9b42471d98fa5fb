//! View-state value types

use serde::{Deserialize, Serialize};

use super::pagination::PaginationState;

/// Loading flag and last error of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingState {
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Sortable field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Created,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "created" => Ok(Self::Created),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Search and sort criteria of a collection view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub query: String,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

/// Lifecycle of a collection view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    /// Nothing fetched yet.
    Empty,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; earlier items, if any, are kept.
    Failed,
}

/// Everything a list view renders, read under one lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSnapshot<T> {
    /// Items on the current page, filtered and sorted.
    pub visible: Vec<T>,
    pub loading: LoadingState,
    pub search: SearchState,
    pub pagination: PaginationState,
    pub status: CollectionStatus,
}

/// Everything a detail view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSnapshot<T> {
    pub item: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DetailSnapshot<T> {
    fn default() -> Self {
        Self {
            item: None,
            is_loading: false,
            error: None,
        }
    }
}
