//! 类型定义模块

mod pagination;
mod state;

pub use pagination::{ITEMS_PER_PAGE, PageSlot, PaginationState};
pub use state::{
    CollectionSnapshot, CollectionStatus, DetailSnapshot, LoadingState, SearchState, SortField,
    SortOrder,
};

// Re-export item types from the client crate
pub use swapi_catalog_client::{ApiResponse, CatalogItem, Person, Planet, ResourceKind};
