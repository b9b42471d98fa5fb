//! Star Wars catalogue core library
//!
//! View-state logic for catalogue screens, independent of any UI:
//! - Collection view-state ([`CollectionService`]): one full collection held
//!   in memory, with debounced name search, sorting and client-side paging
//! - Detail view-state ([`DetailService`]): one item fetched by id
//!
//! Both talk to the network only through
//! [`ResourceClient`](swapi_catalog_client::ResourceClient), injected as an
//! `Arc<dyn ResourceClient>`, so front-ends and tests can supply their own.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use swapi_catalog_client::{ClientConfig, Person, SwapiClient};
//! use swapi_catalog_core::CollectionService;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(SwapiClient::new(ClientConfig::from_env())?);
//! let people: CollectionService<Person> = CollectionService::new(client);
//!
//! people.fetch_all(1).await;
//! people.search("sky");
//! people.wait_for_search().await;
//!
//! for person in people.visible().await {
//!     println!("{}", person.name);
//! }
//! println!("{}", people.display_range().await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::CatalogConfig;
pub use error::{CoreError, CoreResult};
pub use services::{CatalogResource, CollectionService, DetailService};
pub use types::{
    CollectionSnapshot, CollectionStatus, DetailSnapshot, LoadingState, PageSlot,
    PaginationState, SearchState, SortField, SortOrder,
};
