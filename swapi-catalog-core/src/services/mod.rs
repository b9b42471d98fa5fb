//! 业务逻辑服务层
//!
//! View-states over the catalogue client: [`CollectionService`] for list
//! screens and [`DetailService`] for single-item screens. Both are generic
//! over the item type through [`CatalogResource`].

mod collection_service;
mod detail_service;

pub use collection_service::CollectionService;
pub use detail_service::DetailService;

use futures::future::BoxFuture;
use swapi_catalog_client::{ApiResponse, CatalogItem, ClientError, Person, Planet, ResourceClient};

type ClientResult<T> = swapi_catalog_client::Result<T>;

/// An item type the view-states know how to fetch.
///
/// Routes a view-state to the matching [`ResourceClient`] methods.
pub trait CatalogResource: CatalogItem + Clone + Send + Sync + 'static {
    /// The full collection of this kind.
    fn fetch_collection(client: &dyn ResourceClient) -> BoxFuture<'_, ClientResult<ApiResponse<Self>>>;

    /// One item by id.
    fn fetch_by_id<'a>(client: &'a dyn ResourceClient, id: &'a str) -> BoxFuture<'a, ClientResult<Self>>;
}

impl CatalogResource for Person {
    fn fetch_collection(client: &dyn ResourceClient) -> BoxFuture<'_, ClientResult<ApiResponse<Self>>> {
        client.get_people()
    }

    fn fetch_by_id<'a>(client: &'a dyn ResourceClient, id: &'a str) -> BoxFuture<'a, ClientResult<Self>> {
        client.get_person_by_id(id)
    }
}

impl CatalogResource for Planet {
    fn fetch_collection(client: &dyn ResourceClient) -> BoxFuture<'_, ClientResult<ApiResponse<Self>>> {
        client.get_planets()
    }

    fn fetch_by_id<'a>(client: &'a dyn ResourceClient, id: &'a str) -> BoxFuture<'a, ClientResult<Self>> {
        client.get_planet_by_id(id)
    }
}

/// Message stored in a view-state after a failed fetch.
///
/// Errors without any detail fall back to `fallback`.
fn failure_message(err: &ClientError, fallback: impl FnOnce() -> String) -> String {
    match err {
        ClientError::NetworkError { detail }
        | ClientError::Timeout { detail }
        | ClientError::ParseError { detail }
        | ClientError::Validation { detail }
            if detail.trim().is_empty() =>
        {
            fallback()
        }
        _ => err.to_string(),
    }
}

/// Log a fetch failure at `warn` when expected, `error` otherwise.
fn log_failure(context: &str, err: &ClientError) {
    if err.is_expected() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("{context}: {err}");
    }
}
