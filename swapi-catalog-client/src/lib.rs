//! # swapi-catalog-client
//!
//! A retrying HTTP client for the read-only Star Wars catalogue API.
//!
//! The API serves each resource (people, planets) as one flat JSON array and
//! supports neither server-side search nor paging. This crate fetches those
//! arrays, normalizes them into a conventional paginated envelope and looks
//! up single items by id. Search, sort and paging happen in memory, in
//! `swapi-catalog-core`.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swapi_catalog_client::{ClientConfig, ResourceClient, SwapiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SwapiClient::new(ClientConfig::from_env())?;
//!
//!     let people = client.get_people().await?;
//!     println!("{} characters", people.count);
//!
//!     let luke = client.get_person_by_id("1").await?;
//!     println!("{} was born {}", luke.name, luke.birth_year);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError):
//!
//! - [`ClientError::NetworkError`] / [`ClientError::Timeout`]: no response received
//! - [`ClientError::HttpStatus`]: non-2xx response (e.g. 404 for an unknown id)
//! - [`ClientError::ParseError`]: body is not the expected JSON
//! - [`ClientError::Validation`]: unexpected payload shape (strict mode only)
//!
//! Every attempt failure except `Validation` is retried with a fixed delay
//! (default: 3 retries, 1s apart) before the last error is returned.

mod client;
mod config;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::SwapiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS};
pub use error::{ClientError, Result};
pub use http_client::{HttpTransport, HttpUtils, RawResponse, ReqwestTransport, RetryPolicy};
pub use traits::ResourceClient;
pub use types::{
    ApiResponse, CatalogItem, Person, Planet, ResourceKind, extract_id_from_url,
};

// Re-export utils module
pub use utils::datetime;

/// Header types used by [`HttpTransport`] and [`SwapiClient::with_headers`].
pub use reqwest::header;
