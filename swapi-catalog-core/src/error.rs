//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export client error type
pub use swapi_catalog_client::ClientError;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Navigation target outside `[1, total_pages]`
    #[error("Page {page} is out of range (1..={total_pages})")]
    InvalidPage { page: u32, total_pages: u32 },

    /// Client error (converted from the client crate)
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl CoreError {
    /// Whether it is expected behavior (bad user input, unknown id), used for log classification.
    ///
    /// `warn` when `true`, `error` when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidPage { .. } => true,
            Self::Client(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
