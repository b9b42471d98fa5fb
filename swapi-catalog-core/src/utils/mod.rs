//! 工具函数模块

pub mod debounce;
pub mod query;

// Date formatting lives with the item types in the client crate
pub use swapi_catalog_client::datetime;
pub use swapi_catalog_client::extract_id_from_url;
