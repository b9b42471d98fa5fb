//! Catalogue resource client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http_client::{HttpTransport, HttpUtils, ReqwestTransport, RetryPolicy};
use crate::traits::ResourceClient;
use crate::types::{ApiResponse, CatalogItem, Person, Planet, ResourceKind};

/// [`ResourceClient`] for the catalogue HTTP API.
///
/// Holds no cache: every call goes through the retry fetcher.
pub struct SwapiClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    policy: RetryPolicy,
    headers: HeaderMap,
}

impl SwapiClient {
    /// Create a client over reqwest using `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let policy = RetryPolicy::from(&config);
        Self {
            transport,
            config,
            policy,
            headers: HeaderMap::new(),
        }
    }

    /// Extra headers sent with every request, merged over the JSON content type.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base}/people`
    pub fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}{}", self.config.base_url, kind.path())
    }

    /// `{base}/people/{id}/`
    pub fn item_url(&self, kind: ResourceKind, id: &str) -> String {
        format!("{}{}/{}/", self.config.base_url, kind.path(), id.trim_matches('/'))
    }

    /// Fetch a whole collection and wrap it in an envelope.
    pub async fn get_collection<T>(&self) -> Result<ApiResponse<T>>
    where
        T: CatalogItem + DeserializeOwned,
    {
        let url = self.collection_url(T::KIND);
        log::debug!("Fetching {} from: {url}", T::KIND);

        // Element decoding happens inside the retry loop so a malformed body
        // is retried like any other decode failure.
        let headers = HttpUtils::merge_headers(&self.headers);
        let (transport, url_ref, headers_ref) = (self.transport.as_ref(), url.as_str(), &headers);
        let results = HttpUtils::with_retry(&self.policy, &url, move || async move {
            let body: Value = HttpUtils::fetch_json_once(transport, url_ref, headers_ref).await?;
            self.normalize_collection::<T>(body)
        })
        .await?;
        log::debug!("{} API response: {} items", T::KIND, results.len());

        Ok(ApiResponse::complete(results))
    }

    /// Fetch a single item by identifier.
    pub async fn get_by_id<T>(&self, id: &str) -> Result<T>
    where
        T: CatalogItem + DeserializeOwned,
    {
        let url = self.item_url(T::KIND, id);
        HttpUtils::fetch_json(self.transport.as_ref(), &url, &self.headers, &self.policy).await
    }

    /// Turn a decoded collection body into items.
    ///
    /// A non-array body is an empty collection unless strict validation is
    /// enabled, in which case it is a [`ClientError::Validation`].
    fn normalize_collection<T>(&self, body: Value) -> Result<Vec<T>>
    where
        T: CatalogItem + DeserializeOwned,
    {
        match body {
            Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).map_err(|e| ClientError::ParseError {
                        detail: format!("invalid {} item: {e}", T::KIND.singular()),
                    })
                })
                .collect(),
            other if self.config.strict_collections => Err(ClientError::Validation {
                detail: format!("expected a JSON array of {}, got {}", T::KIND, json_kind(&other)),
            }),
            other => {
                log::warn!(
                    "{} response is {}, not an array; treating as empty",
                    T::KIND,
                    json_kind(&other)
                );
                Ok(Vec::new())
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ResourceClient for SwapiClient {
    async fn get_people(&self) -> Result<ApiResponse<Person>> {
        self.get_collection().await
    }

    async fn get_planets(&self) -> Result<ApiResponse<Planet>> {
        self.get_collection().await
    }

    async fn get_person_by_id(&self, id: &str) -> Result<Person> {
        self.get_by_id(id).await
    }

    async fn get_planet_by_id(&self, id: &str) -> Result<Planet> {
        self.get_by_id(id).await
    }
}
