//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default upstream API root.
pub const DEFAULT_BASE_URL: &str = "https://swapi.info/api";
/// Retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Fixed delay between attempts（毫秒）
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`SwapiClient`](crate::SwapiClient).
///
/// Every field has a default, so a partial TOML/JSON document or an empty
/// environment yields a usable client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// API root without trailing slash (e.g. `https://swapi.info/api`).
    pub base_url: String,
    /// Retries after the first attempt; total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub retry_delay_ms: u64,
    /// TCP connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Reject non-array collection payloads instead of treating them as empty.
    pub strict_collections: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            strict_collections: false,
        }
    }
}

impl ClientConfig {
    /// Build a config from `SWAPI_*` environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// | variable | field |
    /// |----------|-------|
    /// | `SWAPI_BASE_URL` | `base_url` |
    /// | `SWAPI_MAX_RETRIES` | `max_retries` |
    /// | `SWAPI_RETRY_DELAY_MS` | `retry_delay_ms` |
    /// | `SWAPI_STRICT_COLLECTIONS` | `strict_collections` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SWAPI_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(v) = parse_var(&lookup, "SWAPI_MAX_RETRIES") {
            config.max_retries = v;
        }
        if let Some(v) = parse_var(&lookup, "SWAPI_RETRY_DELAY_MS") {
            config.retry_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "SWAPI_STRICT_COLLECTIONS") {
            config.strict_collections = v;
        }

        config
    }

    /// Replace the base URL, trimming any trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_strict_collections(mut self, strict: bool) -> Self {
        self.strict_collections = strict;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring invalid value for {key}: {raw:?}");
            None
        }
    }
}
