//! Retrying HTTP fetcher
//!
//! Every catalogue request is a JSON GET. This module owns the one request
//! path they all share: header merging, sending, status checking, body
//! decoding and the bounded retry loop around all of it.
//!
//! # Retry strategy
//! - Any failure of an attempt (transport error, non-2xx status, undecodable
//!   body) is retried.
//! - Fixed delay between attempts (default 1s), no backoff.
//! - Total attempts = `1 + max_retries`; the last error is returned unchanged.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The network seam under the retry fetcher.
///
/// Implementations perform exactly one GET per call and report transport
/// failures as [`ClientError::NetworkError`] / [`ClientError::Timeout`].
/// Status handling and decoding stay in [`HttpUtils`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<RawResponse>;
}

/// [`HttpTransport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the timeouts from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::NetworkError {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout {
                        detail: e.to_string(),
                    }
                } else {
                    ClientError::NetworkError {
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        log::debug!("Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        Ok(RawResponse { status, body })
    }
}

/// Bounded fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before each retry.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.retry_delay(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Total number of attempts the policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Headers sent with every request: `Content-Type: application/json`,
    /// then each caller header, replacing a base header of the same name.
    pub fn merge_headers(extra: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in extra {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ClientError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw response: {}", truncate_for_log(response_text));
            ClientError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// Perform one GET and decode the body, without retrying.
    pub async fn fetch_json_once<T>(
        transport: &dyn HttpTransport,
        url: &str,
        headers: &HeaderMap,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        log::debug!("GET {url}");

        let response = transport.get(url, headers).await?;
        if !response.is_success() {
            log::debug!(
                "Response Body ({}): {}",
                response.status,
                truncate_for_log(&response.body)
            );
            return Err(ClientError::HttpStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        log::debug!("Response Body: {}", truncate_for_log(&response.body));
        Self::parse_json(&response.body)
    }

    /// GET `url` and decode the JSON body, retrying per `policy`.
    ///
    /// `extra_headers` are merged over the JSON content type, see
    /// [`merge_headers`](Self::merge_headers).
    pub async fn fetch_json<T>(
        transport: &dyn HttpTransport,
        url: &str,
        extra_headers: &HeaderMap,
        policy: &RetryPolicy,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let headers = Self::merge_headers(extra_headers);
        let headers = &headers;
        Self::with_retry(policy, url, move || {
            Self::fetch_json_once(transport, url, headers)
        })
        .await
    }

    /// Run `op` until it succeeds or the policy is exhausted.
    ///
    /// Waits `policy.delay` before each retry. Errors that are not
    /// [retryable](ClientError::is_retryable) are returned immediately; the
    /// error of the final attempt is returned as-is.
    pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < policy.max_retries && e.is_retryable() => {
                    attempt += 1;
                    log::warn!(
                        "{} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        label,
                        attempt,
                        policy.max_attempts(),
                        policy.delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(policy.delay).await;
                }
                Err(e) => {
                    if attempt > 0 {
                        log::warn!("{label} giving up after {} attempts: {e}", attempt + 1);
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{ACCEPT, HeaderName};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn http_error(status: u16) -> ClientError {
        ClientError::HttpStatus {
            status,
            url: "https://test.com/api".to_string(),
        }
    }

    // ---- merge_headers ----

    #[test]
    fn merge_headers_sets_json_content_type() {
        let headers = HttpUtils::merge_headers(&HeaderMap::new());
        assert_eq!(headers.get(CONTENT_TYPE).map(|v| v.as_bytes()), Some(&b"application/json"[..]));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn merge_headers_caller_overrides_base() {
        let mut extra = HeaderMap::new();
        extra.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        extra.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let headers = HttpUtils::merge_headers(&extra);
        assert_eq!(headers.get(CONTENT_TYPE).map(|v| v.as_bytes()), Some(&b"text/plain"[..]));
        assert!(headers.contains_key(ACCEPT));
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[test]
    fn merge_headers_keeps_custom_names() {
        let mut extra = HeaderMap::new();
        extra.insert(
            HeaderName::from_static("x-trace-id"),
            HeaderValue::from_static("abc"),
        );
        let headers = HttpUtils::merge_headers(&extra);
        assert_eq!(headers.len(), 2);
    }

    // ---- with_retry ----

    #[tokio::test(start_paused = true)]
    async fn retry_exhausts_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        let result: Result<()> = HttpUtils::with_retry(&policy, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(http_error(500)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(result, Err(http_error(500)));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds_on_second_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result = HttpUtils::with_retry(&policy, "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(ClientError::NetworkError {
                        detail: "Network error".to_string(),
                    })
                } else {
                    Ok("payload")
                }
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(result, Ok("payload"));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_returns_last_error_unchanged() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(2, Duration::from_millis(10));

        let result: Result<()> = HttpUtils::with_retry(&policy, "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(http_error(503))
                } else {
                    Err(ClientError::NetworkError {
                        detail: "connection reset".to_string(),
                    })
                }
            }
        })
        .await;

        assert_eq!(
            result,
            Err(ClientError::NetworkError {
                detail: "connection reset".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retry_waits_fixed_delay_between_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));
        let start = tokio::time::Instant::now();

        let _: Result<()> =
            HttpUtils::with_retry(&policy, "test", || async { Err(http_error(500)) }).await;

        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(0, Duration::from_millis(1000));

        let result: Result<()> = HttpUtils::with_retry(&policy, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(http_error(500)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn validation_error_not_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();

        let result: Result<()> = HttpUtils::with_retry(&policy, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(ClientError::Validation {
                    detail: "bad shape".to_string(),
                })
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::Validation { .. })));
    }

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Item {
            name: String,
        }
        let result: Result<Vec<Item>> = HttpUtils::parse_json(r#"[{"name":"Luke Skywalker"}]"#);
        assert!(
            matches!(&result, Ok(items) if items.len() == 1 && items[0].name == "Luke Skywalker"),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        let result: Result<serde_json::Value> = HttpUtils::parse_json("not json");
        assert!(
            matches!(&result, Err(ClientError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }

    // ---- RawResponse / RetryPolicy ----

    #[test]
    fn success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(304, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
    }

    #[test]
    fn policy_from_config() {
        let config = ClientConfig::default().with_max_retries(5);
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts(), 6);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }
}
