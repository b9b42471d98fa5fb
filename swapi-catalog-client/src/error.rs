use serde::{Deserialize, Serialize};

/// Unified error type for all catalogue client operations.
///
/// The variants mirror the failure points of a single GET: the transport can
/// fail before a response arrives, the server can answer with a non-2xx
/// status, or the body can fail to decode. All variants are serializable for
/// structured error reporting.
///
/// # Retryable Errors
///
/// The retry fetcher treats every variant except [`Validation`](Self::Validation)
/// as transient and retries it with a fixed delay. `Validation` is raised
/// after a successful fetch, so there is nothing left to retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred before a response was received
    /// (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The server answered with a non-2xx status.
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The response body is not parseable as the expected JSON.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// The decoded body has an unexpected shape.
    ///
    /// Only raised when strict collection validation is enabled; the default
    /// client coerces a non-array collection payload to an empty result.
    Validation {
        /// Description of what's wrong.
        detail: String,
    },
}

impl ClientError {
    /// Whether the retry fetcher should try again after this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }

    /// 是否为预期行为（资源不存在、数据格式不符等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { status: 404, .. } | Self::Validation { .. }
        )
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::HttpStatus { status, .. } => write!(f, "HTTP error! status: {status}"),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::Validation { detail } => write!(f, "Invalid response from API: {detail}"),
        }
    }
}

impl std::error::Error for ClientError {}

pub type Result<T> = std::result::Result<T, ClientError>;
