/*
[INPUT]:  Error sources (HTTP status + body, transport, serialization, config)
[OUTPUT]: Structured error taxonomy with retry and auth classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When the backend adds status codes or new error sources appear
*/

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use thiserror::Error;

pub(crate) const AUTHENTICATION_MESSAGE: &str = "Authentication failed. Please check your API key.";
pub(crate) const AUTHORIZATION_MESSAGE: &str =
    "Access denied. You don't have permission to access this resource.";
pub(crate) const NOT_FOUND_MESSAGE: &str = "The requested resource was not found.";
pub(crate) const VALIDATION_MESSAGE: &str = "Bad request. Please check your request data.";
pub(crate) const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub(crate) const SERVER_MESSAGE: &str = "Internal server error occurred.";

/// Main error type for the Carespace SDK
#[derive(Error, Debug)]
pub enum CarespaceError {
    /// HTTP 401
    #[error("{message}")]
    Authentication { message: String },

    /// HTTP 403
    #[error("{message}")]
    Authorization { message: String },

    /// HTTP 404
    #[error("{message}")]
    NotFound { message: String },

    /// HTTP 400 or 422, with the server's field errors when it sent any
    #[error("{message}")]
    Validation {
        status: StatusCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// HTTP 429
    #[error("{message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
    },

    /// Any 5xx response
    #[error("{message} (HTTP {status})")]
    Server { status: StatusCode, message: String },

    /// Any other non-success response
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Connection-level failure before a response arrived
    #[error("Network error occurred: {0}")]
    Network(#[source] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required argument was missing or blank; no request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered 2xx but the envelope reported `success: false`
    #[error("{message}")]
    Unsuccessful { message: String },
}

impl From<reqwest::Error> for CarespaceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CarespaceError::Timeout(err)
        } else if err.is_builder() {
            CarespaceError::Config(err.to_string())
        } else {
            CarespaceError::Network(err)
        }
    }
}

impl CarespaceError {
    /// Map a non-success response onto the error taxonomy.
    ///
    /// A JSON body carrying a `message` or `error` string replaces the
    /// default message for the status.
    pub fn from_response(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let server_message = parsed.as_ref().and_then(extract_message);
        let message = |default: &str| server_message.clone().unwrap_or_else(|| default.to_string());

        match status {
            StatusCode::UNAUTHORIZED => CarespaceError::Authentication {
                message: message(AUTHENTICATION_MESSAGE),
            },
            StatusCode::FORBIDDEN => CarespaceError::Authorization {
                message: message(AUTHORIZATION_MESSAGE),
            },
            StatusCode::NOT_FOUND => CarespaceError::NotFound {
                message: message(NOT_FOUND_MESSAGE),
            },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                CarespaceError::Validation {
                    status,
                    message: message(VALIDATION_MESSAGE),
                    details: parsed
                        .as_ref()
                        .and_then(|value| value.get("errors").or_else(|| value.get("details")))
                        .cloned(),
                }
            }
            StatusCode::TOO_MANY_REQUESTS => CarespaceError::RateLimit {
                message: message(RATE_LIMIT_MESSAGE),
                retry_after: parse_retry_after(headers, Utc::now()),
            },
            s if s.is_server_error() => CarespaceError::Server {
                status: s,
                message: message(SERVER_MESSAGE),
            },
            s => CarespaceError::Api {
                status: s,
                message: message(&format!("HTTP request failed with status {}", s.as_u16())),
            },
        }
    }

    /// HTTP status behind the error, if a response was received
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            CarespaceError::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            CarespaceError::Authorization { .. } => Some(StatusCode::FORBIDDEN),
            CarespaceError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            CarespaceError::Validation { status, .. } => Some(*status),
            CarespaceError::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            CarespaceError::Server { status, .. } | CarespaceError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Stable machine-readable code for the error category
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            CarespaceError::Authentication { .. } => Some("AUTHENTICATION_FAILED"),
            CarespaceError::Authorization { .. } => Some("AUTHORIZATION_FAILED"),
            CarespaceError::NotFound { .. } => Some("RESOURCE_NOT_FOUND"),
            CarespaceError::Validation { .. } => Some("VALIDATION_FAILED"),
            CarespaceError::RateLimit { .. } => Some("RATE_LIMIT_EXCEEDED"),
            CarespaceError::Server { .. } => Some("SERVER_ERROR"),
            CarespaceError::Network(_) => Some("NETWORK_ERROR"),
            CarespaceError::Timeout(_) => Some("TIMEOUT_ERROR"),
            _ => None,
        }
    }

    /// Check if the error is transient and the request may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CarespaceError::Network(_) | CarespaceError::Timeout(_) | CarespaceError::Server { .. }
        )
    }

    /// Server-provided wait time for rate-limited requests
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            CarespaceError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Check if error indicates missing or insufficient credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CarespaceError::Authentication { .. } | CarespaceError::Authorization { .. }
        )
    }
}

fn extract_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(|value| value.as_str()))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// `Retry-After` as delta-seconds or an HTTP date relative to `now`.
fn parse_retry_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let raw = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = raw.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let at = DateTime::parse_from_rfc2822(raw).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Result type alias for Carespace operations
pub type Result<T> = std::result::Result<T, CarespaceError>;
