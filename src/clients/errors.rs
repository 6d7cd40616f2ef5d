//! HTTP-specific error types for the JSON:API client.
//!
//! # Error Handling
//!
//! - [`AuthenticationError`]: no credential provider is configured
//! - [`ApiError`]: the server answered with a status of 300 or above
//! - [`ParseError`]: the body is not JSON or not a JSON:API document
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified error type encompassing all of the above plus
//!   transport failures surfaced by `reqwest`
//!
//! None of these are retried by the client.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_client::HttpError;
//!
//! match client.get("articles/1").await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Authentication(e)) => println!("Not configured: {e}"),
//!     Err(HttpError::Api(e)) => println!("API error {}: {}", e.status, e.message()),
//!     Err(HttpError::Parse(e)) => println!("Bad payload: {e}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Error returned when a request needs credentials but none are configured.
///
/// Raised lazily when a request is about to be sent, never when a client is
/// constructed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No [`TokenProvider`](crate::auth::TokenProvider) has been configured.
    #[error("No authentication provider configured. Call set_auth() or ClientConfigBuilder::auth() before making requests.")]
    MissingCredentials,
}

/// Error returned when the server responds with a status of 300 or above.
///
/// When the body carries a JSON:API `errors` array, the first entry's
/// `code`, `title` and `detail` are kept. Otherwise a top-level `error` or
/// `message` string is used, falling back to a status-based message.
///
/// # Example
///
/// ```rust
/// use jsonapi_client::clients::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::from_response(
///     422,
///     &json!({"errors": [{"code": "invalid", "title": "Invalid", "detail": "title is blank"}]}),
///     Some("req-1"),
/// );
/// assert_eq!(error.code.as_deref(), Some("invalid"));
/// assert_eq!(error.message(), "title is blank");
///
/// let error = ApiError::from_response(503, &json!({}), None);
/// assert_eq!(error.message(), "Request failed with status 503 (Service Unavailable)");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// Server-provided error code, if any.
    pub code: Option<String>,
    /// Server-provided short summary, if any.
    pub title: Option<String>,
    /// Server-provided explanation, if any.
    pub detail: Option<String>,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub request_id: Option<String>,
}

impl ApiError {
    /// Builds an error from a response status and its decoded body.
    #[must_use]
    pub fn from_response(status: u16, body: &Value, request_id: Option<&str>) -> Self {
        let mut error = Self {
            status,
            code: None,
            title: None,
            detail: None,
            request_id: request_id.map(ToString::to_string),
        };

        if let Some(first) = body
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
        {
            error.code = first.get("code").and_then(scalar_to_string);
            error.title = first.get("title").and_then(scalar_to_string);
            error.detail = first.get("detail").and_then(scalar_to_string);
        } else {
            error.detail = ["error", "message"]
                .iter()
                .find_map(|key| body.get(*key).and_then(scalar_to_string));
        }

        error
    }

    /// Returns the most specific message available.
    #[must_use]
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| {
                let reason = reqwest::StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown Status");
                format!("Request failed with status {} ({reason})", self.status)
            })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error (status {}): {}", self.status, self.message())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Error returned when a successful response cannot be interpreted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not valid JSON.
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The body has no top-level `data` member.
    #[error("Response body has no top-level 'data' member")]
    MissingData,

    /// A `data` entry is not a resource object.
    #[error("Invalid resource object: {reason}")]
    InvalidResourceObject {
        /// What was wrong with the object.
        reason: String,
    },

    /// A `links.next` value cannot be resolved to a URL.
    #[error("Invalid pagination link '{link}': {reason}")]
    InvalidLink {
        /// The link as the server sent it.
        link: String,
        /// Why it could not be resolved.
        reason: String,
    },
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path is empty after normalization.
    #[error("Request path cannot be empty.")]
    EmptyPath,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No credential provider configured.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// The server returned a status of 300 or above.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The response body could not be interpreted.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
