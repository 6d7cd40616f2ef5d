//! REST client implementation for the JSON:API service.
//!
//! This module provides the [`RestClient`] type, the transport adapter the
//! query builder and resource graph talk to.

use serde_json::Value;

use crate::clients::errors::{HttpError, InvalidHttpRequestError, ParseError};
use crate::clients::http_response::{next_link, resolve_link};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::ClientConfig;

/// REST client for a JSON:API service.
///
/// Provides `get`, `post`, `patch`, `delete` and `get_recursive`. Each
/// non-recursive call issues exactly one HTTP request; `get_recursive`
/// issues one request per page, strictly in sequence.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use jsonapi_client::{ClientConfig, RestClient, StaticToken};
///
/// let config = ClientConfig::builder()
///     .auth(StaticToken::new("token").unwrap())
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let response = client.get("articles/1").await?;
/// let every_article = client.get_recursive("articles").await?;
/// ```
#[derive(Clone, Debug)]
pub struct RestClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.http_client.config()
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for authentication, transport, API or parse failures.
    pub async fn get(&self, path: &str) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Get, path, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for authentication, transport, API or parse failures.
    pub async fn post(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Post, path, Some(body)).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for authentication, transport, API or parse failures.
    pub async fn patch(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Patch, path, Some(body)).await
    }

    /// Sends a DELETE request, optionally with a JSON body.
    ///
    /// Relationship removals carry their linkage data as the body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] for authentication, transport, API or parse failures.
    pub async fn delete(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        self.make_request(HttpMethod::Delete, path, body).await
    }

    /// Fetches every page of a collection, following `links.next`.
    ///
    /// The `data` arrays of all pages are concatenated in the order the
    /// server delivered them. A page whose `data` is a single object
    /// contributes that object. Traversal stops when `links.next` is missing
    /// or `null`; there is no page cap, so a server that never stops
    /// advertising a next link is followed indefinitely.
    ///
    /// Each next link is resolved as a URI reference against the URL of the
    /// page that carried it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingData`] (wrapped) if a page has no `data`
    /// member, [`ParseError::InvalidLink`] if a next link cannot be
    /// resolved, or the first error raised by any page request.
    pub async fn get_recursive(&self, path: &str) -> Result<Vec<Value>, HttpError> {
        let mut merged = Vec::new();
        let mut next = Some(self.page_url(path)?);
        let mut pages: usize = 0;

        while let Some(current) = next.take() {
            let mut body = self.get(&current).await?.body;
            pages += 1;

            next = next_link(&body)
                .map(|link| resolve_link(&current, link))
                .transpose()?;
            match body.get_mut("data").map(Value::take) {
                Some(Value::Array(items)) => merged.extend(items),
                Some(Value::Null) => {}
                Some(item) => merged.push(item),
                None => return Err(ParseError::MissingData.into()),
            }
        }

        tracing::debug!(pages, items = merged.len(), "Collected paginated results");
        Ok(merged)
    }

    /// Returns the absolute URL a request path resolves to.
    fn page_url(&self, path: &str) -> Result<String, InvalidHttpRequestError> {
        let path = normalize_path(path)?;
        if is_absolute(&path) {
            Ok(path)
        } else {
            Ok(self.config().api_url().join(&path))
        }
    }

    /// Internal helper to build and send requests.
    async fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<HttpResponse, HttpError> {
        let normalized_path = normalize_path(path)?;

        let request = HttpRequest::builder(method, normalized_path)
            .maybe_body(body)
            .build()?;

        self.http_client.request(request).await
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Normalizes a request path.
///
/// Leading slashes are stripped from relative paths so they join cleanly
/// onto the slash-terminated API URL. Absolute `http(s)` URLs are kept as-is.
fn normalize_path(path: &str) -> Result<String, InvalidHttpRequestError> {
    if is_absolute(path) {
        return Ok(path.to_string());
    }

    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Err(InvalidHttpRequestError::EmptyPath);
    }

    Ok(path.to_string())
}
