//! HTTP client for JSON:API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests against the configured API URL.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::{ApiError, HttpError, ParseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name sent in the `User-Agent` header.
pub const SDK_NAME: &str = env!("CARGO_PKG_NAME");

/// HTTP client for making requests to the API.
///
/// The client handles:
/// - URL construction from the configured [`ApiUrl`](crate::ApiUrl)
/// - The fixed `Accept`, `Content-Type` and `User-Agent` headers
/// - The `Authorization: Bearer` header, resolved per request
/// - Classification of non-2xx responses into [`ApiError`]
///
/// Every call performs exactly one HTTP exchange; nothing is retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use jsonapi_client::{ClientConfig, StaticToken};
/// use jsonapi_client::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let config = ClientConfig::builder()
///     .auth(StaticToken::new("token").unwrap())
///     .build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "articles/1").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Snapshot of the configuration this client was built from.
    config: ClientConfig,
    /// Headers included in all requests, apart from `Authorization`.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// Credentials are not looked up here; a missing provider is reported
    /// by [`request`](Self::request).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}{SDK_NAME}/{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), config.vendor().accept_header());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        // Redirects surface as `ApiError`s instead of being followed.
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
            default_headers,
        })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request path resolves to.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        if request.is_absolute() {
            request.path.clone()
        } else {
            self.config.api_url().join(&request.path)
        }
    }

    /// Sends an HTTP request to the API.
    ///
    /// Emits a debug event before sending (with the URL) and one after the
    /// response arrives (with the status code).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No credential provider is configured (`Authentication`); no
    ///   request is sent in that case
    /// - A network error occurs (`Network`)
    /// - The status is 300 or above (`Api`)
    /// - A successful body is not valid JSON (`Parse`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let token = self.config.auth()?.token();
        let url = self.url_for(&request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.bearer_auth(token);

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, url = %url, "Sending API request");
        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        tracing::debug!(url = %url, status_code = code, "Received API response");

        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        let decoded = Self::decode_body(&body_text);

        let response = HttpResponse::new(code, res_headers, Value::Null);
        if !response.is_ok() {
            let error_body = decoded.unwrap_or(Value::Null);
            return Err(ApiError::from_response(code, &error_body, response.request_id()).into());
        }

        let body = decoded.map_err(ParseError::from)?;
        Ok(HttpResponse { body, ..response })
    }

    /// Decodes a response body into a generic JSON value.
    ///
    /// An empty body decodes to `Null`.
    fn decode_body(text: &str) -> Result<Value, serde_json::Error> {
        if text.trim().is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_str(text)
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;
    use crate::config::{ApiUrl, Vendor};

    fn create_test_config() -> ClientConfig {
        ClientConfig::builder()
            .api_url(ApiUrl::new("https://api.example.com/v1").unwrap())
            .vendor(Vendor::new("acme").unwrap())
            .auth(StaticToken::new("test-token").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert_eq!(user_agent, &format!("{SDK_NAME}/{SDK_VERSION}"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.ends_with(SDK_VERSION));
    }

    #[test]
    fn test_media_type_headers() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/vnd.acme.v1+json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_url_for_relative_and_absolute_paths() {
        let client = HttpClient::new(&create_test_config()).unwrap();

        let relative = HttpRequest::builder(HttpMethod::Get, "/articles/1")
            .build()
            .unwrap();
        assert_eq!(client.url_for(&relative), "https://api.example.com/v1/articles/1");

        let absolute = HttpRequest::builder(HttpMethod::Get, "https://cdn.example.com/next?page=2")
            .build()
            .unwrap();
        assert_eq!(client.url_for(&absolute), "https://cdn.example.com/next?page=2");
    }

    #[test]
    fn test_decode_body_empty_is_null() {
        assert_eq!(HttpClient::decode_body("").unwrap(), Value::Null);
        assert_eq!(HttpClient::decode_body("  \n").unwrap(), Value::Null);
        assert!(HttpClient::decode_body("<html>").is_err());
    }

    #[tokio::test]
    async fn test_missing_auth_fails_before_sending() {
        let config = ClientConfig::builder()
            .api_url(ApiUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "articles").build().unwrap();

        let result = client.request(request).await;
        assert!(matches!(result, Err(HttpError::Authentication(_))));
    }

    // ========================================================================
    // Tracing
    // ========================================================================

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_exchange_emits_request_and_response_events() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        let config = ClientConfig::builder()
            .api_url(ApiUrl::new(server.uri()).unwrap())
            .auth(StaticToken::new("test-token").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let request = HttpRequest::builder(HttpMethod::Get, "articles").build().unwrap();
        client.request(request).await.unwrap();

        let url = format!("url={}/articles", server.uri());
        logs_assert(|lines: &[&str]| {
            let sent: Vec<_> = lines
                .iter()
                .filter(|line| line.contains("Sending API request"))
                .collect();
            let received: Vec<_> = lines
                .iter()
                .filter(|line| line.contains("Received API response"))
                .collect();

            if sent.len() != 1 || received.len() != 1 {
                return Err(format!("expected one event each, got {sent:?} / {received:?}"));
            }
            if !sent[0].contains("DEBUG") || !sent[0].contains(&url) {
                return Err(format!("request event missing url: {}", sent[0]));
            }
            if !received[0].contains("DEBUG") || !received[0].contains("status_code=200") {
                return Err(format!("response event missing status: {}", received[0]));
            }
            Ok(())
        });
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
