//! HTTP response types for the JSON:API client.

use std::collections::HashMap;

use serde_json::Value;

use crate::clients::errors::ParseError;

/// An HTTP response from the API.
///
/// The body has already gone through the first decoding phase: it is a
/// generic [`serde_json::Value`] (`Null` for an empty body). Classification
/// into resources happens in [`Document::from_body`](crate::Document::from_body).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is below 300.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 300
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `links.next` pagination link of the body, if any.
    ///
    /// A `null` or missing link means this is the last page.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        next_link(&self.body)
    }
}

/// Extracts `links.next` from a decoded JSON:API document.
pub(crate) fn next_link(body: &Value) -> Option<&str> {
    body.get("links")
        .and_then(|links| links.get("next"))
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
}

/// Resolves a server-provided link against the URL of the page it came from.
///
/// Absolute, root-relative and relative links are all handled as URI
/// references, so a root-relative link never repeats the base path.
pub(crate) fn resolve_link(base: &str, link: &str) -> Result<String, ParseError> {
    reqwest::Url::parse(base)
        .and_then(|base| base.join(link))
        .map(String::from)
        .map_err(|e| ParseError::InvalidLink {
            link: link.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_returns_true_below_300() {
        for code in (100..=103).chain(200..=299) {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_3xx_and_above() {
        for code in [300, 304, 400, 404, 422, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok());
        }
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["abc-123-xyz".to_string()]);

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("abc-123-xyz"));
    }

    #[test]
    fn test_next_link_extraction() {
        let response = HttpResponse::new(
            200,
            HashMap::new(),
            json!({"data": [], "links": {"next": "https://api.example.com/articles?page%5Bnumber%5D=2"}}),
        );
        assert_eq!(
            response.next_link(),
            Some("https://api.example.com/articles?page%5Bnumber%5D=2")
        );
    }

    #[test]
    fn test_resolve_link_as_uri_reference() {
        let page = "https://api.example.com/v1/articles?page%5Bnumber%5D=1";

        assert_eq!(
            resolve_link(page, "/v1/articles?page%5Bnumber%5D=2").unwrap(),
            "https://api.example.com/v1/articles?page%5Bnumber%5D=2"
        );
        assert_eq!(
            resolve_link(page, "?page%5Bnumber%5D=2").unwrap(),
            "https://api.example.com/v1/articles?page%5Bnumber%5D=2"
        );
        assert_eq!(
            resolve_link(page, "https://cdn.example.com/next").unwrap(),
            "https://cdn.example.com/next"
        );
        assert!(matches!(
            resolve_link("not a url", "articles"),
            Err(ParseError::InvalidLink { .. })
        ));
    }

    #[test]
    fn test_null_or_missing_next_link() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"data": [], "links": {"next": null}}));
        assert!(response.next_link().is_none());

        let response = HttpResponse::new(200, HashMap::new(), json!({"data": []}));
        assert!(response.next_link().is_none());
    }
}
