//! HTTP client types for JSON:API communication.
//!
//! This module provides the transport layer: building requests, sending
//! them with the fixed header set, and turning non-2xx responses into typed
//! errors.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async HTTP client bound to a [`ClientConfig`](crate::ClientConfig)
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a response with its body decoded to JSON
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`rest::RestClient`]: the per-verb transport adapter with pagination
//! - [`HttpError`]: the unified error type
//!
//! # Headers
//!
//! Every request carries:
//!
//! - `Authorization: Bearer <token>`
//! - `Accept: application/vnd.<vendor>.v1+json`
//! - `Content-Type: application/json`
//! - `User-Agent: <library-name>/<version>`
//!
//! # Retry Behavior
//!
//! None. Every error is returned to the caller of the failing operation.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{
    ApiError, AuthenticationError, HttpError, InvalidHttpRequestError, ParseError,
};
pub use http_client::{HttpClient, SDK_NAME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub(crate) use http_response::{next_link, resolve_link};

pub use rest::RestClient;
