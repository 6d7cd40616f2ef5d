//! Error types for client configuration.
//!
//! This module contains the error type returned while building or
//! adjusting a [`ClientConfig`](crate::ClientConfig).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Request-time failures live in
//! [`HttpError`](crate::HttpError) and [`ResourceError`](crate::ResourceError).
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::{ApiUrl, ConfigError};
//!
//! let result = ApiUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidApiUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL is not an absolute `http` or `https` URL.
    #[error("Invalid API URL '{url}'. Expected an absolute http(s) URL such as 'https://api.example.com/'.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The vendor name used in the `Accept` media type is invalid.
    #[error("Invalid vendor '{vendor}'. The vendor must be non-empty and contain no whitespace.")]
    InvalidVendor {
        /// The invalid vendor that was provided.
        vendor: String,
    },

    /// The named API environment is unknown.
    #[error("Unknown API environment '{name}'. Expected 'production' or 'test'.")]
    InvalidEnvironment {
        /// The unrecognized environment name.
        name: String,
    },

    /// A bearer token cannot be empty.
    #[error("Bearer token cannot be empty. Please provide a valid API token.")]
    EmptyToken,
}
