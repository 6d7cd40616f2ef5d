//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated base URL for the API.
///
/// The URL must be absolute with an `http` or `https` scheme and a host.
/// It is always normalized to end with exactly one trailing slash so that
/// relative resource paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use jsonapi_client::ApiUrl;
///
/// let url = ApiUrl::new("https://api.example.com/v1").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com/v1/");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
///
/// let url = ApiUrl::new("http://localhost:8080///").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8080/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// Creates a new validated, slash-terminated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();
        let invalid = || ConfigError::InvalidApiUrl {
            url: trimmed.to_string(),
        };

        let scheme_end = trimmed.find("://").ok_or_else(invalid)?;
        let scheme = &trimmed[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &trimmed[host_start..];
        let host_len = remainder
            .find([':', '/', '?', '#'])
            .unwrap_or(remainder.len());
        if host_len == 0 || remainder.contains(char::is_whitespace) {
            return Err(invalid());
        }
        if remainder.contains(['?', '#']) {
            return Err(invalid());
        }

        let url = format!("{}/", trimmed.trim_end_matches('/'));

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end: host_start + host_len,
        })
    }

    /// Builds an `ApiUrl` from a compile-time constant known to be valid.
    pub(crate) fn from_static(url: &'static str) -> Self {
        let scheme_end = url.find("://").unwrap_or(0);
        let host_start = scheme_end + 3;
        let host_end = url[host_start..]
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        Self {
            url: url.to_string(),
            scheme_end,
            host_start,
            host_end,
        }
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins a relative path onto this base URL.
    ///
    /// Leading slashes of `path` are dropped so the result never contains a
    /// double slash at the seam.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The vendor segment of the JSON:API media type.
///
/// Requests are sent with `Accept: application/vnd.<vendor>.v1+json`.
///
/// # Example
///
/// ```rust
/// use jsonapi_client::Vendor;
///
/// let vendor = Vendor::new("acme").unwrap();
/// assert_eq!(vendor.accept_header(), "application/vnd.acme.v1+json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vendor(String);

impl Vendor {
    /// Vendor used when none is configured.
    pub const DEFAULT: &'static str = "api";

    /// Creates a new validated vendor name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVendor`] if the vendor is empty or
    /// contains whitespace.
    pub fn new(vendor: impl Into<String>) -> Result<Self, ConfigError> {
        let vendor = vendor.into();
        if vendor.is_empty() || vendor.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidVendor { vendor });
        }
        Ok(Self(vendor))
    }

    /// Returns the full `Accept` header value for this vendor.
    #[must_use]
    pub fn accept_header(&self) -> String {
        format!("application/vnd.{}.v1+json", self.0)
    }
}

impl Default for Vendor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for Vendor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
