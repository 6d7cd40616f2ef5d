//! Configuration types for the JSON:API client.
//!
//! This module provides the client context that every other component reads:
//! the API base URL, the vendor used in the media type, and the credential
//! provider.
//!
//! # Overview
//!
//! - [`ClientConfig`]: the configuration shared by all clients
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`ApiEnvironment`]: the two named endpoints (`production`, `test`)
//! - [`ApiUrl`]: a validated, slash-terminated base URL
//! - [`Vendor`]: the vendor segment of the `Accept` media type
//!
//! There is no global state: build a config once at startup and hand it to
//! [`RestClient::new`](crate::RestClient::new).
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::{ApiEnvironment, ClientConfig, StaticToken};
//!
//! let config = ClientConfig::builder()
//!     .environment(ApiEnvironment::Test)
//!     .auth(StaticToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), ApiEnvironment::Test.base_url());
//! ```

mod environment;
mod newtypes;

pub use environment::{ApiEnvironment, PRODUCTION_API_URL, TEST_API_URL};
pub use newtypes::{ApiUrl, Vendor};

use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::clients::AuthenticationError;
use crate::error::ConfigError;

/// Configuration for the JSON:API client.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`. The setters take
/// `&mut self` and are meant for startup; a config is not designed to be
/// mutated while requests are in flight.
///
/// # Example
///
/// ```rust
/// use jsonapi_client::{ApiUrl, ClientConfig, StaticToken};
///
/// let mut config = ClientConfig::builder().build().unwrap();
/// assert!(config.auth().is_err());
///
/// config.set_auth(StaticToken::new("token").unwrap());
/// config.set_api_url(ApiUrl::new("http://localhost:8080").unwrap());
///
/// assert!(config.auth().is_ok());
/// assert_eq!(config.api_url().as_ref(), "http://localhost:8080/");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_url: ApiUrl,
    vendor: Vendor,
    auth: Option<Arc<dyn TokenProvider>>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the vendor used in the `Accept` header.
    #[must_use]
    pub const fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the configured credential provider.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::MissingCredentials`] if no provider
    /// has been configured.
    pub fn auth(&self) -> Result<&dyn TokenProvider, AuthenticationError> {
        self.auth
            .as_deref()
            .ok_or(AuthenticationError::MissingCredentials)
    }

    /// Replaces the credential provider.
    pub fn set_auth(&mut self, provider: impl TokenProvider + 'static) {
        self.auth = Some(Arc::new(provider));
    }

    /// Overrides the API base URL.
    pub fn set_api_url(&mut self, url: ApiUrl) {
        tracing::info!(url = %url, "Overriding API base URL");
        self.api_url = url;
    }

    /// Points the client at one of the named environments.
    pub fn set_environment(&mut self, environment: ApiEnvironment) {
        self.set_api_url(environment.api_url());
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `api_url`: [`ApiEnvironment::Production`]
/// - `vendor`: [`Vendor::DEFAULT`]
/// - `auth`: `None` (requests fail with an authentication error)
/// - `user_agent_prefix`: `None`
///
/// When both [`environment`](Self::environment) and [`api_url`](Self::api_url)
/// are set, the explicit URL wins.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    environment: Option<ApiEnvironment>,
    api_url: Option<ApiUrl>,
    vendor: Option<Vendor>,
    auth: Option<Arc<dyn TokenProvider>>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a named environment.
    #[must_use]
    pub const fn environment(mut self, environment: ApiEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets an arbitrary API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the vendor used in the `Accept` media type.
    #[must_use]
    pub fn vendor(mut self, vendor: Vendor) -> Self {
        self.vendor = Some(vendor);
        self
    }

    /// Sets the credential provider.
    #[must_use]
    pub fn auth(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// The credential provider is optional here; its absence is reported
    /// when a request is attempted.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` so that validation can be added
    /// without breaking callers.
    #[allow(clippy::unnecessary_wraps)]
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_url = self
            .api_url
            .unwrap_or_else(|| self.environment.unwrap_or_default().api_url());

        Ok(ClientConfig {
            api_url,
            vendor: self.vendor.unwrap_or_default(),
            auth: self.auth,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticToken;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().build().unwrap();

        assert_eq!(config.api_url().as_ref(), PRODUCTION_API_URL);
        assert_eq!(config.vendor(), &Vendor::default());
        assert!(config.user_agent_prefix().is_none());
        assert!(matches!(
            config.auth(),
            Err(AuthenticationError::MissingCredentials)
        ));
    }

    #[test]
    fn test_builder_selects_test_environment() {
        let config = ClientConfig::builder()
            .environment(ApiEnvironment::Test)
            .build()
            .unwrap();

        assert_eq!(config.api_url().as_ref(), TEST_API_URL);
    }

    #[test]
    fn test_explicit_url_wins_over_environment() {
        let config = ClientConfig::builder()
            .environment(ApiEnvironment::Test)
            .api_url(ApiUrl::new("http://localhost:9000").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.api_url().as_ref(), "http://localhost:9000/");
    }

    #[test]
    fn test_setters_update_config() {
        let mut config = ClientConfig::builder().build().unwrap();

        config.set_environment(ApiEnvironment::Test);
        assert_eq!(config.api_url().as_ref(), TEST_API_URL);

        config.set_auth(StaticToken::new("abc").unwrap());
        assert_eq!(config.auth().unwrap().token(), "abc");
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let config = ClientConfig::builder()
            .auth(StaticToken::new("very-secret").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ClientConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
