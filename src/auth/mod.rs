//! Credential providers for API authentication.
//!
//! Every request carries `Authorization: Bearer <token>`. The token is
//! obtained from a [`TokenProvider`] configured on the
//! [`ClientConfig`](crate::ClientConfig) and looked up lazily when a request
//! is about to be sent, so a provider may rotate its token between calls.
//!
//! # Overview
//!
//! - [`TokenProvider`]: the pluggable credential source
//! - [`StaticToken`]: a fixed token with masked `Debug` output
//! - [`FnTokenProvider`]: adapts a closure into a provider
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::auth::{FnTokenProvider, StaticToken, TokenProvider};
//!
//! let fixed = StaticToken::new("secret-token").unwrap();
//! assert_eq!(fixed.token(), "secret-token");
//!
//! let dynamic = FnTokenProvider::new(|| "rotated-token".to_string());
//! assert_eq!(dynamic.token(), "rotated-token");
//! ```

use std::fmt;

use crate::error::ConfigError;

/// A source of bearer tokens.
///
/// Implementations must be cheap to call; the token is requested once per
/// HTTP request.
pub trait TokenProvider: fmt::Debug + Send + Sync {
    /// Returns the bearer token to send with the next request.
    fn token(&self) -> String;
}

/// A fixed bearer token.
///
/// # Security
///
/// The `Debug` implementation masks the token, displaying only
/// `StaticToken(*****)`.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> String {
        self.0.clone()
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(*****)")
    }
}

/// A token provider backed by a closure.
pub struct FnTokenProvider<F>(F);

impl<F> FnTokenProvider<F>
where
    F: Fn() -> String + Send + Sync,
{
    /// Wraps `f` as a [`TokenProvider`].
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> TokenProvider for FnTokenProvider<F>
where
    F: Fn() -> String + Send + Sync,
{
    fn token(&self) -> String {
        (self.0)()
    }
}

impl<F> fmt::Debug for FnTokenProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnTokenProvider(..)")
    }
}
