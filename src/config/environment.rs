//! Named API environments.
//!
//! This module provides the [`ApiEnvironment`] enum for selecting one of
//! the two well-known API endpoints.

use crate::config::ApiUrl;
use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL of the production API.
pub const PRODUCTION_API_URL: &str = "https://api.example.com/";

/// Base URL of the test (sandbox) API.
pub const TEST_API_URL: &str = "https://api.test.example.com/";

/// A named API endpoint.
///
/// The client talks to [`ApiEnvironment::Production`] unless configured
/// otherwise. An arbitrary URL can always be set instead through
/// [`ClientConfigBuilder::api_url`](crate::ClientConfigBuilder::api_url).
///
/// # Example
///
/// ```rust
/// use jsonapi_client::ApiEnvironment;
///
/// let env: ApiEnvironment = "test".parse().unwrap();
/// assert_eq!(env, ApiEnvironment::Test);
/// assert_eq!(env.to_string(), "test");
/// assert_eq!(ApiEnvironment::default(), ApiEnvironment::Production);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ApiEnvironment {
    /// The live API.
    #[default]
    Production,
    /// The sandbox API.
    Test,
}

impl ApiEnvironment {
    /// Returns the base URL string of this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_URL,
            Self::Test => TEST_API_URL,
        }
    }

    /// Returns the validated [`ApiUrl`] for this environment.
    #[must_use]
    pub fn api_url(&self) -> ApiUrl {
        ApiUrl::from_static(self.base_url())
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Test => f.write_str("test"),
        }
    }
}

impl FromStr for ApiEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::InvalidEnvironment {
                name: s.to_string(),
            }),
        }
    }
}
