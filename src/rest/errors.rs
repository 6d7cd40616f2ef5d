//! Resource-specific error types for resource graph operations.
//!
//! # Error Handling
//!
//! - [`ResourceError::MissingId`]: the operation needs an id the identifier does not have
//! - [`ResourceError::Http`]: any transport, API, authentication or parse failure
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_client::{HttpError, ResourceError};
//!
//! match article.delete(&client).await {
//!     Ok(_) => println!("deleted"),
//!     Err(ResourceError::MissingId { resource_type, .. }) => {
//!         println!("cannot delete an unsaved {resource_type}");
//!     }
//!     Err(ResourceError::Http(HttpError::Api(e))) => println!("server said: {}", e.message()),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{ApiError, HttpError, ParseError};
use thiserror::Error;

/// Error type for resource graph operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The operation requires an id but the identifier has none.
    #[error("Cannot {operation} a '{resource_type}' resource without an id")]
    MissingId {
        /// The type of the resource.
        resource_type: String,
        /// The operation being attempted (e.g., "delete", "related").
        operation: &'static str,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the API error if the server rejected the request.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Http(HttpError::Api(e)) => Some(e),
            _ => None,
        }
    }

    /// Returns the request ID of a rejected request, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.api_error().and_then(|e| e.request_id.as_deref())
    }
}

impl From<ParseError> for ResourceError {
    fn from(error: ParseError) -> Self {
        Self::Http(HttpError::Parse(error))
    }
}
