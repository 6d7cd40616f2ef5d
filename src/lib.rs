//! # JSON:API REST Client
//!
//! An async client library for a JSON:API-style REST service. It maps
//! response payloads into navigable resource graphs and turns relationship
//! changes back into API calls.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Pluggable bearer credentials via [`TokenProvider`]
//! - An async transport ([`RestClient`]) with typed errors and transparent
//!   pagination traversal
//! - A [`QueryBuilder`] for resource paths, `page[...]` and `filter[...]`
//! - A [`Document`] parser classifying bodies into [`ResourceSet`],
//!   [`Resource`] or [`ResourceIdentifier`]
//! - Relationship tracking: lazily fetched [`Relationship`]s, read-only
//!   [`Relation`]s and [`ChangedRelationships`]-driven writes
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_client::{ApiEnvironment, ClientConfig, QueryBuilder, StaticToken};
//!
//! let config = ClientConfig::builder()
//!     .environment(ApiEnvironment::Production)
//!     .auth(StaticToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let url = QueryBuilder::new("articles").size(5).build();
//! assert_eq!(url, "articles?page%5Bsize%5D=5");
//! # let _ = config;
//! ```
//!
//! ## Reading and Writing Resources
//!
//! ```rust,ignore
//! use jsonapi_client::{QueryBuilder, ResourceIdentifier, RestClient};
//!
//! let client = RestClient::new(&config)?;
//!
//! // Single resource
//! let mut article = QueryBuilder::new("articles")
//!     .id("1")
//!     .get(&client)
//!     .await?
//!     .into_resource()
//!     .expect("article with attributes");
//!
//! // Cached after the first call
//! let author = article.relationship(&client, "author").await?;
//! println!("{}", author.linkage());
//!
//! // Re-fetched on every call
//! let comments = article.related("comments").get(&client).await?;
//!
//! // Relationship-only write
//! article.set_relationship("tags", vec![ResourceIdentifier::new("tags", "7")]);
//! article.update_relationships(&client).await?;
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Requests emit `debug` events before
//! and after each exchange, lazy relationship loads emit `debug`, and a
//! relationship write that aborts part-way emits `warn`. Without an
//! installed subscriber these events are dropped.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: client and config types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No hidden caching**: only explicitly fetched relationships are cached

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{FnTokenProvider, StaticToken, TokenProvider};
pub use config::{ApiEnvironment, ApiUrl, ClientConfig, ClientConfigBuilder, Vendor};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, AuthenticationError, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse, InvalidHttpRequestError, ParseError, RestClient,
};

// Re-export resource graph types
pub use rest::{
    ChangedRelationships, Document, FilterValue, QueryBuilder, Relation, Relationship,
    RelationshipValue, Resource, ResourceError, ResourceIdentifier, ResourceSet,
};
