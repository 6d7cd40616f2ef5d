//! The JSON:API resource graph.
//!
//! This module turns response bodies into navigable values and turns local
//! relationship changes back into API calls:
//!
//! - **[`QueryBuilder`]**: resource path, pagination and filters
//! - **[`Document`]**: classification of a body into a set, a resource or
//!   an identifier
//! - **[`ResourceIdentifier`]**, **[`Resource`]**, **[`ResourceSet`]**: the
//!   graph itself
//! - **[`Relation`]**: read-only related resources, fetched on every call
//! - **[`Relationship`]**: linkage data, fetched once and cached, or set
//!   locally and tracked in [`ChangedRelationships`]
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_client::{ClientConfig, QueryBuilder, ResourceIdentifier, RestClient};
//!
//! let client = RestClient::new(&config)?;
//!
//! // Read
//! let articles = QueryBuilder::new("articles")
//!     .filter("status", "published")
//!     .get_all(&client)
//!     .await?;
//!
//! for article in &articles {
//!     let comments = article.related("comments").get(&client).await?;
//!     println!("{:?}: {:?}", article.id(), comments.as_set().map(|s| s.len()));
//! }
//!
//! // Detach two tags from an article
//! let mut article = ResourceIdentifier::new("articles", "1");
//! article.set_relationship(
//!     "tags",
//!     vec![ResourceIdentifier::new("tags", "4"), ResourceIdentifier::new("tags", "5")],
//! );
//! article.delete(&client).await?;
//! ```

mod collection;
mod errors;
mod identifier;
mod path;
mod query;
mod relationship;
mod resource;
mod response;
mod tracking;

// Public exports
pub use collection::ResourceSet;
pub use errors::ResourceError;
pub use identifier::ResourceIdentifier;
pub use path::{join_segments, related_path, relationship_path, resource_path};
pub use query::{FilterValue, QueryBuilder};
pub use relationship::{Relation, Relationship, RelationshipValue};
pub use resource::Resource;
pub use response::Document;
pub use tracking::ChangedRelationships;
