//! Fully loaded resources and whole-resource writes.
//!
//! A [`Resource`] is a [`ResourceIdentifier`] plus its `attributes`. It
//! implements `Deref<Target = ResourceIdentifier>`, so identifier methods
//! such as [`related`](ResourceIdentifier::related),
//! [`set_relationship`](ResourceIdentifier::set_relationship) and
//! [`delete`](ResourceIdentifier::delete) are available directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_client::{QueryBuilder, ResourceIdentifier};
//!
//! let mut article = QueryBuilder::new("articles")
//!     .id("1")
//!     .get(&client)
//!     .await?
//!     .into_resource()
//!     .expect("a full resource");
//!
//! println!("{:?}", article.attribute("title"));
//!
//! article
//!     .set_attribute("title", "Renamed")
//!     .set_relationship("author", ResourceIdentifier::new("people", "9"));
//! article.update(&client).await?;
//! ```

use std::ops::{Deref, DerefMut};

use serde_json::{Map, Value};

use crate::clients::RestClient;
use crate::rest::path::join_segments;
use crate::rest::{Document, ResourceError, ResourceIdentifier};

/// A resource with attributes.
///
/// Resources returned by the API get their attributes from the
/// `data.attributes` member of the response, unchanged.
#[derive(Clone, Debug)]
pub struct Resource {
    identifier: ResourceIdentifier,
    attributes: Map<String, Value>,
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

impl Resource {
    /// Creates a resource from an identifier and attributes.
    ///
    /// Use [`ResourceIdentifier::unsaved`] for a resource that is about to
    /// be [`create`](Self::create)d.
    #[must_use]
    pub const fn new(identifier: ResourceIdentifier, attributes: Map<String, Value>) -> Self {
        Self {
            identifier,
            attributes,
        }
    }

    /// Returns all attributes.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns the attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets the attribute `name`.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the identifier, dropping the attributes.
    #[must_use]
    pub fn into_identifier(self) -> ResourceIdentifier {
        self.identifier
    }

    /// Builds the request document for a whole-resource write.
    ///
    /// ```text
    /// {"data": {"type", "id"?, "attributes", "relationships"?}}
    /// ```
    ///
    /// `relationships` holds the linkage of every changed relationship and
    /// is omitted when nothing changed.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut data = Map::new();
        data.insert(
            "type".to_string(),
            Value::String(self.resource_type().to_string()),
        );
        if let Some(id) = self.id() {
            data.insert("id".to_string(), Value::String(id.to_string()));
        }
        data.insert(
            "attributes".to_string(),
            Value::Object(self.attributes.clone()),
        );

        let relationships = self.identifier.changed_relationships_document();
        if !relationships.is_empty() {
            data.insert("relationships".to_string(), Value::Object(relationships));
        }

        let mut document = Map::new();
        document.insert("data".to_string(), Value::Object(data));
        Value::Object(document)
    }

    /// Creates the resource with `POST {type}`.
    ///
    /// Returns the parsed response, or `None` when the server answers
    /// without a body. Changed relationships are cleared on success.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request or parsing fails.
    pub async fn create(&mut self, client: &RestClient) -> Result<Option<Document>, ResourceError> {
        let path = join_segments([self.resource_type()]);
        let response = client.post(&path, self.to_document()).await?;
        self.identifier.mark_written();
        parse_optional(response.body)
    }

    /// Replaces the resource with `PATCH {type}/{id}`.
    ///
    /// The body carries every attribute and every changed relationship.
    /// Returns the parsed response, or `None` when the server answers
    /// without a body. Changed relationships are cleared on success.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] for an unsaved resource, or
    /// [`ResourceError::Http`] if the request or parsing fails.
    pub async fn update(&mut self, client: &RestClient) -> Result<Option<Document>, ResourceError> {
        let path = self.identifier.path()?;
        let response = client.patch(&path, self.to_document()).await?;
        self.identifier.mark_written();
        parse_optional(response.body)
    }
}

fn parse_optional(body: Value) -> Result<Option<Document>, ResourceError> {
    if body.is_null() {
        return Ok(None);
    }
    Ok(Some(Document::from_body(body)?))
}

impl Deref for Resource {
    type Target = ResourceIdentifier;

    fn deref(&self) -> &Self::Target {
        &self.identifier
    }
}

impl DerefMut for Resource {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.identifier
    }
}
