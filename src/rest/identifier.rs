//! Resource identifiers and relationship-scoped operations.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::clients::RestClient;
use crate::rest::path::{relationship_path, resource_path};
use crate::rest::{ChangedRelationships, Relation, Relationship, RelationshipValue, ResourceError};

/// How changed relationships are written back.
#[derive(Clone, Copy, Debug)]
enum RelationshipWrite {
    Replace,
    Remove,
}

impl RelationshipWrite {
    const fn operation(self) -> &'static str {
        match self {
            Self::Replace => "update relationships of",
            Self::Remove => "delete",
        }
    }
}

/// A reference to a resource: its `type` and (optional) `id`.
///
/// Besides the pair itself, an identifier carries a relationship overlay:
/// relationships that were fetched or set on it, and the names of those
/// that were set since it was loaded ([`ChangedRelationships`]).
///
/// The `(type, id)` pair never changes after construction. Identifiers are
/// not shared between responses: two fetches of the same resource produce
/// two independent values.
///
/// # Example
///
/// ```rust
/// use jsonapi_client::ResourceIdentifier;
/// use serde_json::json;
///
/// let mut article = ResourceIdentifier::new("articles", "1");
/// article
///     .set_relationship("author", ResourceIdentifier::new("people", "9"))
///     .set_relationship("tags", vec![ResourceIdentifier::new("tags", "2")]);
///
/// assert_eq!(article.linkage(), json!({"type": "articles", "id": "1"}));
/// assert_eq!(article.changed_relationships().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ResourceIdentifier {
    resource_type: String,
    id: Option<String>,
    relationships: HashMap<String, Relationship>,
    changed: ChangedRelationships,
}

// Verify ResourceIdentifier is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceIdentifier>();
};

impl ResourceIdentifier {
    /// Creates an identifier for an existing resource.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::from_parts(resource_type.into(), Some(id.into()))
    }

    /// Creates an identifier for a resource the server has not assigned an
    /// id to yet.
    #[must_use]
    pub fn unsaved(resource_type: impl Into<String>) -> Self {
        Self::from_parts(resource_type.into(), None)
    }

    pub(crate) fn from_parts(resource_type: String, id: Option<String>) -> Self {
        Self {
            resource_type,
            id,
            relationships: HashMap::new(),
            changed: ChangedRelationships::new(),
        }
    }

    /// Returns the resource type.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the resource id, if assigned.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Serializes the identifier as a linkage object: `{"type", "id"}`.
    ///
    /// An unsaved identifier has `"id": null`.
    #[must_use]
    pub fn linkage(&self) -> Value {
        json!({
            "type": self.resource_type,
            "id": self.id,
        })
    }

    /// Returns `{type}/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the identifier has no id.
    pub fn path(&self) -> Result<String, ResourceError> {
        let id = self.require_id("address")?;
        Ok(resource_path(&self.resource_type, id))
    }

    /// Returns a read-only [`Relation`] to `{type}/{id}/{name}`.
    ///
    /// Never marks `name` as changed.
    #[must_use]
    pub fn related(&self, name: impl Into<String>) -> Relation {
        Relation::new(&self.resource_type, self.id.as_deref(), name)
    }

    /// Returns the relationship `name`, fetching it on first access.
    ///
    /// The first call for a name that was neither fetched nor set issues a
    /// GET to `{type}/{id}/relationships/{name}`; the result is cached on
    /// this identifier and later calls return it without a request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if a fetch is needed and the
    /// identifier has no id, or [`ResourceError::Http`] if it fails.
    pub async fn relationship(
        &mut self,
        client: &RestClient,
        name: &str,
    ) -> Result<&Relationship, ResourceError> {
        match self.relationships.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                let fetched =
                    Relationship::fetch(client, &self.resource_type, self.id.as_deref(), name)
                        .await?;
                Ok(&*entry.insert(fetched))
            }
        }
    }

    /// Returns the cached relationship `name` without fetching.
    #[must_use]
    pub fn cached_relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }

    /// Sets pending data for the relationship `name` and marks it changed.
    ///
    /// A single identifier replaces the current value; a list is appended
    /// to it. [`RelationshipValue::Unset`] is ignored.
    pub fn set_relationship(
        &mut self,
        name: impl Into<String>,
        value: impl Into<RelationshipValue>,
    ) -> &mut Self {
        let value = value.into();
        if value.is_unset() {
            return self;
        }

        let name = name.into();
        self.relationships
            .entry(name.clone())
            .or_insert_with(|| Relationship::new(name.clone()))
            .apply(value);
        self.changed.mark(name);
        self
    }

    /// Returns the names of relationships set since loading.
    #[must_use]
    pub const fn changed_relationships(&self) -> &ChangedRelationships {
        &self.changed
    }

    /// Deletes the resource, or the changed relationship linkage.
    ///
    /// Without changed relationships this sends `DELETE {type}/{id}`.
    /// Otherwise it sends one `DELETE {type}/{id}/relationships/{name}` per
    /// changed relationship, in change order, each with
    /// `{"data": <linkage>}` as the body.
    ///
    /// The requests are not transactional. The first failure is returned
    /// at once and later relationships are not attempted, but deletions
    /// that already succeeded stay applied on the server. The changed set
    /// is cleared only after every request succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] for an unsaved identifier, or
    /// the first [`ResourceError::Http`] raised by a request.
    pub async fn delete(&mut self, client: &RestClient) -> Result<bool, ResourceError> {
        if self.changed.is_empty() {
            let path = resource_path(&self.resource_type, self.require_id("delete")?);
            client.delete(&path, None).await?;
            return Ok(true);
        }

        self.write_changed(client, RelationshipWrite::Remove).await?;
        self.changed.clear();
        Ok(true)
    }

    /// Replaces the linkage of every changed relationship.
    ///
    /// Sends one `PATCH {type}/{id}/relationships/{name}` per changed
    /// relationship, in change order, with the same abort-on-first-failure
    /// behavior as [`delete`](Self::delete). Returns `false` without any
    /// request when nothing has changed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] for an unsaved identifier, or
    /// the first [`ResourceError::Http`] raised by a request.
    pub async fn update_relationships(&mut self, client: &RestClient) -> Result<bool, ResourceError> {
        if self.changed.is_empty() {
            return Ok(false);
        }

        self.write_changed(client, RelationshipWrite::Replace).await?;
        self.changed.clear();
        Ok(true)
    }

    /// Returns `{name: {"data": <linkage>}}` for every changed relationship.
    pub(crate) fn changed_relationships_document(&self) -> Map<String, Value> {
        self.changed
            .iter()
            .map(|name| (name.to_string(), json!({ "data": self.linkage_of(name) })))
            .collect()
    }

    pub(crate) fn mark_written(&mut self) {
        self.changed.clear();
    }

    pub(crate) fn require_id(&self, operation: &'static str) -> Result<&str, ResourceError> {
        self.id.as_deref().ok_or_else(|| ResourceError::MissingId {
            resource_type: self.resource_type.clone(),
            operation,
        })
    }

    fn linkage_of(&self, name: &str) -> Value {
        self.relationships
            .get(name)
            .map_or(Value::Null, Relationship::linkage)
    }

    async fn write_changed(
        &self,
        client: &RestClient,
        write: RelationshipWrite,
    ) -> Result<(), ResourceError> {
        let id = self.require_id(write.operation())?;
        let total = self.changed.len();

        for (completed, name) in self.changed.iter().enumerate() {
            let path = relationship_path(&self.resource_type, id, name);
            let body = json!({ "data": self.linkage_of(name) });

            let result = match write {
                RelationshipWrite::Replace => client.patch(&path, body).await,
                RelationshipWrite::Remove => client.delete(&path, Some(body)).await,
            };

            if let Err(error) = result {
                if completed > 0 {
                    tracing::warn!(
                        resource_type = %self.resource_type,
                        id,
                        relationship = name,
                        completed,
                        total,
                        "Relationship write aborted; earlier requests remain applied"
                    );
                }
                return Err(error.into());
            }
        }

        Ok(())
    }
}
