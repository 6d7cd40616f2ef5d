//! Relations and relationships between resources.
//!
//! Two kinds of named references hang off a [`ResourceIdentifier`]:
//!
//! - [`Relation`]: a read-only pointer to `{type}/{id}/{name}`. It holds no
//!   data and every [`Relation::get`] issues a fresh request.
//! - [`Relationship`]: linkage data that was either fetched from
//!   `{type}/{id}/relationships/{name}` or set locally. It is cached on the
//!   owning identifier and carries a [`RelationshipValue`].
//!
//! # Setting Values
//!
//! [`ResourceIdentifier::set_relationship`] applies a value with these rules:
//!
//! | Current | New | Result |
//! |---------|-----|--------|
//! | any | `Single(x)` | `Single(x)` |
//! | `Unset` | `Many(l)` | `Many(l)` |
//! | `Single(x)` | `Many(l)` | `Many([x, ..l])` |
//! | `Many(m)` | `Many(l)` | `Many([..m, ..l])` |
//! | any | `Unset` | unchanged |

use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::path::{related_path, relationship_path};
use crate::rest::{Document, Resource, ResourceError, ResourceIdentifier};

/// The linkage data of a relationship.
#[derive(Clone, Debug, Default)]
pub enum RelationshipValue {
    /// No linkage.
    #[default]
    Unset,
    /// A to-one relationship.
    Single(ResourceIdentifier),
    /// A to-many relationship.
    Many(Vec<ResourceIdentifier>),
}

impl RelationshipValue {
    /// Returns `true` for [`RelationshipValue::Unset`].
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Serializes the value as JSON:API linkage data.
    ///
    /// A single identifier becomes `{"type", "id"}`, a list becomes an array
    /// of those and `Unset` becomes `null`.
    #[must_use]
    pub fn linkage(&self) -> Value {
        match self {
            Self::Unset => Value::Null,
            Self::Single(identifier) => identifier.linkage(),
            Self::Many(identifiers) => {
                Value::Array(identifiers.iter().map(ResourceIdentifier::linkage).collect())
            }
        }
    }

    /// Returns the referenced identifiers.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            Self::Unset => Vec::new(),
            Self::Single(identifier) => vec![identifier],
            Self::Many(identifiers) => identifiers.iter().collect(),
        }
    }

    fn merge(&mut self, value: Self) {
        *self = match (std::mem::take(self), value) {
            (current, Self::Unset) => current,
            (_, single @ Self::Single(_)) => single,
            (Self::Unset, many @ Self::Many(_)) => many,
            (Self::Single(existing), Self::Many(added)) => {
                let mut identifiers = Vec::with_capacity(added.len() + 1);
                identifiers.push(existing);
                identifiers.extend(added);
                Self::Many(identifiers)
            }
            (Self::Many(mut existing), Self::Many(added)) => {
                existing.extend(added);
                Self::Many(existing)
            }
        };
    }
}

impl From<ResourceIdentifier> for RelationshipValue {
    fn from(identifier: ResourceIdentifier) -> Self {
        Self::Single(identifier)
    }
}

impl From<Resource> for RelationshipValue {
    fn from(resource: Resource) -> Self {
        Self::Single(resource.into_identifier())
    }
}

impl From<Vec<ResourceIdentifier>> for RelationshipValue {
    fn from(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self::Many(identifiers)
    }
}

impl From<Vec<Resource>> for RelationshipValue {
    fn from(resources: Vec<Resource>) -> Self {
        Self::Many(resources.into_iter().map(Resource::into_identifier).collect())
    }
}

impl From<Option<ResourceIdentifier>> for RelationshipValue {
    fn from(identifier: Option<ResourceIdentifier>) -> Self {
        identifier.map_or(Self::Unset, Self::Single)
    }
}

/// A named relationship cached on its owning identifier.
#[derive(Clone, Debug)]
pub struct Relationship {
    name: String,
    value: RelationshipValue,
    fetched: bool,
}

impl Relationship {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: RelationshipValue::Unset,
            fetched: false,
        }
    }

    /// Returns the relationship name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current linkage value.
    #[must_use]
    pub const fn value(&self) -> &RelationshipValue {
        &self.value
    }

    /// Returns `true` if the value came from the server and has not been
    /// set locally since.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        self.fetched
    }

    /// Serializes the current value as linkage data.
    #[must_use]
    pub fn linkage(&self) -> Value {
        self.value.linkage()
    }

    /// Returns the referenced identifiers.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        self.value.identifiers()
    }

    pub(crate) fn apply(&mut self, value: RelationshipValue) {
        self.value.merge(value);
        self.fetched = false;
    }

    /// Loads `{type}/{id}/relationships/{name}`.
    ///
    /// `data: null` is a valid empty to-one relationship and yields an
    /// `Unset` value.
    pub(crate) async fn fetch(
        client: &RestClient,
        owner_type: &str,
        owner_id: Option<&str>,
        name: &str,
    ) -> Result<Self, ResourceError> {
        let owner_id = owner_id.ok_or_else(|| ResourceError::MissingId {
            resource_type: owner_type.to_string(),
            operation: "load relationships of",
        })?;

        let path = relationship_path(owner_type, owner_id, name);
        tracing::debug!(path = %path, relationship = name, "Fetching relationship");

        let body = client.get(&path).await?.body;
        let value = if body.get("data").is_some_and(Value::is_null) {
            RelationshipValue::Unset
        } else {
            match Document::from_body(body)? {
                Document::Identifier(identifier) => RelationshipValue::Single(identifier),
                Document::Resource(resource) => RelationshipValue::Single(resource.into_identifier()),
                Document::Set(set) => RelationshipValue::Many(
                    set.into_iter().map(Resource::into_identifier).collect(),
                ),
            }
        };

        Ok(Self {
            name: name.to_string(),
            value,
            fetched: true,
        })
    }
}

/// An unresolved, read-only reference to related resources.
///
/// Created by [`ResourceIdentifier::related`]. Holding a `Relation` never
/// marks anything as changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    owner_type: String,
    owner_id: Option<String>,
    name: String,
}

impl Relation {
    pub(crate) fn new(owner_type: &str, owner_id: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            owner_type: owner_type.to_string(),
            owner_id: owner_id.map(ToString::to_string),
            name: name.into(),
        }
    }

    /// Returns the relation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning resource type.
    #[must_use]
    pub fn owner_type(&self) -> &str {
        &self.owner_type
    }

    /// Returns the owning resource id.
    #[must_use]
    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// Returns `{type}/{id}/{name}`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the owner has no id.
    pub fn path(&self) -> Result<String, ResourceError> {
        let owner_id = self.owner_id.as_deref().ok_or_else(|| ResourceError::MissingId {
            resource_type: self.owner_type.clone(),
            operation: "resolve relations of",
        })?;
        Ok(related_path(&self.owner_type, owner_id, &self.name))
    }

    /// Fetches the related resources.
    ///
    /// Nothing is cached: every call issues a new GET request.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the owner has no id, or
    /// [`ResourceError::Http`] if the request or parsing fails.
    pub async fn get(&self, client: &RestClient) -> Result<Document, ResourceError> {
        let path = self.path()?;
        let response = client.get(&path).await?;
        Ok(Document::from_body(response.body)?)
    }
}
