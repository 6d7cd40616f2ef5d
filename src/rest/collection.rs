//! Ordered collections of resources with a pagination cursor.

use std::ops::Deref;

use serde_json::Value;

use crate::clients::{resolve_link, ParseError, RestClient};
use crate::rest::response::resource_from_value;
use crate::rest::{Resource, ResourceError};

/// An ordered list of resources, as delivered by the server.
///
/// `ResourceSet` derefs to `[Resource]`, so slice methods (`len`, `iter`,
/// indexing) work directly.
///
/// # Example
///
/// ```rust,ignore
/// use jsonapi_client::QueryBuilder;
///
/// let first_page = QueryBuilder::new("articles")
///     .size(20)
///     .get(&client)
///     .await?
///     .into_set()
///     .unwrap_or_default();
///
/// println!("{} on the first page", first_page.len());
///
/// let everything = first_page.fetch_all(&client).await?;
/// assert!(everything.next_link().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResourceSet {
    resources: Vec<Resource>,
    next_link: Option<String>,
}

impl ResourceSet {
    /// Creates a set from resources and an optional `links.next` cursor.
    #[must_use]
    pub const fn new(resources: Vec<Resource>, next_link: Option<String>) -> Self {
        Self {
            resources,
            next_link,
        }
    }

    /// Builds a set without a cursor from raw resource objects.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidResourceObject`] for the first element
    /// that is not a resource object.
    pub fn from_values(values: Vec<Value>) -> Result<Self, ParseError> {
        let resources = values
            .into_iter()
            .map(resource_from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(resources, None))
    }

    /// Returns the `links.next` URL of the page this set came from.
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    /// Returns `true` if the server advertised another page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_link.is_some()
    }

    /// Returns the resources, dropping the cursor.
    #[must_use]
    pub fn into_inner(self) -> Vec<Resource> {
        self.resources
    }

    /// Appends every remaining page.
    ///
    /// Follows [`next_link`](Self::next_link) with
    /// [`RestClient::get_recursive`] and returns a set with no cursor. A set
    /// without a next link is returned as-is without any request. The link
    /// is resolved as a URI reference against the configured API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for the first failing page or a
    /// malformed element.
    pub async fn fetch_all(mut self, client: &RestClient) -> Result<Self, ResourceError> {
        let Some(next) = self.next_link.take() else {
            return Ok(self);
        };

        let next = resolve_link(client.config().api_url().as_ref(), &next)?;
        let remaining = client.get_recursive(&next).await?;
        self.resources.extend(Self::from_values(remaining)?.resources);
        Ok(self)
    }
}

impl Deref for ResourceSet {
    type Target = [Resource];

    fn deref(&self) -> &Self::Target {
        &self.resources
    }
}

impl IntoIterator for ResourceSet {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResourceSet {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
