//! Query building for collection and resource requests.
//!
//! [`QueryBuilder`] accumulates a resource path, pagination and filter
//! parameters and renders them into a relative URL. Parameters use nested
//! form keys:
//!
//! - `page[size]` and `page[number]` (always before filters)
//! - `filter[{name}]`, in the order filters were first added
//!
//! List filter values are joined with commas before encoding, so
//! `filter("tag", ["a", "b"])` renders `filter[tag]=a,b` rather than
//! repeated keys.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::QueryBuilder;
//!
//! let url = QueryBuilder::new("/articles/")
//!     .size(10)
//!     .page(2)
//!     .filter("tag", vec!["rust", "http"])
//!     .build();
//!
//! assert_eq!(
//!     url,
//!     "articles?page%5Bsize%5D=10&page%5Bnumber%5D=2&filter%5Btag%5D=rust%2Chttp"
//! );
//! ```

use crate::clients::RestClient;
use crate::rest::path::join_segments;
use crate::rest::{Document, ResourceError, ResourceSet};

/// A filter value: one scalar or a list of scalars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
    /// A single value.
    Single(String),
    /// A list of values, sent comma-joined.
    List(Vec<String>),
}

impl FilterValue {
    /// Returns the unencoded query value.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(values) => values.join(","),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}

macro_rules! filter_value_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FilterValue {
                fn from(value: $t) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

filter_value_from_integer!(i32, i64, u32, u64, usize);

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(ToString::to_string).collect())
    }
}

impl From<&[&str]> for FilterValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Builder for resource URLs with pagination and filters.
///
/// Setters consume and return the builder so calls chain. Filter names are
/// not validated; unknown filters are passed through to the server.
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    resource: String,
    id: Option<String>,
    size: Option<u64>,
    number: Option<u64>,
    filters: Vec<(String, FilterValue)>,
}

impl QueryBuilder {
    /// Creates a builder for the given resource path (e.g. `"articles"`).
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Targets a single resource by id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets `page[size]`.
    #[must_use]
    pub const fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets `page[number]`.
    #[must_use]
    pub const fn page(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Adds `filter[name]`.
    ///
    /// Setting the same filter again replaces its value but keeps its
    /// position in the query string.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.filters.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.filters.push((name, value)),
        }
        self
    }

    /// Returns the query parameters as unencoded key/value pairs.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        if let Some(size) = self.size {
            params.push(("page[size]".to_string(), size.to_string()));
        }
        if let Some(number) = self.number {
            params.push(("page[number]".to_string(), number.to_string()));
        }
        for (name, value) in &self.filters {
            params.push((format!("filter[{name}]"), value.to_query_value()));
        }
        params
    }

    /// Renders the relative URL.
    ///
    /// The resource path loses its leading and trailing slashes, `/{id}` is
    /// appended when an id is set, and a query string is added only when
    /// there are pagination or filter parameters.
    ///
    /// Keys and values are form-encoded: reserved characters are
    /// percent-escaped and a space becomes `+`.
    #[must_use]
    pub fn build(&self) -> String {
        let path = join_segments([self.resource.as_str(), self.id.as_deref().unwrap_or("")]);

        let params = self.params();
        if params.is_empty() {
            return path;
        }

        let query = params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", form_encode(key), form_encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{path}?{query}")
    }

    /// Sends a GET for the built URL and parses the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for transport, API or parse failures.
    pub async fn get(&self, client: &RestClient) -> Result<Document, ResourceError> {
        let response = client.get(&self.build()).await?;
        Ok(Document::from_body(response.body)?)
    }

    /// Fetches every page of the built URL, following `links.next`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] for the first failing page or a
    /// malformed resource object.
    pub async fn get_all(&self, client: &RestClient) -> Result<ResourceSet, ResourceError> {
        let items = client.get_recursive(&self.build()).await?;
        Ok(ResourceSet::from_values(items)?)
    }
}

/// `urlencoding` escapes a literal `+` as `%2B`, so `%20` maps to `+` safely.
fn form_encode(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+")
}
