//! Path building for JSON:API resources.
//!
//! Every path produced here is relative to the configured API URL, has no
//! leading or trailing slash, and never contains empty segments.
//!
//! | Function | Path |
//! |----------|------|
//! | [`resource_path`] | `{type}/{id}` |
//! | [`related_path`] | `{type}/{id}/{name}` |
//! | [`relationship_path`] | `{type}/{id}/relationships/{name}` |
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::rest::{join_segments, relationship_path};
//!
//! assert_eq!(join_segments(["/articles/", "1"]), "articles/1");
//! assert_eq!(
//!     relationship_path("articles", "1", "author"),
//!     "articles/1/relationships/author"
//! );
//! ```

/// Joins path segments with single slashes.
///
/// Leading, trailing and repeated slashes inside each segment are dropped,
/// so the result never contains `//`.
#[must_use]
pub fn join_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .flat_map(|segment| segment.split('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the path of a single resource: `{type}/{id}`.
#[must_use]
pub fn resource_path(resource_type: &str, id: &str) -> String {
    join_segments([resource_type, id])
}

/// Returns the path of a related resource collection: `{type}/{id}/{name}`.
#[must_use]
pub fn related_path(resource_type: &str, id: &str, name: &str) -> String {
    join_segments([resource_type, id, name])
}

/// Returns the path of a relationship endpoint:
/// `{type}/{id}/relationships/{name}`.
#[must_use]
pub fn relationship_path(resource_type: &str, id: &str, name: &str) -> String {
    join_segments([resource_type, id, "relationships", name])
}
