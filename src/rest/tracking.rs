//! Change tracking for relationship mutations.
//!
//! This module provides [`ChangedRelationships`], the ordered set of
//! relationship names that were explicitly set since a resource was loaded
//! (or since its last successful write). It decides which requests
//! [`ResourceIdentifier::delete`](crate::ResourceIdentifier::delete) and the
//! update operations issue.
//!
//! # How It Works
//!
//! Names are recorded in the order they were first changed. Setting the
//! same relationship twice keeps its original position. Reading a
//! relationship never records anything.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_client::ChangedRelationships;
//!
//! let mut changed = ChangedRelationships::new();
//! assert!(changed.is_empty());
//!
//! changed.mark("tags");
//! changed.mark("author");
//! changed.mark("tags");
//!
//! let names: Vec<&str> = changed.iter().collect();
//! assert_eq!(names, vec!["tags", "author"]);
//! ```

/// The ordered, duplicate-free set of changed relationship names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangedRelationships {
    names: Vec<String>,
}

impl ChangedRelationships {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Records `name` as changed.
    ///
    /// Returns `true` if the name was not recorded before.
    pub fn mark(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Returns `true` if `name` has been changed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns `true` if nothing has been changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the number of changed relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Iterates over changed names in the order they were first changed.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Forgets every recorded change.
    ///
    /// Called after all change-driven requests have succeeded.
    pub(crate) fn clear(&mut self) {
        self.names.clear();
    }
}
