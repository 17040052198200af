//! Domain identifier types for puzzle boards and search-tree paths.
//!
//! These types provide type-safe wrappers around the string identifiers used
//! throughout the search engine. A [`BoardKey`] identifies a tile
//! configuration regardless of how it was reached; a [`PathId`] identifies a
//! configuration *together with the path taken to reach it*, which is what
//! keys nodes in the search tree (the same board can appear several times in
//! a tree, once per distinct path).

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Canonical identifier for a board configuration, ignoring the path taken.
///
/// Used to key closed sets and discovered sets during a search.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardKey(String);

impl BoardKey {
    /// Create a new board key.
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzlegraph::identifiers::BoardKey;
    ///
    /// let key = BoardKey::new("123456780");
    /// assert_eq!(key.as_str(), "123456780");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the key into its inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for BoardKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for BoardKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BoardKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for BoardKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Path-qualified identifier for a state in the search tree.
///
/// Formed by concatenating the board key of every ancestor from the root down
/// to the state itself, separated by `:`. Two states with equal boards but
/// different ancestries get distinct `PathId`s, so the board→node map can
/// hold one entry per tree node even when boards repeat.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathId(String);

impl PathId {
    /// Create a new path identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzlegraph::identifiers::PathId;
    ///
    /// let id = PathId::new("123456780:123456708");
    /// assert_eq!(id.as_str(), "123456780:123456708");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the identifier into its inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for PathId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for PathId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for PathId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for PathId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
