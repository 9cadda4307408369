//! Page records.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Opaque, globally unique page identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Generate a fresh identifier (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for PageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a page database: column name to value, in column order.
pub type DatabaseRow = IndexMap<String, String>;

/// All pages of a workspace keyed by id, in insertion order.
pub type PageMap = IndexMap<PageId, Page>;

/// A page record as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Display title. Never blank for pages created through the workspace.
    pub title: String,
    /// Raw content, stored verbatim.
    #[serde(default)]
    pub content: String,
    /// Child page ids in presentation order.
    #[serde(default)]
    pub children: Vec<PageId>,
    /// Rows of the page's table.
    #[serde(default)]
    pub database: Vec<DatabaseRow>,
}

impl Page {
    /// Create an empty page with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the page content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Append child ids.
    #[must_use]
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PageId>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}
