//! Page tree reconstruction.
//!
//! Pages only know their children. The tree shown in the sidebar is rebuilt
//! from those flat references: every page that no other page lists as a child
//! is a root, and roots are expanded recursively in child order.

use std::collections::HashSet;

use folio_storage::{Page, PageId, PageMap};
use serde::Serialize;

/// Default bound on the depth of a root-to-leaf path.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Error building the page tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A page was reached again from its own descendants, or the path grew
    /// deeper than the configured bound.
    #[error("Cycle detected at page {id} (depth {depth})")]
    CycleDetected {
        /// Page at which traversal stopped.
        id: PageId,
        /// Path depth at that page, counting the root as 1.
        depth: usize,
    },
}

/// Node of the page tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Page id.
    pub id: PageId,
    /// Page title.
    pub title: String,
    /// Child nodes in presentation order.
    pub children: Vec<TreeNode>,
}

/// Ids of pages not listed as a child by any page, in store order.
#[must_use]
pub fn root_ids(pages: &PageMap) -> Vec<&PageId> {
    let referenced: HashSet<&str> = pages
        .values()
        .flat_map(|page| page.children.iter().map(PageId::as_str))
        .collect();

    pages
        .keys()
        .filter(|id| !referenced.contains(id.as_str()))
        .collect()
}

/// Build the page forest with the default depth bound.
///
/// # Example
///
/// ```
/// use folio_site::build_forest;
/// use folio_storage::{Page, PageId, PageMap};
///
/// let mut pages = PageMap::new();
/// pages.insert(PageId::from("a"), Page::new("A").with_children(["b", "gone"]));
/// pages.insert(PageId::from("b"), Page::new("B"));
///
/// let forest = build_forest(&pages).unwrap();
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].children[0].title, "B");
/// ```
pub fn build_forest(pages: &PageMap) -> Result<Vec<TreeNode>, TreeError> {
    ForestBuilder::new(pages).build()
}

/// Configurable forest builder.
#[derive(Clone, Copy, Debug)]
pub struct ForestBuilder<'a> {
    pages: &'a PageMap,
    max_depth: usize,
}

impl<'a> ForestBuilder<'a> {
    /// Create a builder over `pages` with [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new(pages: &'a PageMap) -> Self {
        Self {
            pages,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum path depth. Values below 1 are raised to 1.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Build the forest.
    ///
    /// Dangling child references are skipped. A page reachable from several
    /// parents appears under each of them.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CycleDetected`] if a page appears twice on one
    /// root-to-leaf path or a path exceeds the depth bound.
    pub fn build(&self) -> Result<Vec<TreeNode>, TreeError> {
        let pages: &'a PageMap = self.pages;
        let mut path = HashSet::new();

        root_ids(pages)
            .into_iter()
            .map(|id| self.build_node(id, &pages[id], 1, &mut path))
            .collect()
    }

    fn build_node(
        &self,
        id: &'a PageId,
        page: &'a Page,
        depth: usize,
        path: &mut HashSet<&'a str>,
    ) -> Result<TreeNode, TreeError> {
        if depth > self.max_depth {
            return Err(TreeError::CycleDetected {
                id: id.clone(),
                depth,
            });
        }

        path.insert(id.as_str());
        let pages: &'a PageMap = self.pages;
        let mut children = Vec::with_capacity(page.children.len());
        for child_id in &page.children {
            let Some((child_id, child)) = pages.get_key_value(child_id.as_str()) else {
                continue;
            };
            if path.contains(child_id.as_str()) {
                tracing::debug!(
                    page_id = %child_id,
                    depth = depth + 1,
                    "Page revisited on its own path"
                );
                return Err(TreeError::CycleDetected {
                    id: child_id.clone(),
                    depth: depth + 1,
                });
            }
            children.push(self.build_node(child_id, child, depth + 1, path)?);
        }
        path.remove(id.as_str());

        Ok(TreeNode {
            id: id.clone(),
            title: page.title.clone(),
            children,
        })
    }
}
