//! The page store.
//!
//! [`Workspace`] owns the in-memory page collection and writes the whole
//! collection back through its [`Repository`] after every mutation. All
//! mutations run under one lock, so reads, changes and saves never interleave.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_storage::{Page, PageId, PageMap, Repository};

use crate::database::build_row;
use crate::error::SiteError;
use crate::tree::{DEFAULT_MAX_DEPTH, ForestBuilder, TreeError, TreeNode};

/// Title of the page seeded into an empty workspace.
pub const HOME_TITLE: &str = "Home";

/// Content of the page seeded into an empty workspace.
pub const WELCOME_CONTENT: &str = "Welcome to your Folio workspace!";

/// Title used when a page is given a blank title.
pub const UNTITLED: &str = "Untitled";

/// Trim a user-supplied title, falling back to [`UNTITLED`] when blank.
///
/// # Example
///
/// ```
/// use folio_site::normalize_title;
///
/// assert_eq!(normalize_title("  Plans "), "Plans");
/// assert_eq!(normalize_title("   "), "Untitled");
/// ```
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        UNTITLED.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// A page matching a search query.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SearchHit {
    /// Page id.
    pub id: PageId,
    /// Page title.
    pub title: String,
}

/// Page collection with write-through persistence.
///
/// Persistence failures after a mutation are logged and otherwise ignored:
/// the in-memory state stays authoritative and the next successful save
/// catches the file up.
pub struct Workspace {
    repository: Arc<dyn Repository<PageMap>>,
    pages: Mutex<PageMap>,
    max_depth: usize,
}

impl Workspace {
    /// Open the workspace stored in `repository`.
    ///
    /// A missing or corrupt store is replaced by a single "Home" page, which
    /// is saved immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the store exists but cannot be read.
    pub fn open(repository: Arc<dyn Repository<PageMap>>) -> Result<Self, SiteError> {
        let loaded = match repository.load() {
            Ok(pages) => pages,
            Err(e) if e.is_corrupt() => {
                tracing::warn!(error = %e, "Page store is corrupt, starting over");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let workspace = Self {
            repository,
            pages: Mutex::new(PageMap::new()),
            max_depth: DEFAULT_MAX_DEPTH,
        };

        match loaded {
            Some(pages) => {
                tracing::debug!(page_count = pages.len(), "Loaded page store");
                *workspace.lock() = pages;
            }
            None => {
                let mut pages = workspace.lock();
                let id = PageId::generate();
                pages.insert(id.clone(), Page::new(HOME_TITLE).with_content(WELCOME_CONTENT));
                tracing::info!(page_id = %id, "Seeded empty workspace");
                workspace.persist(&pages);
            }
        }

        Ok(workspace)
    }

    /// Set the depth bound used by [`forest`](Self::forest).
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Save the current state and drop the workspace.
    ///
    /// Unlike the saves after each mutation, a failure here is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the final save fails.
    pub fn close(self) -> Result<(), SiteError> {
        let pages = self.lock();
        self.repository.save(&pages)?;
        Ok(())
    }

    /// Fetch a copy of a page.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if no page has this id.
    pub fn get(&self, id: &str) -> Result<Page, SiteError> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SiteError::NotFound(PageId::from(id)))
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the workspace holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the whole page collection, in store order.
    #[must_use]
    pub fn snapshot(&self) -> PageMap {
        self.lock().clone()
    }

    /// Create a page and return its id.
    ///
    /// The title is trimmed and replaced by [`UNTITLED`] when blank. If
    /// `parent` names an existing page the new page is appended to its
    /// children; an unknown parent is ignored and the page becomes a root.
    pub fn create(&self, title: &str, parent: Option<&str>) -> PageId {
        let mut pages = self.lock();
        let id = PageId::generate();
        pages.insert(id.clone(), Page::new(normalize_title(title)));

        if let Some(parent_id) = parent {
            match pages.get_mut(parent_id) {
                Some(parent) => parent.children.push(id.clone()),
                None => tracing::debug!(parent = %parent_id, "Unknown parent, creating root page"),
            }
        }

        tracing::debug!(page_id = %id, "Created page");
        self.persist(&pages);
        id
    }

    /// Append `child` to the children of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if either page does not exist.
    pub fn append_child(&self, parent: &str, child: &str) -> Result<(), SiteError> {
        let mut pages = self.lock();
        let Some((child_id, _)) = pages.get_key_value(child) else {
            return Err(SiteError::NotFound(PageId::from(child)));
        };
        let child_id = child_id.clone();
        let parent_page = pages
            .get_mut(parent)
            .ok_or_else(|| SiteError::NotFound(PageId::from(parent)))?;
        parent_page.children.push(child_id);

        self.persist(&pages);
        Ok(())
    }

    /// Replace the title and content of a page.
    ///
    /// The title follows the same rule as [`create`](Self::create); the
    /// content is stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if no page has this id.
    pub fn update(&self, id: &str, title: &str, content: &str) -> Result<(), SiteError> {
        let mut pages = self.lock();
        let page = pages
            .get_mut(id)
            .ok_or_else(|| SiteError::NotFound(PageId::from(id)))?;
        page.title = normalize_title(title);
        content.clone_into(&mut page.content);

        tracing::debug!(page_id = %id, "Updated page");
        self.persist(&pages);
        Ok(())
    }

    /// Delete a page and every page below it.
    ///
    /// Deleted ids are also removed from the children of the pages that
    /// remain. Returns the number of pages removed; an unknown id removes
    /// nothing.
    pub fn delete(&self, id: &str) -> usize {
        let mut pages = self.lock();
        if !pages.contains_key(id) {
            return 0;
        }

        let doomed = subtree_ids(&pages, id);
        for doomed_id in &doomed {
            pages.shift_remove(doomed_id.as_str());
        }
        for page in pages.values_mut() {
            page.children.retain(|child| !doomed.contains(child));
        }

        tracing::debug!(page_id = %id, removed = doomed.len(), "Deleted page subtree");
        self.persist(&pages);
        doomed.len()
    }

    /// Pages whose title or content contains `query`, ignoring case.
    ///
    /// The query is matched as given, whitespace included. An empty query
    /// matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        self.lock()
            .iter()
            .filter(|(_, page)| {
                page.title.to_lowercase().contains(&needle)
                    || page.content.to_lowercase().contains(&needle)
            })
            .map(|(id, page)| SearchHit {
                id: id.clone(),
                title: page.title.clone(),
            })
            .collect()
    }

    /// Append a row to a page's database.
    ///
    /// See [`build_row`] for how `fields` and `new_column` become a row.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if no page has this id.
    pub fn add_database_row<I, K, V>(
        &self,
        id: &str,
        fields: I,
        new_column: Option<(&str, &str)>,
    ) -> Result<(), SiteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut pages = self.lock();
        let page = pages
            .get_mut(id)
            .ok_or_else(|| SiteError::NotFound(PageId::from(id)))?;
        page.database.push(build_row(fields, new_column));

        tracing::debug!(page_id = %id, rows = page.database.len(), "Added database row");
        self.persist(&pages);
        Ok(())
    }

    /// Build the page tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CycleDetected`] if the child references loop.
    pub fn forest(&self) -> Result<Vec<TreeNode>, TreeError> {
        let pages = self.lock();
        ForestBuilder::new(&pages).max_depth(self.max_depth).build()
    }

    fn lock(&self) -> MutexGuard<'_, PageMap> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, pages: &PageMap) {
        if let Err(e) = self.repository.save(pages) {
            tracing::warn!(error = %e, "Failed to save pages");
        }
    }
}

/// Ids of `root` and every page reachable below it, each listed once.
fn subtree_ids(pages: &PageMap, root: &str) -> HashSet<PageId> {
    let mut seen = HashSet::new();
    let mut stack = vec![PageId::from(root)];

    while let Some(id) = stack.pop() {
        if seen.contains(&id) {
            continue;
        }
        let Some(page) = pages.get(id.as_str()) else {
            continue;
        };
        stack.extend(page.children.iter().cloned());
        seen.insert(id);
    }

    seen
}
