//! Page lookup boundary between the render engine and page storage.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read site fixture: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Page lookups the render engine needs from the surrounding application.
///
/// The engine is injected with an implementation rather than reaching into a
/// datastore directly, so template resolution and link validation stay
/// deterministic under test.
pub trait PageRepository {
    /// Raw content of the page at `slug`, or `None` if no such page.
    ///
    /// With `Some(owner)` the lookup is strictly scoped to that user's
    /// namespace; callers that want cross-namespace fallback compose it from
    /// a second `find(None, ..)` call. With `None` the slug is looked up
    /// globally across all namespaces.
    fn find(&self, owner: Option<&str>, slug: &str) -> Option<String>;

    /// Whether a user with this name exists.
    fn user_exists(&self, username: &str) -> bool;

    /// All of `owner`'s page slugs mapped to their titles.
    ///
    /// Empty when the user does not exist or owns no pages.
    fn slugs_of(&self, owner: &str) -> HashMap<String, String>;
}

/// A wiki page as stored in a site fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: String,
    pub content: String,
}

/// In-memory [`PageRepository`] backed by ordered maps.
///
/// Used by tests and the CLI in place of the real datastore. The maps are
/// ordered so that global slug lookups resolve deterministically when two
/// users happen to own the same slug.
///
/// Deserializes from a YAML site fixture of the shape:
///
/// ```yaml
/// users:
///   alice:
///     home:
///       title: Home
///       content: "Welcome to [[sandbox]]."
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryRepository {
    #[serde(default)]
    users: BTreeMap<String, BTreeMap<String, Page>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with no pages yet.
    pub fn add_user(&mut self, username: &str) {
        self.users.entry(username.to_string()).or_default();
    }

    /// Insert a page, creating its owner if needed.
    pub fn add_page(&mut self, owner: &str, slug: &str, title: &str, content: &str) {
        self.users.entry(owner.to_string()).or_default().insert(
            slug.to_string(),
            Page {
                title: title.to_string(),
                content: content.to_string(),
            },
        );
    }

    pub fn from_yaml(src: &str) -> Result<Self, FixtureError> {
        Ok(serde_yaml::from_str(src)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }
}

impl PageRepository for MemoryRepository {
    fn find(&self, owner: Option<&str>, slug: &str) -> Option<String> {
        match owner {
            Some(owner) => self
                .users
                .get(owner)?
                .get(slug)
                .map(|page| page.content.clone()),
            None => self
                .users
                .values()
                .find_map(|pages| pages.get(slug))
                .map(|page| page.content.clone()),
        }
    }

    fn user_exists(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    fn slugs_of(&self, owner: &str) -> HashMap<String, String> {
        self.users
            .get(owner)
            .map(|pages| {
                pages
                    .iter()
                    .map(|(slug, page)| (slug.clone(), page.title.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
