//! Catalog collaborator interface
//!
//! A catalog is a hierarchical listing service: groupings at depth 0 are
//! providers, groupings at depth 1 are collections, and items at depth 2
//! are tracks. `LocalCatalog` serves the same layout from a directory tree.

mod local;

use anyhow::Result;
use async_trait::async_trait;

pub use local::LocalCatalog;

/// One level of the catalog
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    pub groupings: Vec<String>,
    pub items: Vec<String>,
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn list(&self, path: &str) -> Result<Listing>;

    /// Resolve a playable, possibly time-limited, URL for an item.
    async fn resolve_locator(&self, item_path: &str) -> Result<String>;
}

/// Builds catalog paths below the configured root prefix
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogPath {
    root: String,
}

impl CatalogPath {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn provider(&self, provider: &str) -> String {
        join(&self.root, provider)
    }

    pub fn collection(&self, provider: &str, collection: &str) -> String {
        join(&self.provider(provider), collection)
    }

    pub fn item(&self, provider: &str, collection: &str, item: &str) -> String {
        join(&self.collection(provider, collection), item)
    }
}

impl Default for CatalogPath {
    fn default() -> Self {
        Self::new("audio")
    }
}

fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}
