//! Directory-backed catalog

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use super::{Catalog, Listing};

/// Serves a catalog from a directory tree: subdirectories are groupings,
/// regular files are items. Entries are returned sorted by name.
#[derive(Clone, Debug)]
pub struct LocalCatalog {
    base: PathBuf,
}

impl LocalCatalog {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            bail!("catalog path escapes the catalog base: {}", path);
        }
        Ok(self.base.join(relative))
    }
}

#[async_trait]
impl Catalog for LocalCatalog {
    async fn list(&self, path: &str) -> Result<Listing> {
        let dir = self.resolve(path)?;
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .with_context(|| format!("listing {}", dir.display()))?;

        let mut listing = Listing::default();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                listing.groupings.push(name);
            } else if file_type.is_file() {
                listing.items.push(name);
            }
        }
        listing.groupings.sort();
        listing.items.sort();

        tracing::trace!(
            path,
            groupings = listing.groupings.len(),
            items = listing.items.len(),
            "Listed local catalog directory"
        );
        Ok(listing)
    }

    async fn resolve_locator(&self, item_path: &str) -> Result<String> {
        let file = self.resolve(item_path)?;
        let metadata = tokio::fs::metadata(&file)
            .await
            .with_context(|| format!("resolving {}", file.display()))?;
        if !metadata.is_file() {
            bail!("{} is not a playable file", file.display());
        }
        let absolute = tokio::fs::canonicalize(&file).await?;
        Ok(file_url(&absolute))
    }
}

/// `file://` URL for an absolute path, each segment percent-encoded.
fn file_url(absolute: &Path) -> String {
    let segments: Vec<String> = absolute
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => {
                Some(urlencoding::encode(&segment.to_string_lossy()).into_owned())
            }
            _ => None,
        })
        .collect();
    format!("file:///{}", segments.join("/"))
}
