//! Catalog entities at each level of the browse hierarchy

use crate::format::{format_title, track_title};

const PROVIDER_IMAGE_DIR: &str = "/assets/images/reciters";
const COLLECTION_IMAGE_DIR: &str = "/qari";

/// A top-level content source (a reciter)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub image_url: String,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let image_url = format!("{}/{}.jpg", PROVIDER_IMAGE_DIR, name);
        Self { name, image_url }
    }

    pub fn display_name(&self) -> String {
        format_title(&self.name)
    }
}

/// A provider augmented with its biography, built once per selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailedProvider {
    pub provider: Provider,
    pub bio: String,
}

impl DetailedProvider {
    pub fn name(&self) -> &str {
        &self.provider.name
    }
}

/// A named grouping of tracks under a provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    /// 1-based position in the listing, only meaningful for rendering.
    pub id: usize,
    pub name: String,
    pub image_url: String,
}

impl Collection {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        let name = name.into();
        let image_url = format!("{}/{}.jpg", COLLECTION_IMAGE_DIR, name);
        Self { id, name, image_url }
    }

    /// Build collections from grouping names, numbering them in listing order.
    pub fn from_listing(names: Vec<String>) -> Vec<Self> {
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Self::new(index + 1, name))
            .collect()
    }
}

/// A playable audio item with a freshly resolved locator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    /// Possibly time-limited; re-resolved on every collection fetch.
    pub url: String,
    pub title: String,
}

impl Track {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let title = track_title(&name).to_string();
        Self {
            name,
            url: url.into(),
            title,
        }
    }
}
