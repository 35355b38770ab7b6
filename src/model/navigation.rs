//! Browse state for the provider → collection → track hierarchy

use crate::error::NavigationError;

use super::types::{Collection, DetailedProvider, Provider, Track};

/// Where the user currently is in the hierarchy.
///
/// `CollectionSelected` keeps the provider's collection list so that
/// stepping back does not refetch it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    Root,
    ProviderSelected {
        provider: DetailedProvider,
        collections: Vec<Collection>,
    },
    CollectionSelected {
        provider: DetailedProvider,
        collections: Vec<Collection>,
        collection: String,
        tracks: Vec<Track>,
    },
}

impl NavigationState {
    pub fn provider(&self) -> Option<&DetailedProvider> {
        match self {
            NavigationState::Root => None,
            NavigationState::ProviderSelected { provider, .. }
            | NavigationState::CollectionSelected { provider, .. } => Some(provider),
        }
    }

    pub fn collections(&self) -> &[Collection] {
        match self {
            NavigationState::Root => &[],
            NavigationState::ProviderSelected { collections, .. }
            | NavigationState::CollectionSelected { collections, .. } => collections,
        }
    }

    pub fn collection(&self) -> Option<&str> {
        match self {
            NavigationState::CollectionSelected { collection, .. } => Some(collection),
            _ => None,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        match self {
            NavigationState::CollectionSelected { tracks, .. } => tracks,
            _ => &[],
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NavigationState::Root)
    }

    /// The state one level up, dropping everything below it.
    pub fn parent(&self) -> Option<NavigationState> {
        match self {
            NavigationState::Root => None,
            NavigationState::ProviderSelected { .. } => Some(NavigationState::Root),
            NavigationState::CollectionSelected {
                provider,
                collections,
                ..
            } => Some(NavigationState::ProviderSelected {
                provider: provider.clone(),
                collections: collections.clone(),
            }),
        }
    }
}

/// Read-only view of the navigator handed to the display surface
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigatorSnapshot {
    pub providers: Vec<Provider>,
    pub providers_error: Option<NavigationError>,
    pub state: NavigationState,
    pub loading: bool,
    pub error: Option<NavigationError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detailed(name: &str) -> DetailedProvider {
        DetailedProvider {
            provider: Provider::new(name),
            bio: String::new(),
        }
    }

    #[test]
    fn parent_of_collection_keeps_collections_and_drops_tracks() {
        let collections = Collection::from_listing(vec!["c1".into(), "c2".into()]);
        let state = NavigationState::CollectionSelected {
            provider: detailed("p1"),
            collections: collections.clone(),
            collection: "c1".into(),
            tracks: vec![Track::new("t1.mp3", "u1")],
        };

        let parent = state.parent().unwrap();
        assert_eq!(
            parent,
            NavigationState::ProviderSelected {
                provider: detailed("p1"),
                collections,
            }
        );
        assert!(parent.tracks().is_empty());
        assert_eq!(parent.parent(), Some(NavigationState::Root));
        assert_eq!(NavigationState::Root.parent(), None);
    }
}
