//! Catalog navigation (providers, collections, tracks)

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::catalog::{Catalog, CatalogPath, Listing};
use crate::error::NavigationError;
use crate::model::{
    Biographies, Collection, DetailedProvider, NavigationState, NavigatorSnapshot, Provider, Track,
};

use super::fetch::{FetchOutcome, Level, RequestSlot};

#[derive(Debug, Default)]
pub(crate) struct NavigatorModel {
    pub(crate) providers: Vec<Provider>,
    pub(crate) state: NavigationState,
    pub(crate) providers_slot: RequestSlot,
    pub(crate) collections_slot: RequestSlot,
    pub(crate) tracks_slot: RequestSlot,
}

impl NavigatorModel {
    /// Browse flags come from the slot of the level being displayed.
    pub(super) fn snapshot(&self) -> NavigatorSnapshot {
        let displayed = match self.state {
            NavigationState::Root => None,
            NavigationState::ProviderSelected { .. } => Some(&self.collections_slot),
            NavigationState::CollectionSelected { .. } => Some(&self.tracks_slot),
        };
        NavigatorSnapshot {
            providers: self.providers.clone(),
            providers_error: self.providers_slot.error.clone(),
            state: self.state.clone(),
            loading: displayed.is_some_and(RequestSlot::is_pending),
            error: displayed.and_then(|slot| slot.error.clone()),
        }
    }
}

/// Drives the provider → collection → track browse state machine.
///
/// Clones share the same state. The state lock is never held while the
/// catalog is being queried.
#[derive(Clone)]
pub struct Navigator {
    pub(super) model: Arc<Mutex<NavigatorModel>>,
    catalog: Arc<dyn Catalog>,
    biographies: Arc<Biographies>,
    paths: CatalogPath,
}

impl Navigator {
    pub fn new(catalog: Arc<dyn Catalog>, biographies: Arc<Biographies>, paths: CatalogPath) -> Self {
        Self {
            model: Arc::new(Mutex::new(NavigatorModel::default())),
            catalog,
            biographies,
            paths,
        }
    }

    pub async fn snapshot(&self) -> NavigatorSnapshot {
        self.model.lock().await.snapshot()
    }

    pub async fn list_providers(&self) -> Result<Vec<Provider>, NavigationError> {
        let request = self.model.lock().await.begin(Level::Providers);
        let root = self.paths.root().to_string();
        crate::log_catalog_request!("list_providers", path = %root);

        let outcome = self
            .run_fetch(
                Level::Providers,
                request,
                self.catalog.list(&root),
                NavigationError::CatalogUnavailable,
                |model, listing: Listing| {
                    tracing::info!(count = listing.groupings.len(), "Loaded providers");
                    model.providers = listing.groupings.into_iter().map(Provider::new).collect();
                },
            )
            .await;

        match outcome {
            FetchOutcome::Failed(e) => Err(e),
            _ => Ok(self.model.lock().await.providers.clone()),
        }
    }

    pub async fn select_provider(&self, provider: Provider) -> FetchOutcome {
        let request = {
            let mut model = self.model.lock().await;

            let already_loaded = model
                .state
                .provider()
                .is_some_and(|current| current.name() == provider.name)
                && !model.state.collections().is_empty();
            if already_loaded {
                tracing::debug!(provider = %provider.name, "Collections already loaded, skipping fetch");
                if let NavigationState::CollectionSelected { .. } = model.state {
                    if let Some(parent) = model.state.parent() {
                        model.state = parent;
                    }
                }
                model.cancel_tracks();
                return FetchOutcome::Cached;
            }

            tracing::debug!(provider = %provider.name, "Selecting provider");
            let bio = self.biographies.lookup(&provider.name).to_string();
            model.state = NavigationState::ProviderSelected {
                provider: DetailedProvider {
                    provider: provider.clone(),
                    bio,
                },
                collections: Vec::new(),
            };
            model.begin(Level::Collections)
        };

        let path = self.paths.provider(&provider.name);
        crate::log_catalog_request!("list_collections", path = %path);

        self.run_fetch(
            Level::Collections,
            request,
            self.catalog.list(&path),
            NavigationError::CollectionListUnavailable {
                provider: provider.name.clone(),
            },
            |model, listing: Listing| match &mut model.state {
                // A collection may already have been opened while this was loading.
                NavigationState::ProviderSelected { collections, .. }
                | NavigationState::CollectionSelected { collections, .. } => {
                    *collections = Collection::from_listing(listing.groupings);
                    tracing::info!(
                        provider = %provider.name,
                        count = collections.len(),
                        "Loaded collections"
                    );
                }
                NavigationState::Root => {}
            },
        )
        .await
    }

    pub async fn select_collection(&self, collection: &str) -> FetchOutcome {
        let (request, provider) = {
            let mut model = self.model.lock().await;

            let Some(provider) = model.state.provider().cloned() else {
                tracing::warn!(collection, "Collection selected with no provider, ignoring");
                return FetchOutcome::Ignored;
            };

            let known = model.state.collections().iter().any(|c| c.name == collection);
            if !known && !model.collections_slot.is_pending() {
                tracing::warn!(provider = %provider.name(), collection, "Unknown collection, ignoring");
                return FetchOutcome::Ignored;
            }

            tracing::debug!(provider = %provider.name(), collection, "Selecting collection");
            let collections = model.state.collections().to_vec();
            let name = provider.name().to_string();
            model.state = NavigationState::CollectionSelected {
                provider,
                collections,
                collection: collection.to_string(),
                tracks: Vec::new(),
            };
            (model.begin(Level::Tracks), name)
        };

        crate::log_catalog_request!("list_tracks", provider = %provider, collection);

        self.run_fetch(
            Level::Tracks,
            request,
            self.fetch_tracks(&provider, collection),
            NavigationError::TrackListUnavailable {
                provider: provider.clone(),
                collection: collection.to_string(),
            },
            |model, fetched: Vec<Track>| {
                if let NavigationState::CollectionSelected { tracks, .. } = &mut model.state {
                    tracing::info!(provider = %provider, collection, count = fetched.len(), "Loaded tracks");
                    *tracks = fetched;
                }
            },
        )
        .await
    }

    /// Step one level up. Returns `false` at the root.
    pub async fn go_back(&self) -> bool {
        let mut model = self.model.lock().await;
        let Some(parent) = model.state.parent() else {
            return false;
        };

        tracing::debug!(to_root = parent.is_root(), "Navigating back");
        if parent.is_root() {
            model.cancel_browse();
        } else {
            model.cancel_tracks();
        }
        model.state = parent;
        true
    }

    /// List a collection and resolve every item independently. Items whose
    /// locator cannot be resolved are dropped.
    async fn fetch_tracks(&self, provider: &str, collection: &str) -> anyhow::Result<Vec<Track>> {
        let listing = self
            .catalog
            .list(&self.paths.collection(provider, collection))
            .await?;
        let total = listing.items.len();

        let resolutions = listing.items.into_iter().map(|item| async move {
            let item_path = self.paths.item(provider, collection, &item);
            match self.catalog.resolve_locator(&item_path).await {
                Ok(url) => Some(Track::new(item, url)),
                Err(e) => {
                    let err = NavigationError::LocatorResolutionFailed { item: item_path };
                    tracing::warn!(error = %e, "{}, dropping item", err);
                    None
                }
            }
        });

        let tracks: Vec<Track> = join_all(resolutions).await.into_iter().flatten().collect();
        if tracks.len() < total {
            tracing::debug!(dropped = total - tracks.len(), total, "Some tracks were dropped");
        }
        Ok(tracks)
    }
}
