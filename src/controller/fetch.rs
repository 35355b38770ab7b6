//! Hierarchical fetch with loading/error/supersession handling
//!
//! All three browse levels go through `Navigator::run_fetch`. Each level
//! is bound to a request slot; beginning a request makes every earlier
//! request on that slot stale, and a stale result is discarded when it
//! arrives regardless of arrival order.

use std::future::Future;

use crate::error::NavigationError;

use super::navigation::NavigatorModel;
use super::Navigator;

/// Identity of one fetch on a request slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestId(u64);

/// Latest request on one level, plus the outcome flags of that request
#[derive(Debug, Default)]
pub(crate) struct RequestSlot {
    current: u64,
    pending: bool,
    pub(crate) error: Option<NavigationError>,
}

impl RequestSlot {
    pub(crate) fn begin(&mut self) -> RequestId {
        self.current += 1;
        self.pending = true;
        self.error = None;
        RequestId(self.current)
    }

    /// Make any outstanding request stale without starting a new one.
    pub(crate) fn invalidate(&mut self) {
        self.current += 1;
        self.pending = false;
        self.error = None;
    }

    pub(crate) fn is_current(&self, request: RequestId) -> bool {
        self.current == request.0
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }

    fn complete(&mut self, error: Option<NavigationError>) {
        self.pending = false;
        self.error = error;
    }
}

/// Depth in the catalog hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Providers,
    Collections,
    Tracks,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Providers => "providers",
            Level::Collections => "collections",
            Level::Tracks => "tracks",
        }
    }
}

/// What happened to a navigation request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetched data is now part of the navigation state.
    Applied,
    /// The data was already present, no fetch was issued.
    Cached,
    /// A newer request replaced this one before it finished.
    Superseded,
    Failed(NavigationError),
    /// The request made no sense in the current state.
    Ignored,
}

impl NavigatorModel {
    fn slot(&mut self, level: Level) -> &mut RequestSlot {
        match level {
            Level::Providers => &mut self.providers_slot,
            Level::Collections => &mut self.collections_slot,
            Level::Tracks => &mut self.tracks_slot,
        }
    }

    /// Start a request at `level`. A new collection request also drops
    /// whatever track request was outstanding.
    pub(super) fn begin(&mut self, level: Level) -> RequestId {
        if level == Level::Collections {
            self.tracks_slot.invalidate();
        }
        self.slot(level).begin()
    }

    /// Drop any in-flight track fetch and clear its flags.
    pub(super) fn cancel_tracks(&mut self) {
        self.tracks_slot.invalidate();
    }

    /// Drop every in-flight browse fetch and clear its flags.
    pub(super) fn cancel_browse(&mut self) {
        self.collections_slot.invalidate();
        self.tracks_slot.invalidate();
    }

    fn finish(&mut self, level: Level, error: Option<NavigationError>) {
        if level == Level::Providers && error.is_some() {
            self.providers.clear();
        }
        self.slot(level).complete(error);
    }
}

impl Navigator {
    /// Await `fetch` and apply its result if `request` is still current.
    pub(super) async fn run_fetch<T, Fut, F>(
        &self,
        level: Level,
        request: RequestId,
        fetch: Fut,
        failure: NavigationError,
        apply: F,
    ) -> FetchOutcome
    where
        Fut: Future<Output = anyhow::Result<T>>,
        F: FnOnce(&mut NavigatorModel, T),
    {
        let result = fetch.await;
        crate::log_catalog_result!(level.as_str(), result);

        let mut model = self.model.lock().await;
        if !model.slot(level).is_current(request) {
            tracing::debug!(fetch = level.as_str(), ?request, "Discarding superseded fetch result");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(value) => {
                apply(&mut model, value);
                model.finish(level, None);
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(fetch = level.as_str(), error = %e, "{}", failure);
                model.finish(level, Some(failure.clone()));
                FetchOutcome::Failed(failure)
            }
        }
    }
}
