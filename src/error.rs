//! Error taxonomy for the navigator and the playback session manager.
//!
//! Collaborators report failures as `anyhow::Error`; the components wrap
//! them into these types at their boundary.

use thiserror::Error;

/// Failures surfaced by the catalog navigator.
///
/// Listing-level errors end up in the navigator snapshot as a flag, they
/// never propagate as panics. `LocatorResolutionFailed` is per-item and
/// only ever logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("catalog unavailable")]
    CatalogUnavailable,
    #[error("failed to list collections for provider {provider}")]
    CollectionListUnavailable { provider: String },
    #[error("failed to list tracks for {provider}/{collection}")]
    TrackListUnavailable { provider: String, collection: String },
    #[error("failed to resolve locator for {item}")]
    LocatorResolutionFailed { item: String },
}

impl NavigationError {
    /// Message suitable for the display surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            NavigationError::CatalogUnavailable => "Failed to fetch reciters.",
            NavigationError::CollectionListUnavailable { .. } => "Failed to fetch reciter details.",
            NavigationError::TrackListUnavailable { .. } => "Failed to fetch collection details.",
            NavigationError::LocatorResolutionFailed { .. } => "Failed to fetch download URL.",
        }
    }
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to acquire audio for {url}")]
    AudioAcquisitionFailed {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to {step} audio resource")]
    AudioTeardownFailed {
        step: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("audio engine rejected {command}")]
    EngineCommand {
        command: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
