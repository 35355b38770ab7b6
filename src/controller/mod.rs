//! Controller module - Navigation and playback logic
//!
//! - `fetch`: shared fetch primitive with loading/error/supersession handling
//! - `navigation`: the catalog navigator state machine
//! - `playback`: the single-session playback manager
//! - `player_events`: audio engine status listener

mod fetch;
mod navigation;
mod playback;
mod player_events;

use std::sync::Arc;

use anyhow::Result;

use crate::audio::AudioEngine;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::PlaybackError;
use crate::model::Track;

pub use fetch::{FetchOutcome, Level, RequestId};
pub use navigation::Navigator;
pub use playback::{SessionId, SessionManager};

/// Composes the navigator and the session manager the way the display
/// surface uses them. The two never call each other directly.
#[derive(Clone)]
pub struct AppController {
    pub navigator: Navigator,
    pub sessions: SessionManager,
}

impl AppController {
    pub fn new(config: &Config, catalog: Arc<dyn Catalog>, engine: Arc<dyn AudioEngine>) -> Result<Self> {
        let biographies = Arc::new(config.biographies()?);
        Ok(Self {
            navigator: Navigator::new(catalog, biographies, config.catalog_path()),
            sessions: SessionManager::new(engine),
        })
    }

    /// Play a track from the current listing, tagged with the navigator's
    /// current provider and collection.
    pub async fn play_track(&self, track: &Track) -> Result<(), PlaybackError> {
        let snapshot = self.navigator.snapshot().await;
        let provider = snapshot
            .state
            .provider()
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        let collection = snapshot.state.collection().unwrap_or_default().to_string();
        self.sessions.play(track, &provider, &collection).await
    }
}
