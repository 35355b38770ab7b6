//! Playback-related types republished to the display surface

use crate::audio::EngineStatus;
use crate::format::{format_time, format_title};

const NO_AUDIO_TITLE: &str = "No audio playing";

/// The track bound to the live session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub url: String,
    pub provider: String,
    pub collection: String,
}

/// Simplified status derived from each engine tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub position_ms: u64,
    /// Zero while the engine has not reported a duration.
    pub duration_ms: u64,
    pub is_playing: bool,
    pub is_buffering: bool,
}

impl From<&EngineStatus> for PlaybackStatus {
    fn from(status: &EngineStatus) -> Self {
        Self {
            position_ms: status.position_ms,
            duration_ms: status.duration_ms.unwrap_or(0),
            is_playing: status.is_playing,
            is_buffering: status.is_buffering,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

impl PlaybackPhase {
    /// Phase implied by an engine tick for a live session.
    pub fn from_status(current: PlaybackPhase, status: &PlaybackStatus) -> Self {
        if status.is_playing {
            PlaybackPhase::Playing
        } else if status.is_buffering {
            current
        } else {
            PlaybackPhase::Paused
        }
    }
}

/// Complete playback information for rendering the player
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackInfo {
    pub phase: PlaybackPhase,
    pub now_playing: Option<NowPlaying>,
    pub status: PlaybackStatus,
    pub error: Option<String>,
}

impl PlaybackInfo {
    pub fn is_active(&self) -> bool {
        self.now_playing.is_some()
    }

    pub fn display_title(&self) -> &str {
        self.now_playing
            .as_ref()
            .map(|np| np.title.as_str())
            .unwrap_or(NO_AUDIO_TITLE)
    }

    pub fn display_provider(&self) -> String {
        self.now_playing
            .as_ref()
            .map(|np| format_title(&np.provider))
            .unwrap_or_default()
    }

    /// Position as a fraction of the duration, for a seek slider.
    pub fn seek_fraction(&self) -> f64 {
        if self.status.duration_ms > 0 {
            (self.status.position_ms as f64 / self.status.duration_ms as f64).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.status.position_ms)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.status.duration_ms)
    }
}
