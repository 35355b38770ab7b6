//! Model module - Catalog entities and state types
//!
//! - `types`: providers, collections and tracks
//! - `biography`: static biography lookup for providers
//! - `navigation`: browse state machine states and the navigator snapshot
//! - `playback`: now-playing metadata and the republished playback status

mod types;
mod biography;
mod navigation;
mod playback;

pub use types::{Collection, DetailedProvider, Provider, Track};

pub use biography::{Biographies, BIOGRAPHY_FALLBACK};

pub use navigation::{NavigationState, NavigatorSnapshot};

pub use playback::{NowPlaying, PlaybackInfo, PlaybackPhase, PlaybackStatus};
