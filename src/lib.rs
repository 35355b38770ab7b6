//! Core of a recitation browsing and playback client.
//!
//! The crate is headless: a display surface renders [`model::NavigatorSnapshot`]
//! and [`model::PlaybackInfo`] and calls into [`controller::Navigator`] and
//! [`controller::SessionManager`]. The remote catalog and the audio device
//! are reached through the [`catalog::Catalog`] and [`audio::AudioEngine`]
//! traits.

pub mod audio;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::{AppController, FetchOutcome, Navigator, SessionManager};
pub use error::{NavigationError, PlaybackError};
