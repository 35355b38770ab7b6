//! Audio engine collaborator interface.
//!
//! The engine decodes and outputs audio; this crate only drives it through
//! these traits and never touches a device directly.

use anyhow::Result;
use async_trait::async_trait;

/// Raw status reported by the engine on every tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStatus {
    pub position_ms: u64,
    /// `None` until the engine knows the length of the resource.
    pub duration_ms: Option<u64>,
    pub is_playing: bool,
    pub is_buffering: bool,
    pub did_finish: bool,
    pub is_looping: bool,
}

pub type StatusCallback = Box<dyn Fn(EngineStatus) + Send + Sync>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcquireOptions {
    pub autoplay: bool,
}

#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Load the resource at `url` and return a handle to it.
    async fn acquire(&self, url: &str, options: AcquireOptions) -> Result<Box<dyn AudioHandle>>;
}

/// A live audio resource owned by exactly one playback session
#[async_trait]
pub trait AudioHandle: Send + Sync {
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn seek(&self, position_ms: u64) -> Result<()>;
    async fn stop(&self) -> Result<()>;
    async fn unload(&self) -> Result<()>;
    /// Install or clear the status callback. At most one is registered.
    fn set_on_status(&self, callback: Option<StatusCallback>);
}
