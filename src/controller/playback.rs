//! Playback session management
//!
//! `SessionManager` owns at most one live audio resource. Every mutation of
//! the session goes through the `state` mutex, and `play` holds it from
//! teardown of the previous resource until the new one is acquired, so
//! overlapping `play` calls run one after another.

use std::sync::Arc;

use tokio::sync::{mpsc, watch, Mutex};

use crate::audio::{AcquireOptions, AudioEngine, AudioHandle, EngineStatus};
use crate::error::PlaybackError;
use crate::model::{NowPlaying, PlaybackInfo, PlaybackPhase, PlaybackStatus, Track};

/// Identity of one acquired resource, used to tag its status ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionId(u64);

pub(super) type StatusEvent = (SessionId, EngineStatus);

pub(super) struct ActiveSession {
    pub(super) id: SessionId,
    now_playing: NowPlaying,
    handle: Box<dyn AudioHandle>,
    pub(super) status: PlaybackStatus,
    pub(super) phase: PlaybackPhase,
}

impl ActiveSession {
    pub(super) fn info(&self) -> PlaybackInfo {
        PlaybackInfo {
            phase: self.phase,
            now_playing: Some(self.now_playing.clone()),
            status: self.status,
            error: None,
        }
    }
}

#[derive(Default)]
pub(super) struct SessionState {
    pub(super) active: Option<ActiveSession>,
    next_id: u64,
}

impl SessionState {
    fn next_session_id(&mut self) -> SessionId {
        self.next_id += 1;
        SessionId(self.next_id)
    }
}

pub(super) struct SessionInner {
    engine: Arc<dyn AudioEngine>,
    pub(super) state: Mutex<SessionState>,
    info_tx: watch::Sender<PlaybackInfo>,
    events_tx: mpsc::UnboundedSender<StatusEvent>,
}

impl SessionInner {
    pub(super) fn publish(&self, info: PlaybackInfo) {
        self.info_tx.send_if_modified(|current| {
            if *current == info {
                false
            } else {
                *current = info;
                true
            }
        });
    }

    /// Release the active resource, if any, and publish an idle status.
    pub(super) async fn stop_locked(&self, state: &mut SessionState) {
        if let Some(session) = state.active.take() {
            tracing::info!(title = %session.now_playing.title, "Stopping playback");
            release(session).await;
        }
        self.publish(PlaybackInfo::default());
    }
}

/// Unregister the status callback, then stop and unload. Failures are
/// logged and otherwise ignored so a stuck resource never blocks the next one.
async fn release(session: ActiveSession) {
    session.handle.set_on_status(None);

    if let Err(source) = session.handle.stop().await {
        let err = PlaybackError::AudioTeardownFailed { step: "stop", source };
        tracing::warn!(session = ?session.id, error = ?err, "Teardown step failed");
    }
    if let Err(source) = session.handle.unload().await {
        let err = PlaybackError::AudioTeardownFailed { step: "unload", source };
        tracing::warn!(session = ?session.id, error = ?err, "Teardown step failed");
    }
    tracing::debug!(session = ?session.id, url = %session.now_playing.url, "Released audio resource");
}

/// Single owner of the live playback session.
///
/// Cloning yields another handle to the same session. Must be created
/// inside a Tokio runtime, since it spawns the status listener.
///
/// Dropping the last handle does not stop or unload a live resource; call
/// [`SessionManager::shutdown`] (or `stop`) first.
#[derive(Clone)]
pub struct SessionManager {
    pub(super) inner: Arc<SessionInner>,
}

impl SessionManager {
    pub fn new(engine: Arc<dyn AudioEngine>) -> Self {
        let (info_tx, _) = watch::channel(PlaybackInfo::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let manager = Self {
            inner: Arc::new(SessionInner {
                engine,
                state: Mutex::new(SessionState::default()),
                info_tx,
                events_tx,
            }),
        };
        manager.start_status_listener(events_rx);
        manager
    }

    /// Latest published playback information.
    pub fn info(&self) -> PlaybackInfo {
        self.inner.info_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackInfo> {
        self.inner.info_tx.subscribe()
    }

    /// Replace whatever is playing with `track`.
    pub async fn play(&self, track: &Track, provider: &str, collection: &str) -> Result<(), PlaybackError> {
        let mut state = self.inner.state.lock().await;
        tracing::info!(title = %track.title, provider, collection, "Starting playback");

        self.inner.publish(PlaybackInfo {
            phase: PlaybackPhase::Loading,
            ..PlaybackInfo::default()
        });

        if let Some(previous) = state.active.take() {
            tracing::debug!(session = ?previous.id, "Replacing active session");
            release(previous).await;
        }

        let id = state.next_session_id();
        let options = AcquireOptions { autoplay: true };
        match self.inner.engine.acquire(&track.url, options).await {
            Ok(handle) => {
                let events = self.inner.events_tx.clone();
                handle.set_on_status(Some(Box::new(move |status| {
                    let _ = events.send((id, status));
                })));

                let session = ActiveSession {
                    id,
                    now_playing: NowPlaying {
                        title: track.title.clone(),
                        url: track.url.clone(),
                        provider: provider.to_string(),
                        collection: collection.to_string(),
                    },
                    handle,
                    status: PlaybackStatus {
                        is_playing: options.autoplay,
                        ..PlaybackStatus::default()
                    },
                    phase: PlaybackPhase::Playing,
                };
                self.inner.publish(session.info());
                state.active = Some(session);
                tracing::debug!(session = ?id, "Playback session established");
                Ok(())
            }
            Err(source) => {
                tracing::error!(url = %track.url, error = %source, "Audio acquisition failed");
                let err = PlaybackError::AudioAcquisitionFailed {
                    url: track.url.clone(),
                    source,
                };
                self.inner.publish(PlaybackInfo {
                    error: Some(err.to_string()),
                    ..PlaybackInfo::default()
                });
                Err(err)
            }
        }
    }

    pub async fn toggle_play_pause(&self) -> Result<(), PlaybackError> {
        let mut state = self.inner.state.lock().await;
        let Some(session) = state.active.as_mut() else {
            tracing::debug!("Toggle requested with no active session");
            return Ok(());
        };

        let resume = !session.status.is_playing;
        let (command, result) = if resume {
            ("play", session.handle.play().await)
        } else {
            ("pause", session.handle.pause().await)
        };

        match result {
            Ok(()) => {
                session.status.is_playing = resume;
                session.phase = if resume {
                    PlaybackPhase::Playing
                } else {
                    PlaybackPhase::Paused
                };
                let info = session.info();
                self.inner.publish(info);
                tracing::info!(action = if resume { "resumed" } else { "paused" }, "Playback toggled");
                Ok(())
            }
            Err(source) => {
                tracing::error!(command, error = %source, "Toggle playback failed");
                Err(PlaybackError::EngineCommand { command, source })
            }
        }
    }

    /// Seek to `fraction` of the track, clamped to `[0, 1]`.
    ///
    /// Returns the target position, or `None` when there is no session or
    /// the duration is not known yet.
    pub async fn seek(&self, fraction: f64) -> Result<Option<u64>, PlaybackError> {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };

        let state = self.inner.state.lock().await;
        let Some(session) = state.active.as_ref() else {
            return Ok(None);
        };
        if session.status.duration_ms == 0 {
            tracing::debug!("Seek requested before duration is known");
            return Ok(None);
        }

        let position_ms = (fraction * session.status.duration_ms as f64).round() as u64;
        tracing::debug!(fraction, position_ms, "Seeking");
        session
            .handle
            .seek(position_ms)
            .await
            .map_err(|source| PlaybackError::EngineCommand { command: "seek", source })?;
        Ok(Some(position_ms))
    }

    /// Stop and release the current resource. Safe to call repeatedly.
    pub async fn stop(&self) {
        let mut state = self.inner.state.lock().await;
        self.inner.stop_locked(&mut state).await;
    }

    /// Release the live resource and give up this handle.
    pub async fn shutdown(self) {
        tracing::debug!("Shutting down playback session manager");
        self.stop().await;
    }
}
