//! Listener for audio engine status ticks

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::audio::EngineStatus;
use crate::model::{PlaybackPhase, PlaybackStatus};

use super::playback::{SessionId, SessionInner, StatusEvent};
use super::SessionManager;

impl SessionManager {
    pub(super) fn start_status_listener(&self, mut events: mpsc::UnboundedReceiver<StatusEvent>) {
        let inner = Arc::downgrade(&self.inner);
        tracing::debug!("Starting playback status listener");

        tokio::spawn(async move {
            while let Some((id, status)) = events.recv().await {
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                inner.handle_status(id, status).await;
            }
            tracing::debug!("Playback status listener shutting down");
        });
    }
}

impl SessionInner {
    pub(super) async fn handle_status(&self, id: SessionId, status: EngineStatus) {
        let mut state = self.state.lock().await;

        if state.active.as_ref().map(|session| session.id) != Some(id) {
            tracing::trace!(session = ?id, "Dropping status tick for a released session");
            return;
        }

        if status.did_finish && !status.is_looping {
            tracing::debug!(session = ?id, "Track finished");
            self.stop_locked(&mut state).await;
            return;
        }

        if let Some(session) = state.active.as_mut() {
            session.status = PlaybackStatus::from(&status);
            session.phase = PlaybackPhase::from_status(session.phase, &session.status);
            tracing::trace!(
                session = ?id,
                position_ms = session.status.position_ms,
                is_playing = session.status.is_playing,
                "Status tick"
            );
            let info = session.info();
            self.publish(info);
        }
    }
}
