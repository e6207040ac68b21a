//! Inline player control: the single "currently playing" selection.

use super::AppController;

impl AppController {
    /// Select the track at `index` in the active collection and start
    /// playback. Starting is best-effort: a failure (missing player binary,
    /// unplayable stream) is logged and the selection stays set.
    pub(crate) async fn select_track(&self, index: usize) {
        let Some(track) = self.model.track_at(index).await else {
            return;
        };
        tracing::info!(track = %track.title, kind = track.kind.label(), "Track selected");
        self.model.set_now_playing(track.clone()).await;

        let backend = self.player_backend.clone();
        tokio::spawn(async move {
            let mut guard = backend.lock().await;
            match guard.as_mut() {
                Some(player) => {
                    // Starting a new track implicitly stops the previous
                    // one; the backend owns the single playback slot.
                    if let Err(e) = player.play(&track.media.url, track.kind).await {
                        tracing::warn!(track = %track.title, error = %e, "Failed to start playback");
                    }
                }
                None => tracing::warn!("No playback backend available"),
            }
        });
    }

    /// Stop the playback backend. The model's currently-playing selection
    /// is cleared by the selection transitions themselves.
    pub(crate) async fn stop_playback(&self) {
        let mut guard = self.player_backend.lock().await;
        if let Some(player) = guard.as_mut() {
            player.stop().await;
        }
    }
}
