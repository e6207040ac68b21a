//! Playback backend: the single process-wide playback slot.
//!
//! Tracks are played through an external media player process (`mpv` by
//! default, override with `PORTFOLIO_PLAYER`). Exactly one child process
//! exists at a time; starting a new track stops the previous one first, and
//! the slot is released on every exit path: explicit stop, replacement, or
//! drop of the backend.

use anyhow::{Context, Result};
use std::process::Stdio;
use tokio::process::{Child, Command};

use crate::model::MediaKind;

pub const DEFAULT_PLAYER_BIN: &str = "mpv";

pub struct PlayerBackend {
    binary: String,
    child: Option<Child>,
}

impl PlayerBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into(), child: None }
    }

    /// Build from `PORTFOLIO_PLAYER`, defaulting to `mpv`.
    pub fn from_env() -> Self {
        let binary =
            std::env::var("PORTFOLIO_PLAYER").unwrap_or_else(|_| DEFAULT_PLAYER_BIN.to_string());
        Self::new(binary)
    }

    /// Start playing `url`, replacing whatever was playing before. The
    /// spawned player owns no terminal I/O; the TUI keeps the screen.
    pub async fn play(&mut self, url: &str, kind: MediaKind) -> Result<()> {
        self.stop().await;

        let mut command = Command::new(&self.binary);
        if kind == MediaKind::Audio {
            command.arg("--no-video");
        }
        command
            .arg("--really-quiet")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command
            .spawn()
            .with_context(|| format!("failed to start media player '{}'", self.binary))?;
        tracing::info!(player = %self.binary, url, kind = kind.label(), "Playback started");
        self.child = Some(child);
        Ok(())
    }

    /// Stop the current playback, if any, and reap the child.
    pub async fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!(error = %e, "Media player already exited");
            }
            let _ = child.wait().await;
            tracing::debug!("Playback slot released");
        }
    }
}
