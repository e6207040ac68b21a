//! Controller module - Application logic and event handling
//!
//! Coordinates between the model, the content gateway and the playback
//! backend. Organized into submodules by responsibility:
//!
//! - `input`: key and mouse event handling
//! - `fetch`: tiered content fetches with stale-result suppression
//! - `playback`: inline player control

mod fetch;
mod input;
mod playback;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, GatewayError};
use crate::player::PlayerBackend;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) player_backend: Arc<Mutex<Option<PlayerBackend>>>,
}

impl AppController {
    pub fn new(model: AppModel, player_backend: Arc<Mutex<Option<PlayerBackend>>>) -> Self {
        Self { model, player_backend }
    }

    /// Turn a gateway error into the message shown in the error overlay.
    /// The raw error goes to the log, never to the screen.
    pub(crate) fn format_error(error: &GatewayError) -> String {
        match error {
            GatewayError::Status { status: 404, .. } => {
                "Content not found. The backend may still be publishing.".to_string()
            }
            GatewayError::Status { status: 429, .. } => {
                "Rate limited by the content store. Please wait a moment.".to_string()
            }
            GatewayError::Status { status, .. } if *status >= 500 => {
                "The content store is having trouble. Try again shortly.".to_string()
            }
            GatewayError::Request { .. } => {
                "Cannot reach the content store. Check your connection.".to_string()
            }
            GatewayError::Malformed { .. } => {
                "The content store returned an unexpected response.".to_string()
            }
            GatewayError::NotFound(_) => "That collection no longer exists.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}
