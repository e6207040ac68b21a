//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: shared formatting helpers
//! - `layout`: screen structure (bio header, category tabs, sidebar)
//! - `content`: main content area (image grid, track list, now playing)
//! - `status`: bottom status bar
//! - `overlays`: modal overlays (lightbox, error, help, contact)
//!
//! Layout math lives in pure functions so the controller's mouse
//! hit-testing resolves clicks against the same rectangles the renderer
//! draws.

mod utils;
pub(crate) mod layout;
pub(crate) mod content;
mod status;
pub(crate) mod overlays;

use ratatui::Frame;

use crate::model::FrameState;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &FrameState) {
        let chunks = layout::screen_chunks(frame.area());

        layout::render_header(frame, chunks.header, state);
        layout::render_category_tabs(frame, chunks.tabs, state);
        layout::render_sidebar(frame, chunks.sidebar, state);
        content::render_main_content(frame, chunks.content, state);
        status::render_status_bar(frame, chunks.status, state);

        // Overlays last: error notification, popups, then the lightbox on
        // top of everything.
        if state.ui.error_message.is_some() {
            overlays::render_error_notification(frame, &state.ui);
        }
        if state.ui.show_help_popup {
            overlays::render_help_popup(frame);
        }
        if state.ui.show_contact_popup {
            overlays::render_contact_popup(frame);
        }
        if state.lightbox.is_open {
            overlays::render_lightbox(frame, state);
        }
    }
}
