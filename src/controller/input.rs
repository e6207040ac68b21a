//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::model::{ActivePane, MediaItems};
use crate::view::{content, layout, overlays};

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Error message first (blocks all other interactions)
        if self.model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_error().await;
            }
            return Ok(());
        }

        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.model.hide_help_popup().await;
            }
            return Ok(());
        }

        if self.model.is_contact_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C')) {
                self.model.hide_contact_popup().await;
            }
            return Ok(());
        }

        // Lightbox bindings, active only while it is open; everything else
        // is inert behind the modal.
        if self.model.is_lightbox_open().await {
            match key.code {
                KeyCode::Right => self.model.lightbox_next().await,
                KeyCode::Left => self.model.lightbox_previous().await,
                KeyCode::Esc => self.model.close_lightbox().await,
                _ => {}
            }
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true).await;
            }
            KeyCode::Char('r') | KeyCode::Char('R')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.spawn_refresh();
            }
            KeyCode::F(5) => {
                self.spawn_refresh();
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.model.cycle_pane_backward().await;
                } else {
                    self.model.cycle_pane_forward().await;
                }
            }
            KeyCode::BackTab => {
                self.model.cycle_pane_backward().await;
            }
            KeyCode::Left => {
                self.switch_category(false).await;
            }
            KeyCode::Right => {
                self.switch_category(true).await;
            }
            KeyCode::Up => {
                self.model.move_cursor_up().await;
            }
            KeyCode::Down => {
                self.model.move_cursor_down().await;
            }
            KeyCode::Enter => {
                let ui = self.model.get_ui_state().await;
                match ui.active_pane {
                    ActivePane::Collections => {
                        if let Some(id) = self.model.collection_id_at_cursor().await {
                            self.select_collection(&id).await;
                        }
                    }
                    ActivePane::Items => {
                        self.activate_item(ui.item_cursor).await;
                    }
                    // The active category already follows the tab cursor.
                    ActivePane::Categories => {}
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.model.show_help_popup().await;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.model.show_contact_popup().await;
            }
            _ => {}
        }
        Ok(())
    }

    pub async fn handle_mouse_event(&self, mouse: MouseEvent, area: Rect) -> Result<()> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row, area).await;
            }
            // The scroll lock suppresses background scrolling while a
            // modal is up.
            MouseEventKind::ScrollUp => {
                if !self.model.scroll_lock().is_engaged() {
                    self.model.move_cursor_up().await;
                }
            }
            MouseEventKind::ScrollDown => {
                if !self.model.scroll_lock().is_engaged() {
                    self.model.move_cursor_down().await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_click(&self, x: u16, y: u16, area: Rect) {
        if self.model.has_error().await {
            self.model.clear_error().await;
            return;
        }
        if self.model.is_help_popup_open().await {
            self.model.hide_help_popup().await;
            return;
        }
        if self.model.is_contact_popup_open().await {
            self.model.hide_contact_popup().await;
            return;
        }

        if self.model.is_lightbox_open().await {
            let lb = overlays::lightbox_layout(area);
            if layout::hit(lb.prev_button, x, y) {
                self.model.lightbox_previous().await;
            } else if layout::hit(lb.next_button, x, y) {
                self.model.lightbox_next().await;
            } else if layout::hit(lb.close_button, x, y) {
                self.model.close_lightbox().await;
            } else if layout::hit(lb.panel, x, y) {
                // Clicks on the image itself never close the viewer.
            } else {
                // Dimmed backdrop
                self.model.close_lightbox().await;
            }
            return;
        }

        let state = self.model.frame_state().await;
        let chunks = layout::screen_chunks(area);

        if layout::hit(chunks.tabs, x, y) {
            if let Some(index) = layout::category_tab_at(chunks.tabs, state.nav.categories.len(), x, y) {
                if let Some(category) = state.nav.categories.get(index) {
                    let id = category.id.clone();
                    self.select_category(&id).await;
                }
            }
            return;
        }

        if layout::hit(chunks.sidebar, x, y) {
            if let Some(row) = layout::sidebar_row_at(chunks.sidebar, state.nav.collections.len(), x, y) {
                if let Some(collection) = state.nav.collections.get(row) {
                    let id = collection.id.clone();
                    self.select_collection(&id).await;
                }
            }
            return;
        }

        if layout::hit(chunks.content, x, y) {
            let Some(detail) = &state.nav.detail else {
                return;
            };
            // Must mirror the renderer's layout decision exactly.
            let show_player = state.playing.is_some() && detail.items.tracks().is_some();
            let body = content::content_chunks(chunks.content, show_player).body;
            match &detail.items {
                MediaItems::Images(images) => {
                    if let Some(index) =
                        content::image_cell_at(body, images.len(), state.ui.item_cursor, x, y)
                    {
                        self.model.open_lightbox(index).await;
                    }
                }
                MediaItems::Tracks(tracks) => {
                    if let Some(index) =
                        content::track_row_at(body, tracks.len(), state.ui.item_cursor, x, y)
                    {
                        self.select_track(index).await;
                    }
                }
            }
        }
    }

    /// Enter on an item: images open the lightbox, tracks start playback.
    async fn activate_item(&self, index: usize) {
        if self.model.open_lightbox(index).await {
            return;
        }
        self.select_track(index).await;
    }

    fn spawn_refresh(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            controller.refresh().await;
        });
    }
}
