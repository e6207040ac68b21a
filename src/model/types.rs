//! Core type definitions for the application

use std::time::Instant;

/// Which pane of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivePane {
    Categories,
    Collections,
    Items,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Collections,
            ActivePane::Collections => ActivePane::Items,
            ActivePane::Items => ActivePane::Categories,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Items,
            ActivePane::Collections => ActivePane::Categories,
            ActivePane::Items => ActivePane::Collections,
        }
    }
}

/// UI state for the application
#[derive(Clone)]
pub struct UiState {
    pub active_pane: ActivePane,
    /// Cursor position in the collection sidebar. Becomes the active
    /// collection only once confirmed with Enter or a click.
    pub collection_cursor: usize,
    /// Cursor position in the item grid/list.
    pub item_cursor: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    pub show_contact_popup: bool,
    /// How many characters of the bio title have been "typed" so far.
    pub bio_chars: usize,
    /// Blinking caret shown while the bio title is still typing.
    pub caret_visible: bool,
    pub last_type_tick: Instant,
    pub last_caret_toggle: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_pane: ActivePane::Collections,
            collection_cursor: 0,
            item_cursor: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
            show_contact_popup: false,
            bio_chars: 0,
            caret_visible: true,
            last_type_tick: Instant::now(),
            last_caret_toggle: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pane_cycle_is_closed() {
        let mut pane = ActivePane::Categories;
        for _ in 0..3 {
            pane = pane.next();
        }
        assert_eq!(pane, ActivePane::Categories);
        assert_eq!(ActivePane::Categories.prev(), ActivePane::Items);
    }
}
