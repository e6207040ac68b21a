//! Screen layout and chrome rendering (bio header, category tabs,
//! collection sidebar).
//!
//! The layout functions are pure so mouse hit-testing in the controller
//! resolves clicks against exactly the rectangles the renderer draws.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
};

use crate::model::{ActivePane, FetchPhase, FrameState};

use super::utils::truncate_string;

pub struct ScreenChunks {
    pub header: Rect,
    pub tabs: Rect,
    pub sidebar: Rect,
    pub content: Rect,
    pub status: Rect,
}

pub fn screen_chunks(area: Rect) -> ScreenChunks {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Bio header
            Constraint::Length(3), // Category tabs
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(26), // Collection sidebar
            Constraint::Percentage(74), // Main content
        ])
        .split(chunks[2]);

    ScreenChunks {
        header: chunks[0],
        tabs: chunks[1],
        sidebar: middle[0],
        content: middle[1],
        status: chunks[3],
    }
}

pub fn hit(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// One equal-width rectangle per category tab.
pub fn category_tab_rects(tabs: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let constraints: Vec<Constraint> =
        (0..count).map(|_| Constraint::Ratio(1, count as u32)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(tabs)
        .to_vec()
}

pub fn category_tab_at(tabs: Rect, count: usize, x: u16, y: u16) -> Option<usize> {
    category_tab_rects(tabs, count)
        .iter()
        .position(|rect| hit(*rect, x, y))
}

/// Sidebar row index for a click, accounting for the block border.
pub fn sidebar_row_at(sidebar: Rect, count: usize, x: u16, y: u16) -> Option<usize> {
    if !hit(sidebar, x, y) || y <= sidebar.y || y >= sidebar.y + sidebar.height.saturating_sub(1) {
        return None;
    }
    let row = (y - sidebar.y - 1) as usize;
    (row < count).then_some(row)
}

pub fn render_header(frame: &mut Frame, area: Rect, state: &FrameState) {
    let (title, subtitle) = match &state.bio {
        Some(bio) => {
            let typed: String = bio.title.chars().take(state.ui.bio_chars).collect();
            let subtitle = bio.paragraphs.first().cloned().unwrap_or_default();
            (typed, subtitle)
        }
        None => (String::new(), String::new()),
    };

    let caret = if state.ui.caret_visible { "▌" } else { "" };
    let lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(caret, Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            truncate_string(&subtitle, area.width.saturating_sub(4) as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" About ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

pub fn render_category_tabs(frame: &mut Frame, area: Rect, state: &FrameState) {
    let nav = &state.nav;

    if nav.categories_phase.is_loading() {
        let loading = Paragraph::new("Loading…")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Galleries "));
        frame.render_widget(loading, area);
        return;
    }

    let active_index = nav.active_category_index();
    let rects = category_tab_rects(area, nav.categories.len());
    for (i, (category, rect)) in nav.categories.iter().zip(rects).enumerate() {
        let is_active = active_index == Some(i);
        let style = if is_active {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let border_style = if is_active {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let tab = Paragraph::new(Line::from(category.title.clone()).centered())
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(tab, rect);
    }
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, state: &FrameState) {
    let nav = &state.nav;
    let focused = state.ui.active_pane == ActivePane::Collections;

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Collections ")
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    if nav.collections_phase.is_loading() {
        let loading = Paragraph::new("Loading…")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    if nav.collections.is_empty() {
        let text = match nav.collections_phase {
            FetchPhase::Failed => "No collections found",
            _ => "",
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let active_index = nav.active_collection_index();
    let items: Vec<ListItem> = nav
        .collections
        .iter()
        .enumerate()
        .map(|(i, collection)| {
            let style = if active_index == Some(i) {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == state.ui.collection_cursor && focused {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            let label = format!("{}  ({})", collection.title, collection.item_count);
            ListItem::new(label).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(state.ui.collection_cursor));

    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_tabs_tile_the_whole_bar() {
        let tabs = Rect::new(0, 4, 90, 3);
        let rects = category_tab_rects(tabs, 3);
        assert_eq!(rects.len(), 3);
        let total: u16 = rects.iter().map(|r| r.width).sum();
        assert_eq!(total, 90);
        assert_eq!(category_tab_at(tabs, 3, 0, 5), Some(0));
        assert_eq!(category_tab_at(tabs, 3, 89, 5), Some(2));
        assert_eq!(category_tab_at(tabs, 3, 89, 20), None);
    }

    #[test]
    fn sidebar_rows_skip_the_border() {
        let sidebar = Rect::new(0, 7, 24, 10);
        assert_eq!(sidebar_row_at(sidebar, 3, 2, 7), None); // top border
        assert_eq!(sidebar_row_at(sidebar, 3, 2, 8), Some(0));
        assert_eq!(sidebar_row_at(sidebar, 3, 2, 10), Some(2));
        assert_eq!(sidebar_row_at(sidebar, 3, 2, 11), None); // past the list
        assert_eq!(sidebar_row_at(sidebar, 3, 40, 8), None); // outside
    }
}
