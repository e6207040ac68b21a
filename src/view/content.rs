//! Main content area rendering: image grids, track lists, the now-playing
//! panel and the empty states between fetches.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::model::{ActivePane, FrameState, ImageUrlBuilder, MediaItems, MediaKind, TrackItem};

use super::layout::hit;
use super::utils::truncate_string;

/// Width of one cell in the image grid, borders included.
pub const GRID_CELL_WIDTH: u16 = 24;
/// Height of one cell in the image grid, borders included.
pub const GRID_CELL_HEIGHT: u16 = 4;

pub struct ContentChunks {
    pub header: Rect,
    pub player: Option<Rect>,
    pub body: Rect,
}

/// Vertical split of the content area. Pure, shared with mouse
/// hit-testing.
pub fn content_chunks(area: Rect, show_player: bool) -> ContentChunks {
    if show_player {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Collection title + description
                Constraint::Length(5), // Now-playing panel
                Constraint::Min(0),    // Item list
            ])
            .split(area);
        ContentChunks { header: chunks[0], player: Some(chunks[1]), body: chunks[2] }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);
        ContentChunks { header: chunks[0], player: None, body: chunks[1] }
    }
}

fn inner(body: Rect) -> Rect {
    Rect {
        x: body.x + 1,
        y: body.y + 1,
        width: body.width.saturating_sub(2),
        height: body.height.saturating_sub(2),
    }
}

pub fn grid_columns(body: Rect) -> usize {
    ((inner(body).width / GRID_CELL_WIDTH) as usize).max(1)
}

fn grid_visible_rows(body: Rect) -> usize {
    ((inner(body).height / GRID_CELL_HEIGHT) as usize).max(1)
}

/// First grid row drawn, chosen so the cursor's row stays on screen.
pub fn grid_first_row(body: Rect, cursor: usize) -> usize {
    let cols = grid_columns(body);
    let visible = grid_visible_rows(body);
    let cursor_row = cursor / cols;
    cursor_row.saturating_sub(visible - 1)
}

/// Map a click to an image index, honoring the current scroll position.
pub fn image_cell_at(body: Rect, count: usize, cursor: usize, x: u16, y: u16) -> Option<usize> {
    let inner = inner(body);
    if !hit(inner, x, y) || count == 0 {
        return None;
    }
    let cols = grid_columns(body);
    let col = ((x - inner.x) / GRID_CELL_WIDTH) as usize;
    if col >= cols {
        return None;
    }
    let row = ((y - inner.y) / GRID_CELL_HEIGHT) as usize + grid_first_row(body, cursor);
    let index = row * cols + col;
    (index < count).then_some(index)
}

/// First track row drawn, keeping the cursor visible.
pub fn track_first_row(body: Rect, cursor: usize) -> usize {
    let visible = inner(body).height.max(1) as usize;
    cursor.saturating_sub(visible - 1)
}

/// Map a click to a track index, honoring the current scroll position.
pub fn track_row_at(body: Rect, count: usize, cursor: usize, x: u16, y: u16) -> Option<usize> {
    let inner = inner(body);
    if !hit(inner, x, y) || count == 0 {
        return None;
    }
    let index = (y - inner.y) as usize + track_first_row(body, cursor);
    (index < count).then_some(index)
}

pub fn render_main_content(frame: &mut Frame, area: Rect, state: &FrameState) {
    let nav = &state.nav;

    // Tier-dependent empty states, matching the fetch phases.
    if nav.active_collection.is_none() {
        if nav.collections_phase.is_settled() && nav.collections.is_empty() {
            render_empty(frame, area, "Coming soon!");
        } else if nav.collections_phase.is_loading() {
            render_empty(frame, area, "Loading…");
        } else {
            render_empty(frame, area, "Select a collection tab to view its media.");
        }
        return;
    }

    if nav.detail_phase.is_loading() {
        render_empty(frame, area, "Loading…");
        return;
    }

    let Some(detail) = &nav.detail else {
        // Failed tier falls back to the plain empty state; the error
        // overlay already carried the message.
        render_empty(frame, area, "No media items found in this collection.");
        return;
    };

    let show_player = state.playing.is_some() && detail.items.tracks().is_some();
    let chunks = content_chunks(area, show_player);

    render_collection_header(frame, chunks.header, state);

    if let (Some(player_area), Some(track)) = (chunks.player, &state.playing) {
        render_now_playing(frame, player_area, track, &state.assets);
    }

    if detail.items.is_empty() {
        render_empty(frame, chunks.body, "No media items found in this collection.");
        return;
    }

    match &detail.items {
        MediaItems::Images(images) => render_image_grid(frame, chunks.body, state, images.len()),
        MediaItems::Tracks(tracks) => render_track_list(frame, chunks.body, state, tracks),
    }
}

fn render_collection_header(frame: &mut Frame, area: Rect, state: &FrameState) {
    let Some(summary) = state.nav.active_collection_summary() else {
        return;
    };
    let description = state
        .nav
        .detail
        .as_ref()
        .and_then(|d| d.description.clone())
        .or_else(|| summary.description.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            summary.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_string(&description, area.width.saturating_sub(2) as usize),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let empty = Paragraph::new(Line::from(message).centered())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).padding(Padding::top(area.height / 3)));
    frame.render_widget(empty, area);
}

fn render_image_grid(frame: &mut Frame, body: Rect, state: &FrameState, count: usize) {
    let focused = state.ui.active_pane == ActivePane::Items;
    let border_style = if focused { Style::default().fg(Color::Green) } else { Style::default() };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} images ", count))
        .border_style(border_style);
    frame.render_widget(block, body);

    let Some(images) = state.nav.detail.as_ref().and_then(|d| d.items.images()) else {
        return;
    };

    let inner = inner(body);
    let cols = grid_columns(body);
    let visible_rows = grid_visible_rows(body);
    let first_row = grid_first_row(body, state.ui.item_cursor);

    for (index, image) in images.iter().enumerate() {
        let row = index / cols;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let cell = Rect {
            x: inner.x + (index % cols) as u16 * GRID_CELL_WIDTH,
            y: inner.y + (row - first_row) as u16 * GRID_CELL_HEIGHT,
            width: GRID_CELL_WIDTH,
            height: GRID_CELL_HEIGHT,
        };

        let selected = focused && index == state.ui.item_cursor;
        let style = if selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let dims = ImageUrlBuilder::dimensions(&image.asset)
            .map(|(w, h)| format!("{}×{}", w, h))
            .unwrap_or_else(|| "?".to_string());

        let cell_widget = Paragraph::new(vec![
            Line::from(format!("▣ {}", index + 1)),
            Line::from(Span::styled(dims, Style::default().fg(Color::DarkGray))),
        ])
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(cell_widget, cell);
    }
}

fn render_track_list(frame: &mut Frame, body: Rect, state: &FrameState, tracks: &[TrackItem]) {
    let focused = state.ui.active_pane == ActivePane::Items;
    let border_style = if focused { Style::default().fg(Color::Green) } else { Style::default() };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} tracks ", tracks.len()))
        .border_style(border_style);
    frame.render_widget(block, body);

    let inner = inner(body);
    let first = track_first_row(body, state.ui.item_cursor);
    let playing_key = state.playing.as_ref().map(|t| t.key.as_str());

    for (offset, (index, track)) in tracks.iter().enumerate().skip(first).enumerate() {
        if offset as u16 >= inner.height {
            break;
        }
        let row = Rect { x: inner.x, y: inner.y + offset as u16, width: inner.width, height: 1 };

        let is_playing = playing_key == Some(track.key.as_str());
        let style = if focused && index == state.ui.item_cursor {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else if is_playing {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let marker = if is_playing {
            "▶"
        } else {
            match track.kind {
                MediaKind::Audio => "♪",
                MediaKind::Video => "▣",
            }
        };
        let year = track.year.map(|y| format!("  ({})", y)).unwrap_or_default();
        let label = format!("{:>3}  {} {}{}", index + 1, marker, track.title, year);

        let line = Paragraph::new(truncate_string(&label, inner.width as usize)).style(style);
        frame.render_widget(line, row);
    }
}

fn render_now_playing(frame: &mut Frame, area: Rect, track: &TrackItem, assets: &ImageUrlBuilder) {
    let year = track.year.map(|y| format!(" ({})", y)).unwrap_or_default();
    let cover = track
        .cover
        .as_ref()
        .and_then(|c| assets.url_for_sized(c, 400, Some(400)))
        .map(|url| format!("cover: {}", url))
        .unwrap_or_default();

    let width = area.width.saturating_sub(4) as usize;
    let lines = vec![
        Line::from(Span::styled(
            format!("{}{}", track.title, year),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate_string(track.description.as_deref().unwrap_or(""), width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            truncate_string(&format!("{} · {}", track.kind.label(), cover), width),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Now Playing ")
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_hit_testing_matches_cell_geometry() {
        let body = Rect::new(30, 9, 74, 14);
        // inner 72 wide → 3 columns, inner 12 tall → 3 visible rows
        assert_eq!(grid_columns(body), 3);
        assert_eq!(image_cell_at(body, 9, 0, 31, 10), Some(0));
        assert_eq!(image_cell_at(body, 9, 0, 31 + GRID_CELL_WIDTH, 10), Some(1));
        assert_eq!(image_cell_at(body, 9, 0, 31, 10 + GRID_CELL_HEIGHT as u16), Some(3));
        // Slack to the right of the last column hits nothing.
        assert_eq!(image_cell_at(body, 9, 0, 30 + 73, 10), None);
        // Clicks outside the body hit nothing.
        assert_eq!(image_cell_at(body, 9, 0, 10, 10), None);
    }

    #[test]
    fn grid_scrolling_keeps_the_cursor_row_visible() {
        let body = Rect::new(0, 0, 74, 14); // 3 cols × 3 visible rows
        assert_eq!(grid_first_row(body, 0), 0);
        assert_eq!(grid_first_row(body, 8), 0); // row 2 of 3 visible
        assert_eq!(grid_first_row(body, 9), 1); // row 3 scrolls by one
        // A click on the first drawn row now maps to the scrolled index.
        assert_eq!(image_cell_at(body, 12, 9, 1, 1), Some(3));
    }

    #[test]
    fn track_rows_scroll_with_the_cursor() {
        let body = Rect::new(0, 0, 40, 6); // 4 inner rows
        assert_eq!(track_first_row(body, 2), 0);
        assert_eq!(track_first_row(body, 5), 2);
        assert_eq!(track_row_at(body, 10, 0, 1, 1), Some(0));
        assert_eq!(track_row_at(body, 10, 5, 1, 1), Some(2));
        assert_eq!(track_row_at(body, 3, 0, 1, 4), None); // past the list
    }
}
