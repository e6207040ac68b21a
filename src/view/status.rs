//! Bottom status bar: currently playing track and key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::model::FrameState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &FrameState) {
    let status_text = match &state.playing {
        Some(track) => {
            let year = track.year.map(|y| format!(" ({})", y)).unwrap_or_default();
            format!(" ▶ {}{} — {}", track.title, year, track.kind.label())
        }
        None => " No track playing".to_string(),
    };

    let hints = " Tab panes │ ←/→ gallery │ ↑/↓ move │ Enter open │ H help │ Q quit ";

    let bar = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(Line::from(hints).right_aligned()),
        );
    frame.render_widget(bar, area);
}
