//! Overlay rendering (lightbox, error notification, help and contact popups)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::model::{FrameState, ImageUrlBuilder, UiState};

/// Rectangles of the lightbox overlay. Pure, shared with mouse
/// hit-testing: a click on `panel` or one of the buttons never closes the
/// viewer; a click anywhere else on the backdrop does.
pub struct LightboxLayout {
    pub panel: Rect,
    pub prev_button: Rect,
    pub next_button: Rect,
    pub close_button: Rect,
    pub counter: Rect,
}

pub fn lightbox_layout(area: Rect) -> LightboxLayout {
    let panel_width = area.width.saturating_sub(12).max(20).min(area.width);
    let panel_height = area.height.saturating_sub(5).max(5).min(area.height);
    let panel = Rect {
        x: area.x + (area.width.saturating_sub(panel_width)) / 2,
        y: area.y + 1,
        width: panel_width,
        height: panel_height,
    };

    let mid_y = panel.y + panel.height / 2;
    let prev_button = Rect { x: area.x + 1, y: mid_y.saturating_sub(1), width: 3, height: 3 };
    let next_button = Rect {
        x: (area.x + area.width).saturating_sub(4),
        y: mid_y.saturating_sub(1),
        width: 3,
        height: 3,
    };
    let close_button =
        Rect { x: (area.x + area.width).saturating_sub(6), y: area.y, width: 5, height: 1 };
    let counter = Rect {
        x: area.x,
        y: (area.y + area.height).saturating_sub(2),
        width: area.width,
        height: 1,
    };

    LightboxLayout { panel, prev_button, next_button, close_button, counter }
}

pub fn render_lightbox(frame: &mut Frame, state: &FrameState) {
    // A shrunken or missing image list renders nothing rather than faulting.
    let Some(images) = state.nav.detail.as_ref().and_then(|d| d.items.images()) else {
        return;
    };
    let index = state.lightbox.current_index;
    let Some(image) = images.get(index) else {
        return;
    };

    let area = frame.area();
    let layout = lightbox_layout(area);

    // Dimmed backdrop over the whole screen.
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

    let title = state
        .nav
        .active_collection_summary()
        .map(|c| format!(" {} ", c.title))
        .unwrap_or_else(|| " Image ".to_string());

    let dims = ImageUrlBuilder::dimensions(&image.asset)
        .map(|(w, h)| format!("{} × {} px", w, h))
        .unwrap_or_else(|| "unknown size".to_string());
    let url = state.assets.url_for_sized(&image.asset, 1800, None).unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Image {} of {}", index + 1, images.len()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(dims, Style::default().fg(Color::DarkGray))).centered(),
        Line::from(""),
        Line::from(Span::styled(url, Style::default().fg(Color::Cyan))).centered(),
    ];
    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(panel, layout.panel);

    let button_style = Style::default().fg(Color::White);
    let prev = Paragraph::new(Line::from("◀").centered())
        .style(button_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(prev, layout.prev_button);

    let next = Paragraph::new(Line::from("▶").centered())
        .style(button_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(next, layout.next_button);

    let close = Paragraph::new(" ✕ ").style(Style::default().fg(Color::White));
    frame.render_widget(close, layout.close_button);

    let counter = Paragraph::new(
        Line::from(format!("{} / {}   ← → navigate · Esc close", index + 1, images.len()))
            .centered(),
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(counter, layout.counter);
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize;

        let error_line_count = ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));

        let popup_area = Rect {
            x: area.width.saturating_sub(popup_width) / 2,
            y: area.height.saturating_sub(popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle panes"),
        ("← / →", "Switch gallery"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Open image / Play track"),
        ("", ""),
        ("", "── Lightbox ──"),
        ("← / →", "Previous / Next image"),
        ("Esc", "Close"),
        ("", ""),
        ("", "── General ──"),
        ("F5 / Ctrl+R", "Reload content"),
        ("C", "Contact"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 52;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^32}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>16}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

/// Contact card. Deliberately a mock: there is no write path, submissions
/// are disabled.
pub fn render_contact_popup(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 46.min(area.width.saturating_sub(4));
    let popup_height = 9.min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let field_style = Style::default().fg(Color::White);
    let lines = vec![
        Line::from(Span::styled("Name     ────────────────", field_style)),
        Line::from(""),
        Line::from(Span::styled("Email    ────────────────", field_style)),
        Line::from(""),
        Line::from(Span::styled("Message  ────────────────", field_style)),
        Line::from(""),
        Line::from(Span::styled(
            "Submissions are disabled in this preview.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let contact = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Contact (Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(contact, popup_area);
}
