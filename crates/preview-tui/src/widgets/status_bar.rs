//! Status bar: bottom line with fetch status, locale and keybindings.

use preview_proto::protocol::Status;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::i18n::Locale;
use crate::theme::{C_ERROR, C_LOADING, C_MUTED, C_OK, C_SEPARATOR};

const KEYS: &str = " Enter fetch  F2 locale  Esc quit";

fn status_label(status: Status) -> (&'static str, Color) {
    match status {
        Status::Loading => ("LOADING", C_LOADING),
        Status::Idle => ("IDLE", C_OK),
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// The keybindings footer (one row).
pub fn keys_line(status: Status, locale: Locale, last_error: Option<&str>) -> Line<'static> {
    let (label, color) = status_label(status);
    let mut spans = vec![
        Span::styled(
            format!(" {label} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{locale}]"),
            Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(err) = last_error {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("✗ {err}"), Style::default().fg(C_ERROR)));
    }

    spans.push(Span::styled(KEYS, Style::default().fg(C_MUTED)));
    Line::from(spans)
}

pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    status: Status,
    locale: Locale,
    last_error: Option<&str>,
) {
    frame.render_widget(Paragraph::new(keys_line(status, locale, last_error)), area);
}
