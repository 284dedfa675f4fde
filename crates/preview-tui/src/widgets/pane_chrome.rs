//! PaneChrome: bordered pane with focus or accent styling and a badge.

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_PRIMARY};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g., "LOADING", "ERR").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// Bordered pane whose border follows focus.
pub fn pane_chrome<'a>(title: &'a str, focused: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    chrome(title, border_style, title_style, badge)
}

/// Bordered pane whose border carries an accent color regardless of focus.
pub fn accent_chrome<'a>(title: &'a str, accent: Color, badge: Option<Badge<'a>>) -> Block<'a> {
    chrome(
        title,
        Style::default().fg(accent),
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        badge,
    )
}

fn chrome<'a>(
    title: &'a str,
    border_style: Style,
    title_style: Style,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
        ]));

    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
