//! Color palette and style constants for the preview card.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(255, 95, 95);
pub const C_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(255, 80, 80);
pub const C_OK: Color = Color::Rgb(80, 200, 120);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SEPARATOR: Color = Color::Rgb(40, 40, 52);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);
pub const C_INPUT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_INPUT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_LINK: Color = Color::Rgb(80, 160, 220);

// Subset of the DDD primary palette that accent tokens name.
const DDD_PRIMARY: &[(&str, Color)] = &[
    ("--ddd-primary-0", Color::Rgb(0, 30, 68)),
    ("--ddd-primary-1", Color::Rgb(30, 64, 124)),
    ("--ddd-primary-2", Color::Rgb(0, 95, 169)),
    ("--ddd-primary-3", Color::Rgb(0, 154, 222)),
    ("--ddd-primary-4", Color::Rgb(188, 32, 75)),
    ("--ddd-primary-20", Color::Rgb(130, 83, 171)),
];

/// Resolve an accent token to a terminal color: DDD palette names first,
/// then anything ratatui parses (`#1e407c`, `blue`, `42`).  Unknown tokens
/// fall back to the default accent.
pub fn accent_color(token: &str) -> Color {
    let token = token.trim();
    if let Some((_, color)) = DDD_PRIMARY.iter().find(|(name, _)| *name == token) {
        return *color;
    }
    Color::from_str(token).unwrap_or(C_ACCENT)
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_link() -> Style {
    Style::default().fg(C_LINK).add_modifier(Modifier::UNDERLINED)
}

pub fn style_input() -> Style {
    Style::default().fg(C_INPUT_FG).bg(C_INPUT_BG)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
