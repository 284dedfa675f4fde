//! Pure card rendering: `PreviewState` + catalog in, cells out.
//!
//! Nothing here reads global state or schedules itself; the host decides
//! when to draw.

use preview_proto::protocol::{PreviewState, Status};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::i18n::Catalog;
use crate::theme::{
    accent_color, style_default, style_link, style_secondary, C_ERROR, C_LOADING,
};
use crate::widgets::pane_chrome::{accent_chrome, Badge};

pub const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// The preview card for one `PreviewState` snapshot.
pub struct PreviewCard<'a> {
    state: &'a PreviewState,
    catalog: &'a Catalog,
    spinner_frame: usize,
}

impl<'a> PreviewCard<'a> {
    pub fn new(state: &'a PreviewState, catalog: &'a Catalog) -> Self {
        Self {
            state,
            catalog,
            spinner_frame: 0,
        }
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn badge(&self) -> Option<Badge<'a>> {
        match self.state.status {
            Status::Loading => Some(Badge {
                text: &self.catalog.loading,
                color: C_LOADING,
            }),
            Status::Idle if self.state.last_error.is_some() => Some(Badge {
                text: &self.catalog.error,
                color: C_ERROR,
            }),
            Status::Idle => None,
        }
    }
}

/// Body lines of the card (everything inside the border).
pub fn card_lines<'a>(
    state: &'a PreviewState,
    catalog: &'a Catalog,
    spinner_frame: usize,
) -> Vec<Line<'a>> {
    if state.status == Status::Loading {
        let icon = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        return vec![Line::from(vec![
            Span::styled(icon, Style::default().fg(C_LOADING)),
            Span::raw(" "),
            Span::styled(catalog.loading.as_str(), style_secondary()),
        ])];
    }

    let record = &state.record;
    let mut lines = Vec::new();

    if !record.description.is_empty() {
        lines.push(Line::from(Span::styled(
            catalog.sentinel(&record.description),
            style_default(),
        )));
    }

    if !record.image.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", catalog.image), style_secondary()),
            Span::styled(record.image.as_str(), style_secondary()),
        ]));
    }

    if !record.canonical_link.is_empty() {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{} → ", catalog.visit_site), style_default()),
            Span::styled(record.canonical_link.as_str(), style_link()),
        ]));
    }

    lines
}

impl Widget for PreviewCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let record = &self.state.record;
        let title = self.catalog.sentinel(&record.title);
        let block = accent_chrome(title, accent_color(&record.accent_color), self.badge());

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(card_lines(self.state, self.catalog, self.spinner_frame))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
