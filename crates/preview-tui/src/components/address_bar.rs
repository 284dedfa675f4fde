//! AddressBar component: single-line tui-input editor for the target address.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_input, C_INPUT_BG, C_MUTED},
    widgets::pane_chrome::pane_chrome,
};

pub const TAG: &str = "address-bar";

#[derive(Default)]
pub struct AddressBar {
    input: Input,
    /// Set once the user edits; cleared on submit.  While clean the bar
    /// mirrors the controller's target so external changes show up.
    edited: bool,
}

impl AddressBar {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn create() -> Box<dyn Component> {
    Box::new(AddressBar::new())
}

impl Component for AddressBar {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter => {
                self.edited = false;
                vec![Action::SubmitAddress(self.input.value().trim().to_string())]
            }
            _ => {
                if self.input.handle_event(&Event::Key(key)).is_some() {
                    self.edited = true;
                }
                vec![]
            }
        }
    }

    fn tick(&mut self, state: &AppState) -> Vec<Action> {
        if !self.edited && self.input.value() != state.preview.target_address {
            self.input = Input::new(state.preview.target_address.clone());
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome(&state.catalog.address, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let scroll = self.input.visual_scroll(inner.width.saturating_sub(3) as usize);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled("https://…", Style::default().fg(C_MUTED))
        } else {
            Span::styled(
                format!("› {}", value.chars().skip(scroll).collect::<String>()),
                style_input(),
            )
        };
        let paragraph = Paragraph::new(Line::from(display)).style(Style::default().bg(C_INPUT_BG));
        frame.render_widget(paragraph, inner);

        if focused && inner.width > 0 {
            let cursor_x = inner.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(inner.x + inner.width - 1), inner.y));
        }
    }
}
