//! LinkPreviewCard component: hosts the pure `PreviewCard` widget.

use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::{
    action::Action, app_state::AppState, component::Component, render::PreviewCard,
};

pub const TAG: &str = "link-preview-card";

#[derive(Default)]
pub struct LinkPreviewCard;

impl LinkPreviewCard {
    pub fn new() -> Self {
        Self
    }
}

pub fn create() -> Box<dyn Component> {
    Box::new(LinkPreviewCard::new())
}

impl Component for LinkPreviewCard {
    fn tag(&self) -> &'static str {
        TAG
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        frame.render_widget(
            PreviewCard::new(&state.preview, &state.catalog).spinner_frame(state.spinner_frame),
            area,
        );
    }

    fn min_height(&self) -> u16 {
        5
    }
}
