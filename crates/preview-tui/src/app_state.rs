//! AppState: shared read-only data passed to all components during render/event.
//!
//! The App event-loop is the only thing that writes to AppState.

use preview_proto::protocol::PreviewState;

use crate::i18n::{Catalog, Locale};

#[derive(Debug, Clone)]
pub struct AppState {
    /// Latest controller snapshot.
    pub preview: PreviewState,
    pub catalog: Catalog,
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            preview: PreviewState::default(),
            catalog,
            spinner_frame: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.catalog.locale
    }
}
