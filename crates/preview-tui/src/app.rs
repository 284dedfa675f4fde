//! App: component-based event loop hosting the preview card.
//!
//! Architecture:
//! - `App` owns the components (created through the registry) and `AppState`.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use preview_proto::client::MetadataSource;
use preview_proto::controller::FetchController;
use preview_proto::protocol::PreviewEvent;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{address_bar, link_preview_card},
    i18n::Catalog,
    registry::ComponentRegistry,
    widgets::status_bar,
};

/// Messages delivered to the event loop from background tasks.
#[derive(Debug)]
enum AppMessage {
    Event(Event),
    Preview(PreviewEvent),
    /// The event stream lagged; re-read the snapshot.
    Resync,
}

pub struct App<S> {
    controller: Arc<FetchController<S>>,
    address_bar: Box<dyn Component>,
    card: Box<dyn Component>,
    state: AppState,
    initial_address: Option<String>,
    should_quit: bool,
}

impl<S: MetadataSource> App<S> {
    pub fn new(
        controller: Arc<FetchController<S>>,
        registry: &ComponentRegistry,
        catalog: Catalog,
        initial_address: Option<String>,
    ) -> anyhow::Result<Self> {
        debug!("registered components: {:?}", registry.tags().collect::<Vec<_>>());
        let address_bar = registry.create(address_bar::TAG)?;
        let card = registry.create(link_preview_card::TAG)?;
        debug!("created {} and {}", address_bar.tag(), card.tag());
        Ok(Self {
            controller,
            address_bar,
            card,
            state: AppState::new(catalog),
            initial_address,
            should_quit: false,
        })
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: controller events → AppMessage ───────────────────
        let mut preview_rx = self.controller.subscribe();
        let bc_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                let msg = match preview_rx.recv().await {
                    Ok(ev) => AppMessage::Preview(ev),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("preview receiver lagged by {} messages", n);
                        AppMessage::Resync
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if bc_tx.send(msg).await.is_err() {
                    break;
                }
            }
        });

        if let Some(address) = self.initial_address.take() {
            self.dispatch(Action::SubmitAddress(address)).await;
        }

        // Spinner animation + component maintenance: 100ms.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                }

                _ = ui_tick.tick() => {
                    self.tick().await;
                    needs_redraw = true;
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Returns whether a redraw is needed.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Preview(ev) => {
                debug!(ticket = ev.ticket(), "preview event: {:?}", ev);
                self.refresh().await;
                true
            }
            AppMessage::Resync => {
                self.refresh().await;
                true
            }
        }
    }

    /// Global keys first, everything else goes to the address bar.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => vec![Action::Quit],
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => vec![Action::Quit],
            (KeyCode::F(2), _) => vec![Action::CycleLocale],
            _ => self.address_bar.handle_key(key, &self.state),
        }
    }

    async fn tick(&mut self) {
        if self.state.preview.status.is_loading() {
            self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
        }
        let mut actions = self.address_bar.tick(&self.state);
        actions.extend(self.card.tick(&self.state));
        for action in actions {
            self.dispatch(action).await;
        }
    }

    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::SubmitAddress(address) => {
                info!("target address: {}", address);
                // The cycle is detached; its result arrives as a PreviewEvent.
                let _ = self.controller.set_target_address(address).await;
                self.refresh().await;
            }
            Action::CycleLocale => {
                let next = self.state.locale().next();
                match Catalog::load(next) {
                    Ok(catalog) => {
                        info!("locale: {}", next);
                        self.state.catalog = catalog;
                    }
                    Err(e) => warn!("failed to load {} catalog: {}", next, e),
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    async fn refresh(&mut self) {
        self.state.preview = self.controller.snapshot().await;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(self.card.min_height()),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        self.address_bar.draw(frame, outer[0], true, &self.state);
        self.card.draw(frame, outer[1], false, &self.state);
        status_bar::draw_separator(frame, outer[2]);
        status_bar::draw_keys_bar(
            frame,
            outer[3],
            self.state.preview.status,
            self.state.locale(),
            self.state.preview.last_error.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::registry::default_registry;
    use preview_proto::config::Sequencing;
    use preview_proto::error::{FetchError, FetchResult};
    use preview_proto::protocol::{Status, NO_PREVIEW};
    use preview_proto::theme::ThemePolicy;
    use ratatui::backend::TestBackend;
    use serde_json::{json, Value};

    struct Echo;

    impl MetadataSource for Echo {
        async fn fetch(&self, address: &str) -> FetchResult<Value> {
            if address.contains("broken") {
                return Err(FetchError::MissingData);
            }
            Ok(json!({ "data": { "title": "Echo", "url": address } }))
        }
    }

    fn app() -> App<Echo> {
        let controller = Arc::new(FetchController::new(
            Echo,
            ThemePolicy::default(),
            Sequencing::LatestTrigger,
        ));
        let registry = default_registry().unwrap();
        App::new(controller, &registry, Catalog::load(Locale::En).unwrap(), None).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn settle(app: &mut App<Echo>) {
        let mut events = app.controller.subscribe();
        while app.controller.snapshot().await.status == Status::Loading {
            let _ = events.recv().await;
        }
        app.refresh().await;
    }

    fn screen(app: &mut App<Echo>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn components_come_from_the_registry() {
        let app = app();
        assert_eq!(app.address_bar.tag(), address_bar::TAG);
        assert_eq!(app.card.tag(), link_preview_card::TAG);
    }

    #[test]
    fn global_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Esc)), vec![Action::Quit]);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            vec![Action::Quit]
        );
        assert_eq!(app.handle_key(key(KeyCode::F(2))), vec![Action::CycleLocale]);
        assert!(app.handle_key(key(KeyCode::Char('x'))).is_empty());
    }

    #[tokio::test]
    async fn typed_address_is_fetched_and_drawn() {
        let mut app = app();
        for c in "https://psu.edu".chars() {
            for action in app.handle_key(key(KeyCode::Char(c))) {
                app.dispatch(action).await;
            }
        }
        for action in app.handle_key(key(KeyCode::Enter)) {
            app.dispatch(action).await;
        }
        assert_eq!(app.state.preview.target_address, "https://psu.edu");

        settle(&mut app).await;
        assert_eq!(app.state.preview.record.title, "Echo");

        let screen = screen(&mut app);
        assert!(screen.contains("Echo"));
        assert!(screen.contains("Visit Site → https://psu.edu"));
        assert!(screen.contains("IDLE [en]"));
    }

    #[tokio::test]
    async fn failure_shows_in_card_and_footer() {
        let mut app = app();
        app.dispatch(Action::SubmitAddress("https://broken.example".into())).await;
        settle(&mut app).await;

        assert_eq!(app.state.preview.record.title, NO_PREVIEW);
        let screen = screen(&mut app);
        assert!(screen.contains(NO_PREVIEW));
        assert!(screen.contains("✗"));
    }

    #[tokio::test]
    async fn locale_cycles_and_relabels() {
        let mut app = app();
        app.dispatch(Action::CycleLocale).await;
        assert_eq!(app.state.locale(), Locale::Ar);
        app.dispatch(Action::CycleLocale).await;
        assert_eq!(app.state.locale(), Locale::Es);

        let screen = screen(&mut app);
        assert!(screen.contains("título provisional"));
        assert!(screen.contains("[es]"));
    }
}
