//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::application::services::{NotificationManager, Slice, ViewStore};
use crate::application::use_cases::{FleetSync, SyncEvent};
use crate::domain::ports::FleetApiPort;
use crate::infrastructure::config::AppConfig;
use crate::presentation::commands::CommandRegistry;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::ui::{MainScreen, MainScreenState, ScreenAction};

const NOTIFICATION_TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

pub struct App {
    state: AppState,
    store: ViewStore,
    sync: FleetSync,
    sync_rx: mpsc::UnboundedReceiver<SyncEvent>,
    notifications: NotificationManager,
    screen: MainScreenState,
    commands: CommandRegistry,
    theme: Theme,
    endpoint: String,
}

impl App {
    #[must_use]
    pub fn new(api: Arc<dyn FleetApiPort>, config: &AppConfig) -> Self {
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::Running,
            store: ViewStore::new(),
            sync: FleetSync::new(api, sync_tx),
            sync_rx,
            notifications: NotificationManager::new(config.notification_duration()),
            screen: MainScreenState::new(),
            commands: CommandRegistry::with_overrides(&config.keybindings),
            theme: Theme::new(&config.ui.accent_color),
            endpoint: config.api.base_url.clone(),
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.start();
        self.run_event_loop(terminal).await?;

        info!(
            pending = self.sync.in_flight(),
            "Application exiting normally"
        );
        Ok(())
    }

    fn start(&mut self) {
        self.sync.initial_load(&mut self.store);
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut notification_interval = interval(NOTIFICATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(event) = self.sync_rx.recv() => {
                    self.handle_sync_event(event);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(&event) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    } else {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                _ = notification_interval.tick() => {
                    if self.notifications.has_notifications() {
                        self.notifications.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_sync_event(&mut self, event: SyncEvent) {
        self.sync
            .apply(event, &mut self.store, &mut self.notifications);
        self.screen.sync_cursors(&self.store);
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        if let Some(key) = EventHandler::key_press(event) {
            return self.handle_key(key);
        }
        if EventHandler::is_redraw_event(event) {
            return EventResult::Consumed;
        }
        EventResult::Continue
    }

    fn render(&mut self, frame: &mut Frame) {
        let mut screen = MainScreen::new(&self.store, &self.theme, &self.commands, &self.endpoint);
        if let Some(notification) = self.notifications.current_notification() {
            let queued = self.notifications.pending().count().saturating_sub(1);
            screen = screen.notification(notification, queued);
        }
        frame.render_stateful_widget(screen, frame.area(), &mut self.screen);
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        if key.code == KeyCode::Esc && self.notifications.has_notifications() {
            self.notifications.dismiss();
            return EventResult::Consumed;
        }

        let action = self
            .screen
            .handle_key(key, &self.commands, &mut self.store);
        self.perform(action)
    }

    fn perform(&mut self, action: ScreenAction) -> EventResult {
        match action {
            ScreenAction::None => return EventResult::Continue,
            ScreenAction::Quit => return EventResult::Exit,
            ScreenAction::ReloadCatalog => {
                let filter = self.store.active_filter().clone();
                self.sync.change_filter(filter, &mut self.store);
            }
            ScreenAction::ReloadCompanies => {
                self.sync.reload(Slice::Companies, &mut self.store);
            }
            ScreenAction::ChangeFilter(filter) => {
                self.sync.change_filter(filter, &mut self.store);
            }
            ScreenAction::Delete(icao) => {
                debug!(icao = %icao, "Delete requested");
                self.sync.delete(icao);
            }
            ScreenAction::Buy {
                company_icao,
                aircraft_icao,
            } => self.sync.buy(company_icao, aircraft_icao),
            ScreenAction::Sell {
                company_icao,
                aircraft_icao,
            } => self.sync.sell(company_icao, aircraft_icao),
            ScreenAction::BuySelected { company_icao } => {
                self.sync
                    .buy_selected(company_icao, &self.store, &mut self.notifications);
            }
            ScreenAction::SubmitDraft => {
                self.sync.submit_draft(&self.store, &mut self.notifications);
            }
        }
        EventResult::Consumed
    }
}
