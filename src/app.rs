//! Terminal event loop: keyboard input, auto-refresh ticks, rendering.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::widgets::ListState;
use ratatui::DefaultTerminal;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use crate::config::Config;
use crate::controller::SyncController;
use crate::ui;

/// Input mode of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the history list.
    Normal,
    /// Typing into the compose modal.
    Compose,
}

pub struct App {
    controller: SyncController,
    mode: Mode,
    list_state: ListState,
    refresh_interval: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(controller: SyncController, config: &Config) -> Self {
        Self {
            controller,
            mode: Mode::Normal,
            list_state: ListState::default(),
            refresh_interval: Duration::from_secs(config.refresh_interval_secs),
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.controller.set_status(status);
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();

        let auto_refresh = !self.refresh_interval.is_zero();
        let mut ticker = tokio::time::interval(if auto_refresh {
            self.refresh_interval
        } else {
            Duration::from_secs(3600)
        });
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick completes immediately; the startup refresh
        // below already covers it.
        ticker.tick().await;

        self.controller.refresh_all().await;
        self.sync_selection();

        while !self.should_quit {
            terminal.draw(|frame| {
                ui::draw(
                    frame,
                    self.controller.state(),
                    self.mode,
                    &mut self.list_state,
                )
            })?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await;
                        }
                        Some(Ok(_)) => {} // resize and friends just redraw
                        Some(Err(e)) => warn!("terminal event error: {e}"),
                        None => break,
                    }
                }
                _ = ticker.tick(), if auto_refresh => {
                    self.controller.refresh_all().await;
                    self.sync_selection();
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key).await,
            Mode::Compose => self.handle_compose_key(key).await,
        }
    }

    async fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') => self.mode = Mode::Compose,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected().await,
            KeyCode::Char('r') => {
                self.controller.refresh_all().await;
                self.sync_selection();
            }
            KeyCode::Esc => self.controller.clear_error(),
            _ => {}
        }
    }

    async fn handle_compose_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.controller.clear_draft();
                self.controller.clear_error();
            }
            KeyCode::Enter => {
                self.controller.submit().await;
                self.sync_selection();
                // Stay in compose on failure so the retained draft can be
                // resubmitted.
                if self.controller.state().error.is_none() {
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Backspace => self.controller.pop_draft_char(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.controller.push_draft_char(c);
            }
            _ => {}
        }
    }

    async fn remove_selected(&mut self) {
        let id = self
            .list_state
            .selected()
            .and_then(|idx| self.controller.state().tweets.get(idx))
            .map(|tweet| tweet.id);
        if let Some(id) = id {
            self.controller.remove(id).await;
            self.sync_selection();
        }
    }

    fn scroll_up(&mut self) {
        if let Some(idx) = self.list_state.selected() {
            if idx > 0 {
                self.list_state.select(Some(idx - 1));
            }
        }
    }

    fn scroll_down(&mut self) {
        let len = self.controller.state().tweets.len();
        if let Some(idx) = self.list_state.selected() {
            if idx + 1 < len {
                self.list_state.select(Some(idx + 1));
            }
        }
    }

    /// Keep the selection valid after the list was replaced by a refresh.
    fn sync_selection(&mut self) {
        let len = self.controller.state().tweets.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(idx));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::api::{
        AnalysisOutcome, AnalyzedTweet, HealthStatus, Sentiment, SentimentBackend, StatsSnapshot,
    };
    use crate::error::ApiResult;

    /// Backend that accepts everything and stores nothing; enough for
    /// exercising input handling.
    struct NullBackend;

    #[async_trait]
    impl SentimentBackend for NullBackend {
        async fn analyze(&self, _text: &str) -> ApiResult<AnalysisOutcome> {
            Ok(AnalysisOutcome {
                id: 1,
                sentiment: Sentiment::Positive,
                confidence: 90.0,
            })
        }

        async fn tweets(&self, _limit: usize) -> ApiResult<Vec<AnalyzedTweet>> {
            Ok(Vec::new())
        }

        async fn stats(&self) -> ApiResult<StatsSnapshot> {
            Ok(StatsSnapshot::default())
        }

        async fn delete(&self, _id: i64) -> ApiResult<()> {
            Ok(())
        }

        async fn health(&self) -> ApiResult<HealthStatus> {
            Ok(HealthStatus {
                status: "healthy".to_string(),
                message: String::new(),
                models_loaded: true,
            })
        }
    }

    fn test_app() -> App {
        let controller = SyncController::new(Arc::new(NullBackend), 50);
        App::new(controller, &Config::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_t_opens_compose() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        assert_eq!(app.mode, Mode::Compose);
    }

    #[tokio::test]
    async fn test_typing_edits_draft() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        for c in "hi!".chars() {
            app.handle_key(press(KeyCode::Char(c))).await;
        }
        assert_eq!(app.controller.state().draft.text(), "hi!");

        app.handle_key(press(KeyCode::Backspace)).await;
        assert_eq!(app.controller.state().draft.text(), "hi");
    }

    #[tokio::test]
    async fn test_control_chars_are_ignored() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await;
        assert_eq!(app.controller.state().draft.text(), "");
    }

    #[tokio::test]
    async fn test_esc_cancels_compose_and_discards_draft() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        app.handle_key(press(KeyCode::Char('x'))).await;
        app.handle_key(press(KeyCode::Esc)).await;

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.controller.state().draft.is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_stays_in_compose() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        // Empty draft fails validation, so compose stays open with the
        // error showing.
        app.handle_key(press(KeyCode::Enter)).await;
        assert_eq!(app.mode, Mode::Compose);
        assert!(app.controller.state().error.is_some());
    }

    #[tokio::test]
    async fn test_successful_submit_returns_to_normal() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('t'))).await;
        for c in "Great day!".chars() {
            app.handle_key(press(KeyCode::Char(c))).await;
        }
        app.handle_key(press(KeyCode::Enter)).await;
        assert_eq!(app.mode, Mode::Normal);
    }

    #[tokio::test]
    async fn test_q_quits() {
        let mut app = test_app();
        app.handle_key(press(KeyCode::Char('q'))).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_navigation_with_empty_list() {
        let mut app = test_app();
        app.sync_selection();
        app.handle_key(press(KeyCode::Char('j'))).await;
        app.handle_key(press(KeyCode::Char('k'))).await;
        app.handle_key(press(KeyCode::Char('d'))).await;
        assert_eq!(app.list_state.selected(), None);
    }
}
