use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use std::time::Duration;

use crate::clock::{local_day_label, Clock, SystemClock};
use crate::error::TimerError;
use crate::quotes::QuoteRotator;
use crate::session::SessionSummary;
use crate::stats::{Dashboard, DashboardLimits};
use crate::store::{SessionLog, SessionStore};
use crate::timer::{TimerEngine, TimerStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Page {
    Home,
    Timer,
    Dashboard,
}

/// Page router plus the engine and history it drives
#[derive(Debug)]
pub struct App<S: SessionStore, C: Clock = SystemClock> {
    pub page: Page,
    pub engine: TimerEngine<C>,
    pub log: SessionLog<S>,
    /// Activity name being typed on the home page
    pub input: String,
    pub quotes: QuoteRotator,
    pub limits: DashboardLimits,
    pub message: Option<String>,
    pub should_quit: bool,
    preview: Option<SessionSummary>,
}

impl<S: SessionStore, C: Clock> App<S, C> {
    pub fn new(engine: TimerEngine<C>, log: SessionLog<S>, limits: DashboardLimits) -> Self {
        let message = match log.dropped() {
            0 => None,
            n => Some(format!("Skipped {n} unreadable session record(s) from history")),
        };
        Self {
            page: Page::Home,
            engine,
            log,
            input: String::new(),
            quotes: QuoteRotator::new(),
            limits,
            message,
            should_quit: false,
            preview: None,
        }
    }

    /// Figures frozen when the end-session preview was opened
    pub fn preview(&self) -> Option<&SessionSummary> {
        self.preview.as_ref()
    }

    pub fn today(&self) -> String {
        local_day_label(self.engine.clock().now_ms())
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::build(self.log.sessions(), &self.today(), self.limits)
    }

    pub fn navigate(&mut self, page: Page) {
        if page == Page::Timer && self.engine.activity().is_none() {
            self.page = Page::Home;
            return;
        }
        self.page = page;
    }

    /// Switch the engine to a new activity and show the timer
    pub fn start_activity(&mut self, label: &str) -> Result<(), TimerError> {
        self.engine.begin_activity(label)?;
        self.preview = None;
        self.input.clear();
        self.message = None;
        self.page = Page::Timer;
        Ok(())
    }

    pub fn end_session(&mut self) -> Result<(), TimerError> {
        let summary = self.engine.end_session_preview()?;
        self.quotes.reset();
        self.preview = Some(summary);
        Ok(())
    }

    /// Commit the open session, persist the history and show the dashboard.
    pub fn save_session(&mut self) -> Result<(), TimerError> {
        let session = self.engine.commit_session()?;
        self.preview = None;
        if let Err(e) = self.log.append(session) {
            self.message = Some(format!("Session kept for this run but not saved: {e}"));
        }
        self.page = Page::Dashboard;
        Ok(())
    }

    pub fn continue_session(&mut self) {
        self.engine.discard_preview();
        self.preview = None;
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.engine.on_tick();
        if self.preview.is_some() {
            self.quotes.advance(dt);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let result = match self.page {
            Page::Home => self.on_home_key(key),
            Page::Timer if self.preview.is_some() => self.on_preview_key(key),
            Page::Timer => self.on_timer_key(key),
            Page::Dashboard => {
                self.on_dashboard_key(key);
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!("{e}");
            self.message = Some(e.to_string());
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) -> Result<(), TimerError> {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.navigate(Page::Dashboard),
            KeyCode::Enter => {
                let label = self.input.clone();
                self.start_activity(&label)?;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        Ok(())
    }

    fn on_timer_key(&mut self, key: KeyEvent) -> Result<(), TimerError> {
        match key.code {
            KeyCode::Char(' ') => {
                self.engine.toggle()?;
                self.message = None;
            }
            KeyCode::Char('e') if self.engine.status() != TimerStatus::Idle => self.end_session()?,
            KeyCode::Char('d') => self.navigate(Page::Dashboard),
            KeyCode::Char('h') | KeyCode::Esc => self.navigate(Page::Home),
            _ => {}
        }
        Ok(())
    }

    fn on_preview_key(&mut self, key: KeyEvent) -> Result<(), TimerError> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') => self.save_session()?,
            KeyCode::Esc | KeyCode::Char('c') => self.continue_session(),
            _ => {}
        }
        Ok(())
    }

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('h') => self.navigate(Page::Home),
            KeyCode::Char('t') => self.navigate(Page::Timer),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (ManualClock, App<MemoryStore, ManualClock>) {
        let clock = ManualClock::new(1_700_000_000_000);
        let engine = TimerEngine::new(clock.clone(), Duration::from_millis(100));
        let log = SessionLog::open(MemoryStore::new()).unwrap();
        (clock, App::new(engine, log, DashboardLimits::default()))
    }

    fn type_text(app: &mut App<MemoryStore, ManualClock>, text: &str) {
        for c in text.chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_an_activity_opens_the_timer() {
        let (_, mut app) = app();
        type_text(&mut app, "Reading");
        app.on_key(key(KeyCode::Backspace));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.page, Page::Timer);
        assert_eq!(app.engine.activity(), Some("Readin"));
        assert!(app.input.is_empty());
    }

    #[test]
    fn blank_activity_stays_home_with_message() {
        let (_, mut app) = app();
        type_text(&mut app, "   ");
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.page, Page::Home);
        assert!(app.message.is_some());
    }

    #[test]
    fn timer_page_requires_activity() {
        let (_, mut app) = app();
        app.navigate(Page::Timer);
        assert_eq!(app.page, Page::Home);
    }

    #[test]
    fn end_key_ignored_before_start() {
        let (_, mut app) = app();
        app.start_activity("Yoga").unwrap();
        app.on_key(key(KeyCode::Char('e')));
        assert!(app.preview().is_none());
    }

    #[test]
    fn full_flow_saves_to_log_and_shows_dashboard() {
        let (clock, mut app) = app();
        app.start_activity("Yoga").unwrap();
        app.on_key(key(KeyCode::Char(' ')));
        clock.advance(6_000);
        app.on_key(key(KeyCode::Char(' ')));
        clock.advance(2_000);
        app.on_key(key(KeyCode::Char('e')));

        let preview = app.preview().cloned().unwrap();
        assert_eq!(preview.productivity, 75);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.page, Page::Dashboard);
        assert_eq!(app.log.sessions().len(), 1);
        assert_eq!(app.log.store().save_count(), 1);
        assert_eq!(app.engine.status(), TimerStatus::Idle);

        let dashboard = app.dashboard();
        assert_eq!(dashboard.total_sessions, 1);
        assert_eq!(dashboard.today_active_time, 6_000);
        assert_eq!(dashboard.average_productivity, 75);
    }

    #[test]
    fn continue_session_returns_to_running_timer() {
        let (clock, mut app) = app();
        app.start_activity("Yoga").unwrap();
        app.on_key(key(KeyCode::Char(' ')));
        clock.advance(1_000);
        app.on_key(key(KeyCode::Char('e')));
        app.on_key(key(KeyCode::Esc));
        assert!(app.preview().is_none());
        assert_eq!(app.page, Page::Timer);
        assert_eq!(app.engine.status(), TimerStatus::Running);
    }

    #[test]
    fn quotes_rotate_only_in_preview() {
        let (_, mut app) = app();
        app.start_activity("Yoga").unwrap();
        app.on_key(key(KeyCode::Char(' ')));
        app.on_tick(Duration::from_secs(6));
        assert_eq!(app.quotes.index(), 0);

        app.on_key(key(KeyCode::Char('e')));
        app.on_tick(Duration::from_secs(6));
        assert_eq!(app.quotes.index(), 1);
    }

    #[test]
    fn ctrl_c_quits_from_any_page() {
        let (_, mut app) = app();
        app.start_activity("Yoga").unwrap();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn page_names() {
        assert_eq!(Page::Dashboard.to_string(), "Dashboard");
    }
}
