use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use schedyulah::app::{App, Page};
use schedyulah::clock::ManualClock;
use schedyulah::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use schedyulah::stats::DashboardLimits;
use schedyulah::store::{MemoryStore, SessionLog};
use schedyulah::{TimerEngine, TimerStatus};

// Headless integration using the internal runtime + App without a TTY.
// Keys arrive through TestEventSource; timeouts become ticks that sample the
// engine, with a manual clock standing in for wall time.

fn key(c: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(c, KeyModifiers::NONE))
}

fn new_app(clock: &ManualClock) -> App<MemoryStore, ManualClock> {
    let engine = TimerEngine::new(clock.clone(), Duration::from_millis(100));
    let log = SessionLog::open(MemoryStore::new()).unwrap();
    App::new(engine, log, DashboardLimits::default())
}

#[test]
fn headless_session_flow_records_to_log() {
    let clock = ManualClock::new(1_700_000_000_000);
    let mut app = new_app(&clock);

    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );

    for c in "Focus".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char(' '))).unwrap();

    // Drain the queued keys
    for _ in 0..7 {
        if let AppEvent::Key(k) = runner.step().event {
            app.on_key(k);
        }
    }
    assert_eq!(app.page, Page::Timer);
    assert_eq!(app.engine.status(), TimerStatus::Running);

    // Ten ticks of 100ms each
    for _ in 0..10 {
        clock.advance(100);
        let step = runner.step();
        match step.event {
            AppEvent::Tick => {
                assert!(step.tick.is_some());
                app.on_tick(Duration::from_millis(100));
            }
            other => panic!("expected Tick, got {other:?}"),
        }
    }
    assert_eq!(app.engine.display().elapsed, 1_000);
    assert_eq!(app.engine.ticks(), 10);

    tx.send(key(KeyCode::Char('e'))).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    for _ in 0..2 {
        if let AppEvent::Key(k) = runner.step().event {
            app.on_key(k);
        }
    }

    assert_eq!(app.page, Page::Dashboard);
    assert_eq!(app.log.sessions().len(), 1);
    assert_eq!(app.log.sessions()[0].activity, "Focus");
    assert_eq!(app.log.sessions()[0].duration, 1_000);

    // The schedule died with the session: further ticks change nothing
    clock.advance(5_000);
    if let AppEvent::Tick = runner.step().event {
        app.on_tick(Duration::from_millis(100));
    }
    assert_eq!(app.engine.display().elapsed, 0);
    assert_eq!(app.engine.tick_interval(), None);
}

#[test]
fn headless_pause_freezes_display_between_ticks() {
    let clock = ManualClock::new(0);
    let mut app = new_app(&clock);
    app.start_activity("Reading").unwrap();
    app.on_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));

    clock.advance(750);
    app.on_tick(Duration::from_millis(100));
    app.on_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
    assert_eq!(app.engine.status(), TimerStatus::Paused);

    for _ in 0..5 {
        clock.advance(100);
        app.on_tick(Duration::from_millis(100));
    }
    let display = app.engine.display();
    assert_eq!(display.elapsed, 750);
    assert_eq!(display.total, 1_250);
}

#[test]
fn headless_new_activity_discards_open_session() {
    let clock = ManualClock::new(0);
    let mut app = new_app(&clock);
    app.start_activity("Reading").unwrap();
    app.on_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
    clock.advance(2_000);

    app.on_key(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE));
    assert_eq!(app.page, Page::Home);
    // Session keeps running while browsing other pages
    assert_eq!(app.engine.status(), TimerStatus::Running);

    app.start_activity("Writing").unwrap();
    assert_eq!(app.engine.status(), TimerStatus::Idle);
    assert!(app.log.sessions().is_empty());
}
