use chrono::{Local, TimeZone, Utc};
use std::fmt::Display;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Calendar-day key shared by session records and the dashboard "today" filter.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Source of "now" for the timer engine, in epoch milliseconds
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by chrono
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Settable clock for tests and headless drivers.
///
/// Clones share the same instant, so a test can keep one handle and advance
/// the engine's copy.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: i64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Day label for an instant as seen in `tz`.
///
/// Returns an empty string for instants chrono cannot represent; such labels
/// never match a real "today" and fail session validation.
pub fn day_label<Tz>(ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format(DAY_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Day label in the local timezone
pub fn local_day_label(ms: i64) -> String {
    day_label(ms, &Local)
}
