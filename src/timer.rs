use log::{debug, info};
use std::time::Duration;

use crate::clock::{local_day_label, Clock, SystemClock};
use crate::error::TimerError;
use crate::session::{Session, SessionSummary};
use crate::util::{percent, span_ms};

pub const DEFAULT_TICK_RATE_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Accounting for the session currently on the clock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub is_running: bool,
    /// Start of the current run segment, shifted back by the time already
    /// accumulated so `now - start_time` is always the total active time.
    pub start_time: Option<i64>,
    pub elapsed_time: u64,
    pub total_paused_time: u64,
}

/// Live pair shown on the timer page, refreshed on each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerDisplay {
    pub elapsed: u64,
    pub total: u64,
}

/// Periodic sampling owned by the engine. Armed when a session opens and
/// dropped when it closes; ticks arriving without one are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TickSchedule {
    interval: Duration,
    ticks: u64,
}

/// Stopwatch for one activity at a time
#[derive(Debug)]
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    tick_rate: Duration,
    activity: Option<String>,
    state: TimerState,
    session_start: Option<i64>,
    pause_start: Option<i64>,
    now: i64,
    preview_open: bool,
    schedule: Option<TickSchedule>,
}

impl TimerEngine<SystemClock> {
    pub fn system(tick_rate: Duration) -> Self {
        Self::new(SystemClock, tick_rate)
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn new(clock: C, tick_rate: Duration) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            tick_rate,
            activity: None,
            state: TimerState::default(),
            session_start: None,
            pause_start: None,
            now,
            preview_open: false,
            schedule: None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        if self.state.is_running {
            TimerStatus::Running
        } else if self.session_start.is_some() {
            TimerStatus::Paused
        } else {
            TimerStatus::Idle
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }

    pub fn has_open_session(&self) -> bool {
        self.session_start.is_some()
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview_open
    }

    /// Interval of the armed sampling schedule, `None` once cancelled
    pub fn tick_interval(&self) -> Option<Duration> {
        self.schedule.map(|s| s.interval)
    }

    pub fn ticks(&self) -> u64 {
        self.schedule.map(|s| s.ticks).unwrap_or(0)
    }

    pub fn display(&self) -> TimerDisplay {
        TimerDisplay {
            elapsed: self.state.elapsed_time,
            total: self
                .session_start
                .map(|start| span_ms(start, self.now))
                .unwrap_or(0),
        }
    }

    /// Switch to a new activity, discarding whatever session was open.
    pub fn begin_activity(&mut self, label: &str) -> Result<(), TimerError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(TimerError::EmptyActivity);
        }
        if self.has_open_session() {
            debug!(
                "discarding open session for {:?} in favour of {label:?}",
                self.activity
            );
        }
        self.reset();
        self.activity = Some(label.to_string());
        Ok(())
    }

    /// Start a fresh session, or resume a paused one. Starting while already
    /// running is a no-op.
    pub fn start(&mut self) -> Result<TimerStatus, TimerError> {
        let now = self.clock.now_ms();
        match self.status() {
            TimerStatus::Running => {
                debug!("start ignored: timer already running");
            }
            TimerStatus::Paused => {
                let pause = self
                    .pause_start
                    .take()
                    .map(|p| span_ms(p, now))
                    .unwrap_or(0);
                let elapsed = i64::try_from(self.state.elapsed_time).unwrap_or(i64::MAX);
                self.state.start_time = Some(now.saturating_sub(elapsed));
                self.state.total_paused_time = self.state.total_paused_time.saturating_add(pause);
                self.state.is_running = true;
                self.now = now;
                debug!("resumed after {pause}ms pause");
            }
            TimerStatus::Idle => {
                if self.activity.is_none() {
                    return Err(TimerError::NoActivity);
                }
                self.session_start = Some(now);
                self.state = TimerState {
                    is_running: true,
                    start_time: Some(now),
                    elapsed_time: 0,
                    total_paused_time: 0,
                };
                self.now = now;
                self.schedule = Some(TickSchedule {
                    interval: self.tick_rate,
                    ticks: 0,
                });
                debug!("session started at {now} for {:?}", self.activity);
            }
        }
        Ok(self.status())
    }

    /// Freeze active time. Pausing an already paused timer is a no-op.
    pub fn pause(&mut self) -> Result<TimerStatus, TimerError> {
        let now = self.clock.now_ms();
        match self.status() {
            TimerStatus::Idle => {
                return Err(TimerError::InvalidTransition {
                    op: "pause",
                    status: TimerStatus::Idle,
                })
            }
            TimerStatus::Paused => {}
            TimerStatus::Running => {
                self.state.elapsed_time = self.elapsed_at(now);
                self.state.is_running = false;
                self.pause_start = Some(now);
                self.now = now;
                debug!("paused at {}ms active", self.state.elapsed_time);
            }
        }
        Ok(self.status())
    }

    /// Start or pause depending on the current state
    pub fn toggle(&mut self) -> Result<TimerStatus, TimerError> {
        match self.status() {
            TimerStatus::Running => self.pause(),
            TimerStatus::Idle | TimerStatus::Paused => self.start(),
        }
    }

    /// Re-project elapsed time from the run anchor and refresh the total
    /// clock. Recomputing rather than adding keeps repeated samples drift free.
    pub fn sample(&mut self) {
        let now = self.clock.now_ms();
        if self.state.is_running {
            self.state.elapsed_time = self.elapsed_at(now);
        }
        self.now = now;
    }

    /// Scheduled tick. Returns false when no schedule is armed.
    pub fn on_tick(&mut self) -> bool {
        let Some(schedule) = self.schedule.as_mut() else {
            return false;
        };
        schedule.ticks = schedule.ticks.wrapping_add(1);
        self.sample();
        true
    }

    /// Figures for ending the session now, without touching the accounting.
    pub fn summary(&self) -> Result<SessionSummary, TimerError> {
        let now = self.clock.now_ms();
        let session_start = self.session_start_for("end session")?;
        let elapsed = self.elapsed_at(now);
        let total = span_ms(session_start, now);

        Ok(SessionSummary {
            activity: self.activity.clone().unwrap_or_default(),
            active_time: elapsed,
            paused_time: self.paused_at(now),
            total_time: total,
            productivity: percent(elapsed, total),
        })
    }

    /// Open the end-session preview. The session keeps running underneath
    /// until it is committed or the preview is discarded.
    pub fn end_session_preview(&mut self) -> Result<SessionSummary, TimerError> {
        let summary = self.summary()?;
        self.preview_open = true;
        Ok(summary)
    }

    pub fn discard_preview(&mut self) {
        self.preview_open = false;
    }

    /// Finalize the open session into an immutable record and go idle.
    pub fn commit_session(&mut self) -> Result<Session, TimerError> {
        let now = self.clock.now_ms();
        let session_start = self.session_start_for("commit session")?;
        let activity = self.activity.clone().ok_or(TimerError::NoActivity)?;

        let end_time = now.max(session_start);
        let wall = span_ms(session_start, end_time);
        let duration = self.elapsed_at(now).min(wall);
        let paused_time = self.paused_at(now).min(wall - duration);

        let session = Session {
            id: session_id(now),
            activity,
            start_time: session_start,
            end_time,
            duration,
            paused_time,
            date: local_day_label(session_start),
        };

        info!(
            "committed session {} ({}): {}ms active, {}ms paused",
            session.id, session.activity, session.duration, session.paused_time
        );
        self.reset();
        Ok(session)
    }

    /// Back to idle, keeping the current activity. Cancels the tick schedule.
    pub fn reset(&mut self) {
        self.state = TimerState::default();
        self.session_start = None;
        self.pause_start = None;
        self.preview_open = false;
        self.schedule = None;
        self.now = self.clock.now_ms();
    }

    fn session_start_for(&self, op: &'static str) -> Result<i64, TimerError> {
        self.session_start.ok_or(TimerError::InvalidTransition {
            op,
            status: TimerStatus::Idle,
        })
    }

    fn elapsed_at(&self, now: i64) -> u64 {
        match (self.state.is_running, self.state.start_time) {
            (true, Some(anchor)) => span_ms(anchor, now),
            _ => self.state.elapsed_time,
        }
    }

    fn paused_at(&self, now: i64) -> u64 {
        let pending = self.pause_start.map(|p| span_ms(p, now)).unwrap_or(0);
        self.state.total_paused_time.saturating_add(pending)
    }
}

fn session_id(now: i64) -> String {
    format!("{now}-{:04x}", rand::random::<u16>())
}
