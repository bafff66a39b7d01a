use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::util::{percent, span_ms};

/// Latest instant a stored record may carry: 9999-12-31T23:59:59.999Z.
pub const MAX_EPOCH_MS: i64 = 253_402_300_799_999;

/// One finished activity-tracking interval.
///
/// Field names serialize in camelCase so a history file reads the same as the
/// flat JSON snapshot the page kept in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub activity: String,
    pub start_time: i64,
    pub end_time: i64,
    /// Active (running) milliseconds
    pub duration: u64,
    pub paused_time: u64,
    /// Local calendar day of `start_time`, see [`crate::clock::day_label`]
    pub date: String,
}

impl Session {
    pub fn wall_time(&self) -> u64 {
        span_ms(self.start_time, self.end_time)
    }

    /// Share of the wall time spent running, as a whole percentage
    pub fn productivity(&self) -> u32 {
        percent(self.duration, self.wall_time())
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.activity.trim().is_empty() {
            return Err(SessionError::EmptyActivity {
                id: self.id.clone(),
            });
        }
        if self.start_time < 0 || self.end_time > MAX_EPOCH_MS {
            return Err(SessionError::OutOfRange {
                id: self.id.clone(),
                start: self.start_time,
                end: self.end_time,
            });
        }
        if self.end_time < self.start_time {
            return Err(SessionError::EndBeforeStart {
                id: self.id.clone(),
                start: self.start_time,
                end: self.end_time,
            });
        }

        let wall = self.wall_time();
        let accounted = self.duration.saturating_add(self.paused_time);
        if self.duration > wall || accounted > wall {
            return Err(SessionError::DurationExceedsWall {
                id: self.id.clone(),
                accounted,
                wall,
            });
        }
        if self.date.is_empty() {
            return Err(SessionError::MissingDate {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Result shown when the user asks to end a session, before committing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub activity: String,
    pub active_time: u64,
    pub paused_time: u64,
    pub total_time: u64,
    pub productivity: u32,
}
