use crate::timer::TimerStatus;

/// Errors raised by timer engine transitions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {op} while the timer is {status}")]
    InvalidTransition {
        op: &'static str,
        status: TimerStatus,
    },

    #[error("no activity selected; name one before starting the timer")]
    NoActivity,

    #[error("activity name must not be empty")]
    EmptyActivity,
}

/// Reasons a session record is rejected as malformed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {id} has an empty activity")]
    EmptyActivity { id: String },

    #[error("session {id} ends ({end}) before it starts ({start})")]
    EndBeforeStart { id: String, start: i64, end: i64 },

    #[error("session {id} accounts {accounted}ms but only spans {wall}ms")]
    DurationExceedsWall {
        id: String,
        accounted: u64,
        wall: u64,
    },

    #[error("session {id} has timestamps outside the supported range ({start}..{end})")]
    OutOfRange { id: String, start: i64, end: i64 },

    #[error("session {id} has no date label")]
    MissingDate { id: String },
}

/// Errors from loading or saving the session history.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed session history: {0}")]
    Malformed(String),
}
