// Library surface for headless/integration tests and reuse.
// The binary only adds argument parsing and terminal setup on top.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod quotes;
pub mod report;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod store;
pub mod timer;
pub mod ui;
pub mod util;

pub use error::{SessionError, StoreError, TimerError};
pub use session::{Session, SessionSummary};
pub use timer::{TimerEngine, TimerState, TimerStatus};
