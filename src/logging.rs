//! env_logger setup. The TUI owns the terminal, so interactive runs log to a
//! file; plain-text commands log to stderr.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Install the global logger. `RUST_LOG` overrides the default `warn` filter.
///
/// With a path, output is appended to that file. If the file cannot be
/// opened logging is switched off rather than written over the UI.
pub fn init(log_file: Option<&Path>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    // A second init (tests, embedding) keeps the first logger
    let _ = builder.try_init();
}
