use log::{debug, error, warn};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use crate::session::Session;

/// Persistence collaborator for the session history
pub trait SessionStore {
    fn load(&self) -> Result<LoadedSessions, StoreError>;
    fn save(&self, sessions: &[Session]) -> Result<(), StoreError>;
}

/// Outcome of a load: the valid records, plus how many were discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSessions {
    pub sessions: Vec<Session>,
    pub dropped: usize,
}

/// Validate raw records one by one, keeping the good ones in order.
pub fn parse_records(records: Vec<Value>) -> LoadedSessions {
    let mut loaded = LoadedSessions::default();
    for (idx, raw) in records.into_iter().enumerate() {
        let session = match serde_json::from_value::<Session>(raw) {
            Ok(session) => session,
            Err(e) => {
                warn!("dropping session record #{idx}: {e}");
                loaded.dropped += 1;
                continue;
            }
        };
        if let Err(e) = session.validate() {
            warn!("dropping session record #{idx}: {e}");
            loaded.dropped += 1;
            continue;
        }
        loaded.sessions.push(session);
    }
    loaded
}

/// History kept as a pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::sessions_path().unwrap_or_else(|| PathBuf::from("sessions.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<LoadedSessions, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no session history at {}", self.path.display());
                return Ok(LoadedSessions::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Array(records) => Ok(parse_records(records)),
            other => Err(StoreError::Malformed(format!(
                "{} holds a JSON {} instead of an array",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    fn save(&self, sessions: &[Session]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(sessions)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Value>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw JSON records, valid or not
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: RefCell::new(records),
            saves: RefCell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<LoadedSessions, StoreError> {
        Ok(parse_records(self.records.borrow().clone()))
    }

    fn save(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let records = sessions
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        *self.records.borrow_mut() = records;
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Ordered session history backed by a store: loaded once, saved after
/// every append.
#[derive(Debug)]
pub struct SessionLog<S: SessionStore> {
    store: S,
    sessions: Vec<Session>,
    dropped: usize,
}

impl<S: SessionStore> SessionLog<S> {
    pub fn open(store: S) -> Result<Self, StoreError> {
        let LoadedSessions { sessions, dropped } = store.load()?;
        if dropped > 0 {
            warn!("ignored {dropped} malformed session record(s) while loading history");
        }
        debug!("loaded {} session(s)", sessions.len());
        Ok(Self {
            store,
            sessions,
            dropped,
        })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append and persist. The record stays in memory even if the save fails.
    pub fn append(&mut self, session: Session) -> Result<(), StoreError> {
        self.sessions.push(session);
        self.store.save(&self.sessions).map_err(|e| {
            error!("failed to save session history: {e}");
            e
        })
    }
}
