//! Durable session persistence.
//!
//! One fixed key maps to the JSON-serialized session: read at startup,
//! overwritten on every transition, removed on explicit reset. Malformed
//! durable data is discarded and treated as "no prior session".

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::session::Session;

/// File name of the durable slot inside the state directory.
pub const SESSION_FILE: &str = "session.json";

/// A durable single-slot store for the session.
///
/// Reads and writes are synchronous single-key overwrites; no partial-write
/// recovery is attempted.
pub trait SessionStore {
    /// Load the persisted session, if a well-formed one exists.
    fn load(&self) -> Result<Option<Session>>;

    /// Overwrite the slot with `session`.
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the slot.
    fn clear(&self) -> Result<()>;
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn load(&self) -> Result<Option<Session>> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> Result<()> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

/// File-backed store: the slot is a single JSON file under a state directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SESSION_FILE),
        }
    }

    /// Path of the underlying slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session from {}", self.path.display()))?;
        match serde_json::from_str::<Session>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(
                    "discarding malformed session state at {}: {e}",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session).context("failed to serialize session")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write session to {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory store for tests. Keeps the serialized form so a load exercises
/// the same JSON round-trip as the file store.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the slot currently holds a value.
    pub fn is_occupied(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>> {
        let slot = self.slot.lock().unwrap();
        match slot.as_deref() {
            None => Ok(None),
            Some(json) => match serde_json::from_str::<Session>(json) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    tracing::warn!("discarding malformed session state: {e}");
                    Ok(None)
                }
            },
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session).context("failed to serialize session")?;
        *self.slot.lock().unwrap() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}
