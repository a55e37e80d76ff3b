//! Session artifact persistence.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use runetrack_types::{
    game::{BoardSnapshot, DeckInfo, GameResult},
    session::SessionHandle,
    Result, TrackerError,
};

mod fs;

pub use fs::FsRecorder;

/// Owns all side-effecting persistence for one session.
///
/// Writes must not silently swallow failures: a failed write surfaces as a
/// persistence error, which the caller treats as fatal since a broken
/// recording stream cannot be trusted to resume.
pub trait Recorder: Send + Sync {
    /// Creates the storage location for a new session.
    fn open(&self, started_at: DateTime<Local>) -> Result<SessionHandle>;
    /// Persists the deck artifact; calling twice overwrites.
    fn write_deck(&self, handle: &SessionHandle, deck: &DeckInfo) -> Result<()>;
    /// Persists one board sample, named by its second-granularity timestamp.
    fn write_board(
        &self,
        handle: &SessionHandle,
        at: DateTime<Local>,
        snapshot: &BoardSnapshot,
    ) -> Result<()>;
    /// Persists the final result artifact.
    fn write_result(&self, handle: &SessionHandle, result: &GameResult) -> Result<()>;
}

/// In-memory recorder for early development and tracker tests.
#[derive(Clone, Default)]
pub struct MemoryRecorder {
    log: Arc<Mutex<MemoryLog>>,
}

#[derive(Default)]
struct MemoryLog {
    opened: Vec<String>,
    decks: Vec<(String, String)>,
    boards: Vec<(String, String)>,
    results: Vec<(String, String)>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened_sessions(&self) -> Vec<String> {
        self.log.lock().map(|l| l.opened.clone()).unwrap_or_default()
    }

    /// (session name, payload) pairs in write order.
    pub fn deck_writes(&self) -> Vec<(String, String)> {
        self.log.lock().map(|l| l.decks.clone()).unwrap_or_default()
    }

    pub fn board_writes(&self) -> Vec<(String, String)> {
        self.log.lock().map(|l| l.boards.clone()).unwrap_or_default()
    }

    pub fn result_writes(&self) -> Vec<(String, String)> {
        self.log.lock().map(|l| l.results.clone()).unwrap_or_default()
    }

    fn record(
        &self,
        entry: impl FnOnce(&mut MemoryLog),
    ) -> Result<()> {
        let mut guard = self
            .log
            .lock()
            .map_err(|_| recorder_error("failed to lock memory recorder"))?;
        entry(&mut guard);
        Ok(())
    }
}

impl Recorder for MemoryRecorder {
    fn open(&self, started_at: DateTime<Local>) -> Result<SessionHandle> {
        let handle = SessionHandle::new(std::path::Path::new("memory"), started_at);
        let name = handle.name().to_string();
        self.record(|log| log.opened.push(name))?;
        Ok(handle)
    }

    fn write_deck(&self, handle: &SessionHandle, deck: &DeckInfo) -> Result<()> {
        let payload = serde_json::to_string(deck)
            .map_err(|err| recorder_error(format!("failed to serialize deck: {err}")))?;
        let name = handle.name().to_string();
        self.record(|log| log.decks.push((name, payload)))
    }

    fn write_board(
        &self,
        handle: &SessionHandle,
        _at: DateTime<Local>,
        snapshot: &BoardSnapshot,
    ) -> Result<()> {
        let name = handle.name().to_string();
        let payload = snapshot.to_payload();
        self.record(|log| log.boards.push((name, payload)))
    }

    fn write_result(&self, handle: &SessionHandle, result: &GameResult) -> Result<()> {
        let name = handle.name().to_string();
        let payload = result.to_payload();
        self.record(|log| log.results.push((name, payload)))
    }
}

/// Generate an error aligned with recorder semantics.
pub fn recorder_error(message: impl Into<String>) -> TrackerError {
    TrackerError::Persistence(message.into())
}
