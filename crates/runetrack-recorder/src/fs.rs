use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use runetrack_types::{
    config::RecorderConfig,
    game::{BoardSnapshot, DeckInfo, GameResult},
    session::SessionHandle,
    Result,
};
use tracing::info;

use crate::{recorder_error, Recorder};

const DECK_ARTIFACT: &str = "deck";
const RESULT_ARTIFACT: &str = "Game Result";

/// Filesystem recorder writing one directory per session under the
/// configured data root.
pub struct FsRecorder {
    root: PathBuf,
}

impl FsRecorder {
    pub fn new(config: &RecorderConfig) -> Self {
        Self {
            root: PathBuf::from(&config.data_dir),
        }
    }

    fn write_artifact(path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents)
            .map_err(|err| recorder_error(format!("failed to write {}: {err}", path.display())))
    }
}

impl Recorder for FsRecorder {
    fn open(&self, started_at: DateTime<Local>) -> Result<SessionHandle> {
        let handle = SessionHandle::new(&self.root, started_at);
        fs::create_dir_all(handle.positions_dir()).map_err(|err| {
            recorder_error(format!(
                "failed to create session directory {}: {err}",
                handle.positions_dir().display()
            ))
        })?;
        info!("Opened session {}", handle.name());
        Ok(handle)
    }

    fn write_deck(&self, handle: &SessionHandle, deck: &DeckInfo) -> Result<()> {
        let payload = serde_json::to_string(deck)
            .map_err(|err| recorder_error(format!("failed to serialize deck: {err}")))?;
        Self::write_artifact(&handle.dir().join(DECK_ARTIFACT), &payload)
    }

    fn write_board(
        &self,
        handle: &SessionHandle,
        at: DateTime<Local>,
        snapshot: &BoardSnapshot,
    ) -> Result<()> {
        // Second-granularity names; a later sample landing on the same
        // second overwrites the earlier one.
        let name = at.format("%H-%M-%S").to_string();
        Self::write_artifact(&handle.positions_dir().join(name), &snapshot.to_payload())
    }

    fn write_result(&self, handle: &SessionHandle, result: &GameResult) -> Result<()> {
        Self::write_artifact(&handle.dir().join(RESULT_ARTIFACT), &result.to_payload())
    }
}
