use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Subdirectory holding the per-sample board artifacts of a session.
pub const POSITIONS_DIR: &str = "Card Positions";

/// Identifies one tracked match and the storage locations for its artifacts.
///
/// Exactly one handle is live while a match is in progress; it is discarded
/// when the result is recorded and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    name: String,
    dir: PathBuf,
    positions_dir: PathBuf,
}

impl SessionHandle {
    /// Derives the session name from the local start time at second
    /// granularity (`YYYY-M-D-H-M-S`, unpadded). Two matches starting
    /// within the same second collide; accepted limitation.
    pub fn new(root: &Path, started_at: DateTime<Local>) -> Self {
        let name = started_at.format("%Y-%-m-%-d-%-H-%-M-%-S").to_string();
        let dir = root.join(&name);
        let positions_dir = dir.join(POSITIONS_DIR);
        Self {
            name,
            dir,
            positions_dir,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn positions_dir(&self) -> &Path {
        &self.positions_dir
    }
}
