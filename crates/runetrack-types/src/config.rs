use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Result, TrackerError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the game client's local status API.
    pub base_url: String,
    /// Per-request timeout; 0 leaves the transport default in place.
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Pause between polls while idle or waiting for a valid deck.
    pub idle_poll_ms: u64,
    /// Pause between board samples while a match is in progress.
    pub sample_poll_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Root directory for per-session artifacts.
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpsConfig {
    pub log_level: String,
    /// Directory the append-only `logs.txt` lives in.
    pub log_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunetrackConfig {
    pub client: ClientConfig,
    pub tracker: TrackerConfig,
    pub recorder: RecorderConfig,
    pub ops: OpsConfig,
}

impl RunetrackConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            TrackerError::Configuration(format!(
                "unable to read config file {}: {err}",
                path_ref.display()
            ))
        })?;
        toml::from_str(&contents).map_err(|err| {
            TrackerError::Configuration(format!(
                "failed to parse config file {}: {err}",
                path_ref.display()
            ))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.client.base_url.is_empty() {
            return Err(TrackerError::Configuration(
                "client.base_url must not be empty".into(),
            ));
        }
        if self.tracker.idle_poll_ms == 0 {
            return Err(TrackerError::Configuration(
                "tracker.idle_poll_ms must be greater than zero".into(),
            ));
        }
        if self.tracker.sample_poll_ms == 0 {
            return Err(TrackerError::Configuration(
                "tracker.sample_poll_ms must be greater than zero".into(),
            ));
        }
        if self.recorder.data_dir.is_empty() {
            return Err(TrackerError::Configuration(
                "recorder.data_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}
