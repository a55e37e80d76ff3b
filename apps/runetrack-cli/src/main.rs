use std::env;

use anyhow::Result;
use runetrack_client::HttpGameClient;
use runetrack_ops::{ensure_data_dir, init_tracing};
use runetrack_recorder::FsRecorder;
use runetrack_tracker::SessionTracker;
use runetrack_types::config::{
    ClientConfig, OpsConfig, RecorderConfig, RunetrackConfig, TrackerConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();
    let _log_guard = init_tracing(&config.ops)?;
    ensure_data_dir(&config.recorder.data_dir)?;

    let client = HttpGameClient::new(&config.client)?;
    let recorder = FsRecorder::new(&config.recorder);
    let mut tracker = SessionTracker::new(config.tracker.clone(), client, recorder);

    tracker.run().await?;
    Ok(())
}

fn load_config() -> RunetrackConfig {
    let from_env = env::var("RUNETRACK_CONFIG").ok();
    let from_args = env::args().nth(1);
    let path = from_args
        .or(from_env)
        .unwrap_or_else(|| "configs/dev.toml".into());
    match RunetrackConfig::from_file(&path) {
        Ok(cfg) => {
            if let Err(err) = cfg.validate() {
                eprintln!(
                    "Invalid config in '{}': {err}. Falling back to internal defaults.",
                    path
                );
                default_config()
            } else {
                cfg
            }
        }
        Err(err) => {
            eprintln!(
                "Failed to load config from '{}': {err}. Falling back to internal defaults.",
                path
            );
            default_config()
        }
    }
}

fn default_config() -> RunetrackConfig {
    let config = RunetrackConfig {
        client: ClientConfig {
            base_url: "http://127.0.0.1:21337".into(),
            timeout_ms: 0,
        },
        tracker: TrackerConfig {
            idle_poll_ms: 1500,
            sample_poll_ms: 2000,
        },
        recorder: RecorderConfig {
            data_dir: "Tracked Data".into(),
        },
        ops: OpsConfig {
            log_level: "info".into(),
            log_dir: ".".into(),
        },
    };
    debug_assert!(config.validate().is_ok());
    config
}
