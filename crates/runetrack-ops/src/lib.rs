//! Operational helpers: logging and data-directory bootstrap.

use std::path::PathBuf;

use runetrack_types::{config::OpsConfig, Result, TrackerError};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const LOG_FILE: &str = "logs.txt";
const LOG_TIME_FORMAT: &str = "%H-%M-%S";

/// Initializes console logging plus the append-only `logs.txt` diagnostic
/// log. The returned guard flushes the file writer and must be held for the
/// life of the process.
pub fn init_tracing(config: &OpsConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(config.log_level.clone())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| TrackerError::Ops(format!("failed to create log filter: {err}")))?;

    let appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.into())),
        )
        .try_init()
        .map_err(|err| TrackerError::Ops(format!("tracing init error: {err}")))?;
    Ok(guard)
}

/// Creates the tracked-data root if it does not exist yet.
pub fn ensure_data_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    std::fs::create_dir_all(&dir)
        .map_err(|err| TrackerError::Ops(format!("failed to create data dir: {err}")))?;
    info!("Tracked data directory ready at {:?}", dir);
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_data_dir_creates_nested_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("nested").join("Tracked Data");
        let created =
            ensure_data_dir(target.to_str().expect("utf8 path")).expect("create data dir");
        assert!(created.is_dir());

        // Idempotent on an existing directory.
        ensure_data_dir(target.to_str().expect("utf8 path")).expect("recreate data dir");
    }
}
