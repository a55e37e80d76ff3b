use thiserror::Error;

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;

/// Unified error type covering common failure scenarios across subsystems.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("operational error: {0}")]
    Ops(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackerError {
    /// A network failure means "no information this cycle"; every other
    /// variant terminates the poll loop.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TrackerError::Network(_))
    }
}
