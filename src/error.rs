//! Error types

use thiserror::Error;

/// Errors raised by the encabulator library
#[derive(Debug, Error)]
pub enum EncabulatorError {
    /// The worker thread could not be started
    #[error("failed to spawn analysis worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread panicked before it finished
    #[error("analysis worker panicked")]
    WorkerPanicked,

    /// Analysis settings are out of range
    #[error("invalid analysis settings: {0}")]
    InvalidSettings(String),

    /// Configuration could not be read or written
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EncabulatorError>;
