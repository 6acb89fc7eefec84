//! Error types for jsfuzz

use thiserror::Error;

/// Every failure that can abort a run
#[derive(Error, Debug)]
pub enum JsfuzzError {
    /// The extractor could not be started or exited non-zero
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Extractor output did not match the expected record shape
    #[error("Decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// Output file or stdout could not be written
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A generation worker panicked before finishing
    #[error("Worker error: {0}")]
    WorkerError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, JsfuzzError>;
