use thiserror::Error;

use crate::script::ScriptError;

/// Errors surfaced by the CLI commands; the classifier itself never fails
#[derive(Error, Debug)]
pub enum AppError {
    /// Reading batch input or writing results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data that could not be rendered or validated
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Hex decoding of script input
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Script tokenization
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Invalid batch record
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Result alias used throughout the CLI layer
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
