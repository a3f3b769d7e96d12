//! Error types
//!
//! Gesture detection itself never fails; errors only arise at the edges
//! (configuration files, recorded traces, hand-tracking sources).

use thiserror::Error;

/// Errors that can occur while configuring or running a fitting room
#[derive(Error, Debug)]
pub enum FittingRoomError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Unknown clothing item: {0}")]
    UnknownClothingItem(String),

    #[error("Hand tracking source error: {0}")]
    SourceError(String),
}

/// Result type for fitting room operations
pub type Result<T> = std::result::Result<T, FittingRoomError>;
