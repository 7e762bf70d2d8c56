//! # ARBOR Error Types
//!
//! Startup-time failures. Once the scene is built nothing in the frame path
//! returns an error, and gesture failures arrive as `GestureStatus::Failed`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or starting a session.
#[derive(Error, Debug)]
pub enum ArborError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `ArborConfig`.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The config parsed but describes an unusable scene.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ARBOR operations.
pub type ArborResult<T> = Result<T, ArborError>;
