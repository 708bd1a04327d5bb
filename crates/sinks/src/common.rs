//! Common types and utilities for sinks
//!
//! Shared functionality across all sink types.

use thiserror::Error;

/// Common sink errors
///
/// Returned by sink constructors. Failures on the write path never
/// surface here: a sink that cannot deliver an entry reports through
/// `tracing` and drops it, so logging can never take the host down.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Sink initialization failed
    #[error("failed to initialize sink: {0}")]
    Init(String),

    /// Failed to create the output directory
    #[error("failed to create directory: {path}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    /// Create an initialization error
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create a directory-creation error
    pub fn create_dir(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
