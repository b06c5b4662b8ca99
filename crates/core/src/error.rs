//! Errors raised by the configuration, logging and line-count surfaces.
//!
//! Fleet operations themselves never fail.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure outside the fleet domain operations.
#[derive(Debug, Error)]
pub enum FleetError {
    /// Filesystem access failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Configuration could not be assembled or deserialised.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    /// A logger name did not match any known sink.
    #[error("unknown logger '{0}' (expected console, file, tracing or memory)")]
    UnknownLogger(String),
    /// Directory traversal failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Root being walked.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: walkdir::Error,
    },
}
