//! Error types for the ctreuse monitor
//!
//! Pass-level failures only. Routine row filtering (short rows, non-TCP
//! transport, filtered destinations, entries far from expiry) is not an
//! error and never appears here; the parser returns `None` for those.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Table source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed expiry token '{token}': expected base-10 seconds")]
    MalformedExpiry { token: String },

    #[error("Event rendering error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
