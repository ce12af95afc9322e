//! Ctreuse Common - Shared types and traits
//!
//! This crate provides the core value types, trait seams, and error taxonomy
//! used across the ctreuse monitor:
//! - immutable connection records and their fingerprints
//! - the `TableSource` / `EventSink` boundaries between the diff engine and
//!   its collaborators
//! - typed pass-level errors

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MonitorError, MonitorResult};
pub use traits::{EventSink, TableSource};
pub use types::{ConnEntry, ConnParams, Fingerprint, ReuseEvent, Snapshot};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
