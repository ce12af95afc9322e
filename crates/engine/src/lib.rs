//! Snapshot-diff engine for conntrack reuse detection
//!
//! Two components in a straight pipeline:
//! - `parse_row` turns one whitespace-split table row into a typed entry,
//!   or rejects it
//! - `SnapshotDiffer` keys parsed entries by fingerprint and reports
//!   identities whose tracking timer moved up since the previous sample
//!
//! The engine is synchronous and performs no I/O; callers own cadence and
//! serialization.

mod differ;
mod parser;

pub use differ::SnapshotDiffer;
pub use parser::parse_row;
