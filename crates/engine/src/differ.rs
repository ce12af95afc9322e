//! Two-generation snapshot diffing

use chrono::{DateTime, Utc};
use ctreuse_common::{MonitorResult, ReuseEvent, Snapshot};
use tracing::warn;

use crate::parser::parse_row;

/// Detects connection-slot reuse between consecutive conntrack samples.
///
/// Owns exactly one prior generation of state. Not safe for concurrent
/// mutation; callers serialize passes (the poller does this by running one
/// pass at a time against a single owner).
#[derive(Debug, Default)]
pub struct SnapshotDiffer {
    previous: Snapshot,
}

impl SnapshotDiffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one raw table dump and return the reuse events it reveals.
    ///
    /// Parses every row, builds the new snapshot keyed by fingerprint, then
    /// compares it against the previous generation: an identity present in
    /// both whose expiry grew means the kernel's countdown timer was reset,
    /// i.e. the slot was recycled for a fresh connection. Decreased or equal
    /// expiry, vanished identities, and first-seen identities produce no
    /// event.
    ///
    /// On a parse error the previous snapshot is left untouched, so a failed
    /// pass never commits partial state.
    ///
    /// Event order follows snapshot iteration order: stable within a pass,
    /// otherwise unspecified.
    pub fn ingest(
        &mut self,
        table: &str,
        filter: Option<&str>,
        now: DateTime<Utc>,
    ) -> MonitorResult<Vec<ReuseEvent>> {
        let mut next = Snapshot::new();

        for line in table.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(entry) = parse_row(&tokens, filter)? else {
                continue;
            };
            let fingerprint = entry.params.fingerprint();
            if let Some(displaced) = next.insert(fingerprint, entry) {
                // The kernel listed the same tuple twice in one dump.
                warn!(
                    "duplicate tuple {} within one sample, keeping last row (displaced expiry {})",
                    fingerprint, displaced.expiry
                );
            }
        }

        let mut events = Vec::new();
        for (fingerprint, entry) in next.iter() {
            if let Some(old) = self.previous.get(fingerprint) {
                // The kernel counts expiry down; a larger value for the same
                // identity means the timer was reset by a new connection.
                if old.expiry < entry.expiry {
                    events.push(ReuseEvent::new(now, &entry.params, old.expiry, entry.expiry));
                }
            }
        }

        self.previous = next;
        Ok(events)
    }

    /// The snapshot retained from the most recent successful pass.
    #[must_use]
    pub fn previous(&self) -> &Snapshot {
        &self.previous
    }
}
