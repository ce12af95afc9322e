//! Per-pass statistics

use tracing::info;

/// Running totals across sampling passes.
///
/// Owned exclusively by the poller; passes run one at a time so no locking
/// is needed.
#[derive(Debug, Default)]
pub struct PassStats {
    passes: u64,
    tracked_entries: usize,
    total_events: u64,
}

impl PassStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, tracked_entries: usize, events: usize) {
        self.passes += 1;
        self.tracked_entries = tracked_entries;
        self.total_events += events as u64;
    }

    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Entries in the latest retained snapshot.
    #[must_use]
    pub fn tracked_entries(&self) -> usize {
        self.tracked_entries
    }

    #[must_use]
    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    pub fn log_summary(&self) {
        info!("Sampling summary:");
        info!("  Passes: {}", self.passes);
        info!("  Entries in last snapshot: {}", self.tracked_entries);
        info!("  Reuse events: {}", self.total_events);
    }
}
