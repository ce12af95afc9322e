//! Fixed-interval sampling loop

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ctreuse_common::{EventSink, MonitorResult, TableSource};
use ctreuse_engine::SnapshotDiffer;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::stats::PassStats;

/// Drives the differ against a table source, one pass at a time.
///
/// The poller owns the differ and serializes passes by construction; the
/// engine itself is never shared. Pass failures propagate unchanged: the
/// poller never retries or sleeps beyond its interval, abort-vs-retry is
/// the caller's policy.
pub struct Poller {
    source: Arc<dyn TableSource>,
    sink: Arc<dyn EventSink>,
    differ: SnapshotDiffer,
    filter: Option<String>,
    interval: Duration,
    stats: PassStats,
}

impl Poller {
    pub fn new(
        source: Arc<dyn TableSource>,
        sink: Arc<dyn EventSink>,
        interval: Duration,
        filter: Option<String>,
    ) -> Self {
        Self {
            source,
            sink,
            differ: SnapshotDiffer::new(),
            filter,
            interval,
            stats: PassStats::new(),
        }
    }

    /// Run a single sampling pass; returns the number of reuse events.
    ///
    /// Fetches the table, ingests it, and forwards every detected event to
    /// the sink exactly once.
    pub async fn run_once(&mut self) -> MonitorResult<usize> {
        let table = self.source.fetch().await?;
        let events = self
            .differ
            .ingest(&table, self.filter.as_deref(), Utc::now())?;
        self.sink.emit(&events).await?;

        self.stats
            .record_pass(self.differ.previous().len(), events.len());
        debug!(
            "pass {}: {} tracked entries, {} reuse events",
            self.stats.passes(),
            self.differ.previous().len(),
            events.len()
        );
        Ok(events.len())
    }

    /// Sample at the configured interval until a pass fails.
    pub async fn run(&mut self) -> MonitorResult<()> {
        info!(
            "Sampling {} every {}s",
            self.source.describe(),
            self.interval.as_secs()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.run_once().await?;
        }
    }

    #[must_use]
    pub fn stats(&self) -> &PassStats {
        &self.stats
    }
}
