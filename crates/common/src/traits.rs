//! Trait seams between the diff engine and its collaborators
//!
//! The engine itself performs no I/O. Reading the kernel table and rendering
//! events are external concerns behind these traits, which keeps the core
//! testable against literal table text and in-memory sinks.

use crate::error::MonitorResult;
use crate::types::ReuseEvent;
use async_trait::async_trait;

/// Supplies the full raw text of the conntrack table on demand.
///
/// A failed fetch is fatal for that sampling pass and must be surfaced to
/// the caller, never swallowed.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch the complete table text for one sampling pass.
    async fn fetch(&self) -> MonitorResult<String>;

    /// Human-readable description of the source for startup logging.
    fn describe(&self) -> String;
}

/// Receives the reuse events detected in one sampling pass.
///
/// Each detected transition reaches the sink exactly once; rendering
/// (text line, structured log) is the sink's concern.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, events: &[ReuseEvent]) -> MonitorResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use tokio::sync::Mutex;

    struct FixedSource(&'static str);

    #[async_trait]
    impl TableSource for FixedSource {
        async fn fetch(&self) -> MonitorResult<String> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TableSource for FailingSource {
        async fn fetch(&self) -> MonitorResult<String> {
            Err(MonitorError::Source("unreadable".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    struct CountingSink(Mutex<usize>);

    #[async_trait]
    impl EventSink for CountingSink {
        async fn emit(&self, events: &[ReuseEvent]) -> MonitorResult<()> {
            *self.0.lock().await += events.len();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_source_trait() {
        let source = FixedSource("ipv4 2 tcp 6 30 ESTABLISHED");
        assert!(source.fetch().await.unwrap().starts_with("ipv4"));
        assert_eq!(source.describe(), "fixed");
    }

    #[tokio::test]
    async fn test_source_failure_surfaces() {
        let source = FailingSource;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, MonitorError::Source(_)));
    }

    #[tokio::test]
    async fn test_sink_trait() {
        let sink = CountingSink(Mutex::new(0));
        sink.emit(&[]).await.unwrap();
        assert_eq!(*sink.0.lock().await, 0);
    }
}
