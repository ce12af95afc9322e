//! Event rendering sinks

use async_trait::async_trait;
use ctreuse_common::{EventSink, MonitorError, MonitorResult, ReuseEvent};

/// Renders each reuse event as one human-readable line on stdout.
pub struct TextSink;

impl TextSink {
    fn render(event: &ReuseEvent) -> String {
        format!(
            "{} - from: {}:{} - to {}:{}, dest: {}:{} {}-{}",
            event.timestamp,
            event.from_ip,
            event.from_port,
            event.to_ip,
            event.to_port,
            event.dest_ip,
            event.dest_port,
            event.old_expiry,
            event.new_expiry
        )
    }
}

#[async_trait]
impl EventSink for TextSink {
    async fn emit(&self, events: &[ReuseEvent]) -> MonitorResult<()> {
        for event in events {
            println!("{}", Self::render(event));
        }
        Ok(())
    }
}

/// Renders each reuse event as one JSON object per line.
pub struct JsonSink;

#[async_trait]
impl EventSink for JsonSink {
    async fn emit(&self, events: &[ReuseEvent]) -> MonitorResult<()> {
        for event in events {
            let line = serde_json::to_string(event)
                .map_err(|e| MonitorError::Render(e.to_string()))?;
            println!("{}", line);
        }
        Ok(())
    }
}
