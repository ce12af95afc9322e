// runner.rs
use anyhow::{anyhow, Context, Result};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use ctreuse_common::EventSink;
use ctreuse_poller::Poller;
use ctreuse_source::ConntrackFile;

use crate::args::Cli;
use crate::output::{JsonSink, TextSink};

pub async fn run_monitor(cli: Cli) -> Result<()> {
    if cli.interval == 0 {
        return Err(anyhow!("Interval must be at least 1 second"));
    }
    let filter = parse_filter(&cli.service_ip)?;

    info!("Starting conntrack reuse monitor");
    info!("Table: {}", cli.path.display());
    match &filter {
        Some(ip) => info!("Service IP filter: {}", ip),
        None => info!("Service IP filter: none"),
    }
    info!("Interval: {}s", cli.interval);

    let source = Arc::new(ConntrackFile::new(cli.path));
    let sink: Arc<dyn EventSink> = match cli.output_format.as_str() {
        "json" => Arc::new(JsonSink),
        _ => Arc::new(TextSink),
    };

    let mut poller = Poller::new(source, sink, Duration::from_secs(cli.interval), filter);

    if cli.once {
        let events = poller.run_once().await.context("Sampling pass failed")?;
        info!("Single pass complete: {} reuse events", events);
        return Ok(());
    }

    let res = tokio::select! {
        res = poller.run() => res,
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping");
            Ok(())
        }
    };

    poller.stats().log_summary();
    res.context("Sampling loop failed")?;
    Ok(())
}

/// Validate the service IP filter up front; the comparison itself stays
/// textual since the kernel's rendering is the identity.
fn parse_filter(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<IpAddr>()
        .map_err(|_| anyhow!("Invalid service IP '{}'", raw))?;
    Ok(Some(raw.to_string()))
}
