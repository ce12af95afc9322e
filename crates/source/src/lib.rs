//! Conntrack table providers
//!
//! Implementations of the `TableSource` seam: the kernel interface file for
//! production, canned dumps for tests and dry runs. Providers hand back the
//! whole table text per pass; parsing stays in the engine.

use async_trait::async_trait;
use ctreuse_common::{MonitorError, MonitorResult, TableSource};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Default location of the kernel's conntrack text table.
pub const DEFAULT_CONNTRACK_PATH: &str = "/proc/net/nf_conntrack";

/// Reads the conntrack table file in full on every fetch.
pub struct ConntrackFile {
    path: PathBuf,
}

impl ConntrackFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConntrackFile {
    fn default() -> Self {
        Self::new(DEFAULT_CONNTRACK_PATH)
    }
}

#[async_trait]
impl TableSource for ConntrackFile {
    async fn fetch(&self) -> MonitorResult<String> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        debug!("read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed sequence of table dumps, one per fetch, then errors.
///
/// Lets tests drive the full sampling path with literal table text.
pub struct StaticSource {
    dumps: Mutex<VecDeque<String>>,
}

impl StaticSource {
    pub fn new<I, S>(dumps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dumps: Mutex::new(dumps.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl TableSource for StaticSource {
    async fn fetch(&self) -> MonitorResult<String> {
        self.dumps
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| MonitorError::Source("static source exhausted".to_string()))
    }

    fn describe(&self) -> String {
        "static table dumps".to_string()
    }
}
