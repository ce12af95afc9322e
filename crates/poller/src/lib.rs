//! Sampling loop - drives the snapshot differ at a fixed cadence

mod poller;
mod stats;

pub use poller::Poller;
pub use stats::PassStats;
