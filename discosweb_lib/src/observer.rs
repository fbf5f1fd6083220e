//! Progress callbacks emitted by the engine.
//!
//! The engine never prints; terminal output is the caller's business.

use std::time::Duration;

use crate::summary::{Statistic, YearlySummary};

/// Receives progress events. Every method has a no-op default.
pub trait ProgressObserver: Send + Sync {
    /// A throttling response was received; `wait` is the full delay.
    fn throttled(&self, _wait: Duration, _context: &str) {}

    /// One countdown tick while waiting out a rate limit.
    fn countdown(&self, _remaining_secs: u64, _context: &str) {}

    /// The wait is over and the request is about to be re-issued.
    fn resumed(&self, _context: &str) {}

    fn page_fetched(&self, _context: &str, _page: usize, _records: usize) {}

    fn year_started(&self, _year: i32, _statistic: Statistic) {}

    /// Progress through the qualifying launches of the current year.
    fn launch_walked(&self, _year: i32, _done: usize, _total: usize) {}

    fn year_finished(&self, _summary: &YearlySummary) {}
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}
