//! Rate-limit governor for DISCOSweb requests.
//!
//! The API allows only a handful of requests per minute and answers excess
//! requests with HTTP 429 plus an `X-RateLimit-Reset` epoch. The governor
//! re-issues a throttled request after waiting until that reset (plus one
//! second), counting the wait down one second at a time so a caller can
//! observe progress and cancel between ticks.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use discosweb_api::types::RateLimitState;
use tokio::time::sleep;

use crate::error::DiscosError;
use crate::observer::{NoopObserver, ProgressObserver};

/// Wait used when a throttling response carries no reset information.
pub const DEFAULT_FALLBACK_WAIT: Duration = Duration::from_secs(60);

/// Source of the current Unix time in seconds.
pub trait EpochClock: Send + Sync {
    fn now(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl EpochClock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Shared flag checked on every countdown tick.
#[derive(Debug, Default, Clone)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Delay until `reset`, plus one second, never negative.
pub fn wait_duration(reset: i64, now: i64) -> Duration {
    let secs = reset.saturating_sub(now).saturating_add(1).max(0);
    Duration::from_secs(secs as u64)
}

pub struct Governor {
    clock: Arc<dyn EpochClock>,
    observer: Arc<dyn ProgressObserver>,
    cancel: CancelFlag,
    fallback_wait: Duration,
    tracker: RequestTracker,
}

impl Default for Governor {
    fn default() -> Self {
        Self::new(Arc::new(NoopObserver), CancelFlag::new())
    }
}

impl Governor {
    pub fn new(observer: Arc<dyn ProgressObserver>, cancel: CancelFlag) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            observer,
            cancel,
            fallback_wait: DEFAULT_FALLBACK_WAIT,
            tracker: RequestTracker::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn EpochClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_fallback_wait(mut self, wait: Duration) -> Self {
        self.fallback_wait = wait;
        self
    }

    /// Access the request tracker for outcome counters.
    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    pub fn observer(&self) -> &Arc<dyn ProgressObserver> {
        &self.observer
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// How long to wait after a throttling response with these headers.
    pub fn wait_for(&self, state: Option<&RateLimitState>) -> Duration {
        match state {
            Some(RateLimitState {
                reset: Some(reset), ..
            }) => wait_duration(*reset, self.clock.now()),
            Some(RateLimitState {
                retry_after: Some(secs),
                ..
            }) => Duration::from_secs(*secs),
            _ => self.fallback_wait,
        }
    }

    /// Execute a request, retrying for as long as the server throttles it.
    ///
    /// - On success: returns the value.
    /// - On 429 or any non-4xx failure status: waits per [`Governor::wait_for`]
    ///   and re-issues the identical request. There is no retry ceiling.
    /// - On any other 4xx: returns [`DiscosError::Client`] without retrying.
    /// - On transport or parse failures: returns [`DiscosError::Api`].
    ///
    /// `context` is passed to the observer with every countdown tick.
    pub async fn run<T, F, Fut>(&self, context: &str, mut operation: F) -> Result<T, DiscosError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, discosweb_api::Error>>,
    {
        loop {
            if self.cancel.is_cancelled() {
                return Err(DiscosError::Cancelled);
            }

            match operation().await {
                Ok(val) => {
                    self.tracker.record_success();
                    return Ok(val);
                }
                Err(err) if err.is_throttled() => {
                    let wait = self.wait_for(err.rate_limit());
                    self.tracker.record_throttled(wait);
                    tracing::info!(
                        "Throttled (status {}) during {}; waiting {}s",
                        err.status().unwrap_or_default(),
                        context,
                        wait.as_secs()
                    );
                    self.countdown(wait, context).await?;
                }
                Err(err) => {
                    let err = DiscosError::from(err);
                    self.tracker.record_error(&err);
                    if err.is_client_error() {
                        tracing::warn!("{} rejected: {}", context, err);
                    }
                    return Err(err);
                }
            }
        }
    }

    async fn countdown(&self, wait: Duration, context: &str) -> Result<(), DiscosError> {
        self.observer.throttled(wait, context);
        for remaining in (1..=wait.as_secs()).rev() {
            if self.cancel.is_cancelled() {
                self.tracker.record_cancelled_countdown();
                return Err(DiscosError::Cancelled);
            }
            self.observer.countdown(remaining, context);
            sleep(Duration::from_secs(1)).await;
            self.tracker.record_tick();
        }
        if self.cancel.is_cancelled() {
            self.tracker.record_cancelled_countdown();
            return Err(DiscosError::Cancelled);
        }
        self.observer.resumed(context);
        Ok(())
    }
}

/// Request outcomes and throttle waits over a run.
///
/// Scheduled seconds are what the reset headers asked for; slept seconds are
/// the countdown ticks actually taken. They differ only when a countdown is
/// cancelled part way.
pub struct RequestTracker {
    requests_made: AtomicU64,
    requests_succeeded: AtomicU64,
    requests_throttled: AtomicU64,
    requests_rejected: AtomicU64,
    requests_failed: AtomicU64,
    wait_secs_scheduled: AtomicU64,
    wait_secs_slept: AtomicU64,
    countdowns_cancelled: AtomicU64,
}

impl RequestTracker {
    fn new() -> Self {
        Self {
            requests_made: AtomicU64::new(0),
            requests_succeeded: AtomicU64::new(0),
            requests_throttled: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
            wait_secs_scheduled: AtomicU64::new(0),
            wait_secs_slept: AtomicU64::new(0),
            countdowns_cancelled: AtomicU64::new(0),
        }
    }

    fn record_success(&self) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// A throttled or retryable response, and the wait it scheduled.
    fn record_throttled(&self, wait: Duration) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        self.requests_throttled.fetch_add(1, Ordering::Relaxed);
        self.wait_secs_scheduled
            .fetch_add(wait.as_secs(), Ordering::Relaxed);
    }

    fn record_error(&self, err: &DiscosError) {
        self.requests_made.fetch_add(1, Ordering::Relaxed);
        let counter = if err.is_client_error() {
            &self.requests_rejected
        } else {
            &self.requests_failed
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn record_tick(&self) {
        self.wait_secs_slept.fetch_add(1, Ordering::Relaxed);
    }

    fn record_cancelled_countdown(&self) {
        self.countdowns_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> TrackerSummary {
        TrackerSummary {
            requests_made: self.requests_made.load(Ordering::Relaxed),
            requests_succeeded: self.requests_succeeded.load(Ordering::Relaxed),
            requests_throttled: self.requests_throttled.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            requests_failed: self.requests_failed.load(Ordering::Relaxed),
            wait_secs_scheduled: self.wait_secs_scheduled.load(Ordering::Relaxed),
            wait_secs_slept: self.wait_secs_slept.load(Ordering::Relaxed),
            countdowns_cancelled: self.countdowns_cancelled.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerSummary {
    pub requests_made: u64,
    pub requests_succeeded: u64,
    pub requests_throttled: u64,
    /// 4xx responses other than 429.
    pub requests_rejected: u64,
    /// Transport and parse failures.
    pub requests_failed: u64,
    pub wait_secs_scheduled: u64,
    pub wait_secs_slept: u64,
    pub countdowns_cancelled: u64,
}

impl TrackerSummary {
    /// Scheduled wait that was never slept because the run was cancelled.
    pub fn wait_secs_abandoned(&self) -> u64 {
        self.wait_secs_scheduled.saturating_sub(self.wait_secs_slept)
    }
}
