//! Library layer for DISCOSweb statistics: throttled client, pagination,
//! resource walking, and yearly aggregation.
//!
//! Wraps the `discosweb_api` crate with a rate-limit governor that waits out
//! server throttling, cursor-driven paging, and per-year summaries.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod governor;
pub mod observer;
pub mod paginate;
pub mod summary;
pub mod validation;
pub mod walker;

pub use discosweb_api;
pub use discosweb_api::types;
pub use discosweb_api::{Cursor, LaunchQuery, ObjectQuery, Query, SortKey, StageQuery};

pub use aggregate::{Aggregator, SummarySink};
pub use client::ThrottledClient;
pub use config::{Config, ConfigError};
pub use error::DiscosError;
pub use governor::{CancelFlag, EpochClock, Governor, RequestTracker, SystemClock, TrackerSummary};
pub use observer::{NoopObserver, ProgressObserver};
pub use paginate::{fetch_all_pages, PAGE_SIZE};
pub use summary::{LaunchCounts, PayloadCounts, PropellantTotals, Statistic, YearlySummary};
pub use walker::GraphWalker;
