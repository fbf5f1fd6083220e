use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Rate-limit budget reported by the server on every response.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitState {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    /// Unix epoch (seconds) at which the budget resets.
    pub reset: Option<i64>,
    /// `Retry-After` in seconds, used when no reset timestamp is sent.
    pub retry_after: Option<u64>,
}

impl RateLimitState {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_value(headers, "x-ratelimit-limit"),
            remaining: header_value(headers, "x-ratelimit-remaining"),
            reset: header_value(headers, "x-ratelimit-reset"),
            retry_after: header_value(headers, "retry-after"),
        }
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<T>().ok())
}
