//! Error types for the API client.

use crate::types::RateLimitState;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The response body could not be decoded into the expected shape.
    #[error("Failed to parse response: {0}")]
    ParseFailed(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus {
        status: u16,
        body: String,
        rate_limit: RateLimitState,
    },
    /// A pagination cursor could not be derived from the last record of a page.
    #[error("Invalid cursor source: {0}")]
    InvalidCursor(String),
}

impl Error {
    /// The HTTP status of a non-success response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for HTTP 429 and any non-success status outside the 4xx range.
    pub fn is_throttled(&self) -> bool {
        match self.status() {
            Some(429) => true,
            Some(status) => !(400..500).contains(&status),
            None => false,
        }
    }

    /// True for 4xx responses other than 429 (malformed filter, unknown id, ...).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status) && status != 429)
    }

    /// Rate-limit headers carried by a non-success response.
    pub fn rate_limit(&self) -> Option<&RateLimitState> {
        match self {
            Error::HttpStatus { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }
}
