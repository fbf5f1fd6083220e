//! Error types for the library layer.

use std::fmt;

/// Errors produced by the engine, wrapping upstream API errors and adding
/// the non-retryable, cancellation and input failures the aggregator acts on.
#[derive(Debug)]
pub enum DiscosError {
    /// An error from the underlying API client that the governor does not retry
    /// (transport failure, unparseable body).
    Api(discosweb_api::Error),
    /// The server rejected the request itself (4xx other than 429). The
    /// current query or hop is abandoned; the run continues.
    Client { status: u16, body: String },
    /// A cancellation was requested while waiting out a rate limit.
    Cancelled,
    /// The next page would not start after the current one.
    StalledCursor(String),
    /// The last record of a full page has no usable sort value (missing
    /// epoch, non-numeric id), so the next page cannot be requested.
    InvalidCursor(String),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// Writing a finalized summary failed.
    Io(std::io::Error),
}

impl DiscosError {
    /// True when only the current query should be abandoned.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    /// True when the failure is confined to one query: a rejected request or
    /// a result set that cannot be paged past. The caller skips that year or
    /// launch and carries on.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::Client { .. } | Self::StalledCursor(_) | Self::InvalidCursor(_)
        )
    }
}

impl fmt::Display for DiscosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Client { status, body } => {
                write!(f, "request rejected with status {}: {}", status, body)
            }
            Self::Cancelled => write!(f, "cancelled"),
            Self::StalledCursor(msg) => write!(f, "pagination stalled: {}", msg),
            Self::InvalidCursor(msg) => write!(f, "cannot page past record: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DiscosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<discosweb_api::Error> for DiscosError {
    fn from(e: discosweb_api::Error) -> Self {
        match e {
            discosweb_api::Error::HttpStatus { status, body, .. } if is_client_status(status) => {
                Self::Client { status, body }
            }
            discosweb_api::Error::InvalidCursor(msg) => Self::InvalidCursor(msg),
            other => Self::Api(other),
        }
    }
}

impl From<std::io::Error> for DiscosError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

fn is_client_status(status: u16) -> bool {
    (400..500).contains(&status) && status != 429
}

#[cfg(test)]
mod tests {
    use super::*;
    use discosweb_api::types::RateLimitState;

    #[test]
    fn cursor_failures_are_skippable_but_not_rejections() {
        let err = DiscosError::from(discosweb_api::Error::InvalidCursor(
            "launch 6201 has no epoch".into(),
        ));
        assert!(matches!(err, DiscosError::InvalidCursor(_)));
        assert!(err.is_skippable());
        assert!(!err.is_client_error());

        assert!(DiscosError::StalledCursor("x".into()).is_skippable());
        assert!(!DiscosError::Cancelled.is_skippable());
        assert!(!DiscosError::from(discosweb_api::Error::RequestFailed).is_skippable());
    }

    #[test]
    fn rejected_status_maps_to_client() {
        let err = DiscosError::from(discosweb_api::Error::HttpStatus {
            status: 404,
            body: "Not Found".into(),
            rate_limit: RateLimitState::default(),
        });
        assert!(err.is_client_error());
        assert!(err.is_skippable());
    }
}
