//! Error handling for the dashboard client

use crate::logging::LogLevel;
use thiserror::Error;

/// A retryable failure of a single fetch.
///
/// A 401 is never represented here: the fetcher hands it back as a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, DNS, CORS...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status other than 401.
    #[error("HTTP error! Status: {status}")]
    Http { status: u16 },
}

impl FetchError {
    /// Classify error and determine appropriate log level
    pub fn log_level(&self) -> LogLevel {
        match self {
            // Server errors - temporary issues
            FetchError::Http { status } if (500..=599).contains(status) => LogLevel::Warn,

            // Network issues - usually temporary
            FetchError::Network(_) => LogLevel::Warn,

            // Other client errors point at a broken deployment
            FetchError::Http { .. } => LogLevel::Error,
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The fetch failed after all retries.
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// The body of a successful response was not the expected JSON.
    #[error("Invalid response from server. Please refresh the page and try again.")]
    Parse(#[from] serde_json::Error),

    /// The preference store rejected a write.
    #[error("Preference storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_is_user_facing() {
        let err = serde_json::from_str::<Vec<u32>>("<html>").unwrap_err();
        let err = DashboardError::from(err);
        assert_eq!(
            err.to_string(),
            "Invalid response from server. Please refresh the page and try again."
        );
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err = DashboardError::from(FetchError::Http { status: 503 });
        assert_eq!(err.to_string(), "HTTP error! Status: 503");
        assert_eq!(FetchError::Http { status: 503 }.log_level(), LogLevel::Warn);
        assert_eq!(FetchError::Http { status: 404 }.log_level(), LogLevel::Error);
    }
}
