//! Fetch with bounded retry
//!
//! A single GET is retried with a fixed delay until it succeeds, the server
//! answers 401, or the attempt budget runs out.

use super::error::FetchError;
use super::scheduler::Scheduler;
use crate::consts::dashboard_consts::fetching;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Expired or missing session. Terminal: retrying won't fix credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Per-request options forwarded to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: fetching::MAX_RETRIES,
            delay: fetching::retry_delay(),
        }
    }
}

/// Issues one HTTP GET.
///
/// `Err` means no response was obtained at all; any status, including errors,
/// comes back as `Ok`.
#[cfg_attr(test, automock)]
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<ApiResponse, FetchError>;
}

/// Fetches `url`, retrying network failures and non-401 error statuses.
///
/// Performs at most `policy.max_retries + 1` attempts, sleeping `policy.delay`
/// between them. A 2xx or a 401 is returned immediately; after the last
/// attempt the last failure is returned unchanged.
pub async fn fetch_with_retry(
    transport: &dyn Transport,
    scheduler: &dyn Scheduler,
    url: &str,
    options: &RequestOptions,
    policy: RetryPolicy,
) -> Result<ApiResponse, FetchError> {
    let mut attempt = 0;

    loop {
        let failure = match transport.get(url, options).await {
            Ok(response) if response.is_success() || response.is_unauthorized() => {
                return Ok(response);
            }
            Ok(response) => FetchError::Http {
                status: response.status,
            },
            Err(e) => e,
        };

        if attempt >= policy.max_retries {
            return Err(failure);
        }

        log::debug!(
            "Retrying fetch to {}, {} attempts left ({})",
            url,
            policy.max_retries - attempt,
            failure
        );
        scheduler.sleep(policy.delay).await;
        attempt += 1;
    }
}
