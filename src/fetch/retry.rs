//! Bounded retry with backoff
//!
//! The backoff arithmetic lives in [`RetryPolicy`] so it can be tested
//! without a transport; [`fetch_with_retry`] drives the actual GET loop.
//!
//! # Retry behavior
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 200 | Return body immediately |
//! | HTTP 429 | Sleep `Retry-After` if numeric, else schedule; consume the attempt |
//! | Other status | Record reason, continue to next attempt |
//! | Transport error | Record reason, continue to next attempt |
//! | Attempts exhausted | Log the last reason at error level, fail |

use crate::{FetchError, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fallback delay in seconds for any attempt index past the schedule
const FALLBACK_DELAY_SECS: u64 = 4;

/// Attempt ceiling and backoff schedule for the main content fetch
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts
    pub max_retries: u32,

    /// Per-attempt backoff schedule in seconds
    pub retry_delays: Vec<u64>,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delays: Vec<u64>) -> Self {
        Self {
            max_retries,
            retry_delays,
        }
    }

    /// Backoff before attempt `attempt` (1-based for waits: attempt 0
    /// fires immediately, attempt n sleeps `retry_delays[n-1]` first)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let secs = attempt
            .checked_sub(1)
            .and_then(|i| self.retry_delays.get(i as usize).copied())
            .unwrap_or(FALLBACK_DELAY_SECS);
        Duration::from_secs(secs)
    }

    /// Wait after a 429 on attempt `attempt`: the `Retry-After` header
    /// when it parses as a plain integer, else the schedule entry for
    /// this attempt, else the fallback.
    pub fn rate_limit_delay(&self, attempt: u32, retry_after: Option<&str>) -> Duration {
        let secs = retry_after
            .and_then(|v| v.trim().parse::<u64>().ok())
            .or_else(|| self.retry_delays.get(attempt as usize).copied())
            .unwrap_or(FALLBACK_DELAY_SECS);
        Duration::from_secs(secs)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, vec![1, 2, 4])
    }
}

/// Fetches `url` with up to `policy.max_retries` attempts
///
/// Returns the body text of the first HTTP 200 response. All failure
/// modes are retried; the last reason is retained and reported in the
/// terminal [`FetchError::RetriesExhausted`].
pub async fn fetch_with_retry(client: &Client, policy: &RetryPolicy, url: &str) -> Result<String> {
    let mut last_error: Option<String> = None;

    for attempt in 0..policy.max_retries {
        if attempt > 0 {
            let delay = policy.backoff_delay(attempt);
            tracing::info!(
                "Retrying request to {} after {}s (attempt {})",
                url,
                delay.as_secs(),
                attempt + 1
            );
            tokio::time::sleep(delay).await;
        }

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::OK {
                    match response.text().await {
                        Ok(body) => return Ok(body),
                        Err(e) => {
                            tracing::warn!(
                                "Request failed for {} (attempt {}): {}",
                                url,
                                attempt + 1,
                                e
                            );
                            last_error = Some(e.to_string());
                            continue;
                        }
                    }
                }

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok());
                    let wait = policy.rate_limit_delay(attempt, retry_after);
                    tracing::info!(
                        "Rate limited. Waiting {}s before retry.",
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }

                tracing::warn!(
                    "Request failed for {} (attempt {}): HTTP {}",
                    url,
                    attempt + 1,
                    status.as_u16()
                );
                last_error = Some(format!("HTTP {}", status.as_u16()));
            }
            Err(e) => {
                // A transport error carrying a 429 status is still a
                // rate limit; there is no Retry-After to consult.
                if e.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
                    let wait = policy.rate_limit_delay(attempt, None);
                    tracing::info!(
                        "Rate limited. Waiting {}s before retry.",
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                    continue;
                }

                tracing::warn!(
                    "Request failed for {} (attempt {}): {}",
                    url,
                    attempt + 1,
                    e
                );
                last_error = Some(e.to_string());
            }
        }
    }

    let last_error = last_error.unwrap_or_else(|| "Unknown error".to_string());
    tracing::error!(
        "All retry attempts failed for {}. Last error: {}",
        url,
        last_error
    );
    Err(FetchError::RetriesExhausted {
        url: url.to_string(),
        attempts: policy.max_retries,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_follows_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_falls_back_past_schedule() {
        let policy = RetryPolicy::new(6, vec![1, 2]);
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(4));
        assert_eq!(policy.backoff_delay(5), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_with_empty_schedule() {
        let policy = RetryPolicy::new(3, vec![]);
        assert_eq!(policy.backoff_delay(1), Duration::from_secs(4));
    }

    #[test]
    fn test_rate_limit_honors_numeric_retry_after() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.rate_limit_delay(0, Some("7")),
            Duration::from_secs(7)
        );
        assert_eq!(
            policy.rate_limit_delay(0, Some(" 12 ")),
            Duration::from_secs(12)
        );
    }

    #[test]
    fn test_rate_limit_ignores_http_date_retry_after() {
        // Only plain integers are honored; HTTP-date values fall back
        // to the schedule.
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.rate_limit_delay(0, Some("Wed, 21 Oct 2026 07:28:00 GMT")),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_rate_limit_schedule_indexing() {
        // The 429 path indexes the schedule by the current attempt, not
        // the previous one.
        let policy = RetryPolicy::default();
        assert_eq!(policy.rate_limit_delay(0, None), Duration::from_secs(1));
        assert_eq!(policy.rate_limit_delay(1, None), Duration::from_secs(2));
        assert_eq!(policy.rate_limit_delay(2, None), Duration::from_secs(4));
        assert_eq!(policy.rate_limit_delay(9, None), Duration::from_secs(4));
    }
}
