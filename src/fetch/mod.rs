//! Menu content fetching
//!
//! This module contains the [`Fetcher`], the single entry point for
//! pulling menu content from a URL. A fetch is a short-circuiting
//! pipeline of gates:
//!
//! 1. Accessibility probe (HEAD, short timeout)
//! 2. Robots.txt compliance (fail-open on anything but an explicit deny)
//! 3. Per-host rate limiting
//! 4. Content-type probe
//! 5. HTML fetch with retry, or streaming PDF download
//!
//! Every failure collapses to `None` at the public boundary; the `try_`
//! variants expose the reason for callers that log or report it.

mod client;
mod pdf;
mod retry;

pub use client::build_http_client;
pub use retry::{fetch_with_retry, RetryPolicy};

use crate::config::Config;
use crate::limiter::RateLimiter;
use crate::robots::{self, robots_txt_url};
use crate::{FetchError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Content retrieved for a menu URL
///
/// `Pdf` carries the path of a temp file created for this result. The
/// file is owned by the caller from this point on: this crate never
/// deletes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuContent {
    /// Decoded HTML body
    Html(String),

    /// Path to a downloaded PDF temp file
    Pdf(PathBuf),
}

impl MenuContent {
    /// Short tag for the content kind, `"html"` or `"pdf"`
    pub fn kind(&self) -> &'static str {
        match self {
            MenuContent::Html(_) => "html",
            MenuContent::Pdf(_) => "pdf",
        }
    }
}

/// Polite menu-content fetcher
///
/// Owns the HTTP client and the shared per-host rate limiter. Cheap to
/// share behind an `Arc`; all methods take `&self`.
pub struct Fetcher {
    client: Client,
    limiter: RateLimiter,
    policy: RetryPolicy,
    config: Config,
}

impl Fetcher {
    /// Creates a fetcher from the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.fetcher, &config.user_agent)?;
        let limiter = RateLimiter::new(config.fetcher.min_delay());
        let policy = RetryPolicy::new(
            config.fetcher.max_retries,
            config.fetcher.retry_delays.clone(),
        );
        Ok(Self {
            client,
            limiter,
            policy,
            config,
        })
    }

    /// Creates a fetcher with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default())
    }

    /// Returns the shared rate limiter
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Fetches menu content from `url`
    ///
    /// Returns `None` when the URL is unreachable, robots.txt disallows
    /// it, or every fetch attempt failed. See
    /// [`try_fetch_menu_content`](Self::try_fetch_menu_content) for the
    /// failure reason.
    pub async fn fetch_menu_content(&self, url: &str) -> Option<MenuContent> {
        self.try_fetch_menu_content(url).await.ok()
    }

    /// Fetches menu content from `url`, reporting the failure reason
    pub async fn try_fetch_menu_content(&self, url: &str) -> Result<MenuContent> {
        if !self.is_url_accessible(url).await {
            tracing::warn!("URL not accessible: {}", url);
            return Err(FetchError::Inaccessible {
                url: url.to_string(),
            });
        }

        if !self.respects_robots_txt(url).await {
            tracing::warn!("Robots.txt disallows scraping: {}", url);
            return Err(FetchError::RobotsDisallowed {
                url: url.to_string(),
            });
        }

        let host = host_key(url)?;
        self.limiter.acquire(&host).await;

        let content_type = self.get_content_type(url).await;

        if content_type.contains("pdf") {
            let path = self.try_download_pdf(url).await?;
            return Ok(MenuContent::Pdf(path));
        }

        let body = fetch_with_retry(&self.client, &self.policy, url).await?;
        Ok(MenuContent::Html(body))
    }

    /// Checks whether `url` responds with a non-error status
    ///
    /// Issues a HEAD probe with a short timeout; statuses are inspected
    /// rather than raised. Transport errors count as inaccessible. The
    /// probe does not touch the rate limiter.
    pub async fn is_url_accessible(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(self.config.fetcher.probe_timeout())
            .send()
            .await
        {
            Ok(response) => response.status().as_u16() < 400,
            Err(e) => {
                tracing::debug!("URL accessibility check failed for {}: {}", url, e);
                false
            }
        }
    }

    /// Checks whether robots.txt permits fetching `url`
    ///
    /// Fail-open: a missing robots.txt (any non-200), a transport error,
    /// or an unparseable URL all mean "allowed". A fetched body may
    /// raise the shared minimum request delay via its `Crawl-delay`,
    /// even when the verdict is a deny.
    pub async fn respects_robots_txt(&self, url: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Robots.txt check failed for {}: {}", url, e);
                return true;
            }
        };
        let Some(robots_url) = robots_txt_url(&parsed) else {
            return true;
        };

        let response = match self
            .client
            .get(robots_url)
            .timeout(self.config.fetcher.robots_timeout())
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Robots.txt check failed for {}: {}", url, e);
                return true;
            }
        };

        if response.status() != StatusCode::OK {
            // No robots.txt means scraping is allowed
            return true;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Robots.txt check failed for {}: {}", url, e);
                return true;
            }
        };

        let verdict = robots::evaluate(&body, &self.config.user_agent.bot_name, &parsed);
        if let Some(delay) = verdict.crawl_delay {
            self.limiter.raise_min_delay(Duration::from_secs(delay));
        }
        verdict.allowed
    }

    /// Reads the Content-Type of `url` via a HEAD probe
    ///
    /// The header value is lower-cased; a missing header yields an empty
    /// string and a transport error the default `"text/html"`.
    pub async fn get_content_type(&self, url: &str) -> String {
        match self
            .client
            .head(url)
            .timeout(self.config.fetcher.probe_timeout())
            .send()
            .await
        {
            Ok(response) => response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_lowercase(),
            Err(e) => {
                tracing::debug!("Content type check failed for {}: {}", url, e);
                "text/html".to_string()
            }
        }
    }

    /// Downloads a PDF from `url` into a new temp file
    ///
    /// Returns `None` on any failure. The returned file is owned by the
    /// caller, who is responsible for deleting it.
    pub async fn download_pdf(&self, url: &str) -> Option<PathBuf> {
        self.try_download_pdf(url).await.ok()
    }

    /// Downloads a PDF from `url`, reporting the failure reason
    pub async fn try_download_pdf(&self, url: &str) -> Result<PathBuf> {
        let host = host_key(url)?;
        self.limiter.acquire(&host).await;

        match pdf::download_to_temp_file(&self.client, url).await {
            Ok(path) => Ok(path),
            Err(e) => {
                tracing::error!("Failed to download PDF from {}: {}", url, e);
                Err(e)
            }
        }
    }
}

/// Rate-limiter key for a URL: the lowercase host, plus the port when
/// one is spelled out in the URL
fn host_key(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| FetchError::MissingHost {
            url: url.to_string(),
        })?
        .to_lowercase();
    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
