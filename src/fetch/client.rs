//! HTTP client construction
//!
//! Builds the shared reqwest client with the configured user agent and
//! the browser-like header set menu sites expect. Redirects follow
//! reqwest's default policy and plain HTTP is allowed; menu pages are
//! frequently behind redirects or http-only hosts.

use crate::config::{FetcherConfig, UserAgentConfig};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// The user agent is formatted as `Name/Version (+contact-url)`.
/// Accept-Encoding is handled by reqwest's gzip/brotli support rather
/// than set explicitly.
pub fn build_http_client(
    fetcher: &FetcherConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml,application/pdf;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert("dnt", HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(user_agent.header_value())
        .default_headers(headers)
        .timeout(fetcher.request_timeout())
        .connect_timeout(fetcher.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}
