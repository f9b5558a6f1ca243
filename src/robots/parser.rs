//! Robots.txt forward-scan evaluation
//!
//! A deliberately simple line scanner, not a full implementation of the
//! Google robots.txt spec: sections are matched by `*` or a substring
//! match on the bot name, the first matching `Disallow` wins, and
//! `Allow:` lines are ignored. `Crawl-delay` values from relevant
//! sections are surfaced so the caller can raise its rate limit.

use url::Url;

/// Outcome of evaluating a robots.txt body against one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsVerdict {
    /// Whether the URL may be fetched
    pub allowed: bool,

    /// Largest `Crawl-delay` (seconds) seen in a relevant section before
    /// the scan returned
    pub crawl_delay: Option<u64>,
}

impl RobotsVerdict {
    fn allowed(crawl_delay: Option<u64>) -> Self {
        Self {
            allowed: true,
            crawl_delay,
        }
    }

    fn disallowed(crawl_delay: Option<u64>) -> Self {
        Self {
            allowed: false,
            crawl_delay,
        }
    }
}

/// Evaluates a robots.txt body for `bot_name` against `url`
///
/// Scans line by line: blank lines and `#` comments are skipped. A
/// `User-agent:` line opens a new section, relevant when its value is
/// `*` or contains `bot_name` case-insensitively. Within a relevant
/// section, `Disallow: /` forbids the whole site and any other non-empty
/// value forbids the URL when its path starts with that value; either
/// returns immediately. Crawl delays encountered up to that point are
/// kept so the caller can still honor them.
pub fn evaluate(content: &str, bot_name: &str, url: &Url) -> RobotsVerdict {
    let bot_token = bot_name.to_lowercase();
    let url_path = url.path();

    let mut relevant_section = false;
    let mut crawl_delay: Option<u64> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "user-agent" => {
                relevant_section =
                    value == "*" || value.to_lowercase().contains(&bot_token);
            }
            "disallow" if relevant_section => {
                if value == "/" {
                    // Entire site is disallowed
                    return RobotsVerdict::disallowed(crawl_delay);
                }
                if !value.is_empty() && url_path.starts_with(value) {
                    return RobotsVerdict::disallowed(crawl_delay);
                }
            }
            "crawl-delay" if relevant_section => {
                if let Ok(delay) = value.parse::<u64>() {
                    if crawl_delay.map_or(true, |current| delay > current) {
                        crawl_delay = Some(delay);
                    }
                }
            }
            _ => {}
        }
    }

    RobotsVerdict::allowed(crawl_delay)
}
