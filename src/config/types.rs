use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Carte
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Fetcher behavior configuration
///
/// Defaults mirror the built-in constants: a 2 second gap between
/// requests to the same host, three attempts with a 1/2/4 second
/// backoff schedule, and 10/5/30 second timeouts for probes, robots.txt
/// and content fetches respectively.
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Minimum time between requests to the same host (seconds).
    /// A larger robots.txt Crawl-delay raises this at runtime.
    #[serde(default = "default_min_delay", rename = "min-delay-seconds")]
    pub min_delay_seconds: u64,

    /// Maximum number of fetch attempts before giving up
    #[serde(default = "default_max_retries", rename = "max-retries")]
    pub max_retries: u32,

    /// Backoff schedule in seconds; indexes past the end fall back to 4
    #[serde(default = "default_retry_delays", rename = "retry-delays")]
    pub retry_delays: Vec<u64>,

    /// Timeout for HEAD probes (seconds)
    #[serde(default = "default_probe_timeout", rename = "probe-timeout-seconds")]
    pub probe_timeout_seconds: u64,

    /// Timeout for robots.txt fetches (seconds)
    #[serde(default = "default_robots_timeout", rename = "robots-timeout-seconds")]
    pub robots_timeout_seconds: u64,

    /// Timeout for content fetches (seconds)
    #[serde(default = "default_request_timeout", rename = "request-timeout-seconds")]
    pub request_timeout_seconds: u64,

    /// Connection timeout (seconds)
    #[serde(default = "default_connect_timeout", rename = "connect-timeout-seconds")]
    pub connect_timeout_seconds: u64,
}

/// User agent identification configuration
///
/// The bot name is also the token matched against robots.txt
/// `User-agent:` sections.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the bot
    #[serde(default = "default_bot_name", rename = "bot-name")]
    pub bot_name: String,

    /// Version of the bot
    #[serde(default = "default_bot_version", rename = "bot-version")]
    pub bot_version: String,

    /// URL with information about the bot
    #[serde(default = "default_contact_url", rename = "contact-url")]
    pub contact_url: String,
}

fn default_min_delay() -> u64 {
    2
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delays() -> Vec<u64> {
    vec![1, 2, 4]
}

fn default_probe_timeout() -> u64 {
    10
}

fn default_robots_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_bot_name() -> String {
    "MenuScrapingBot".to_string()
}

fn default_bot_version() -> String {
    "1.0".to_string()
}

fn default_contact_url() -> String {
    "https://example.com/bot".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            min_delay_seconds: default_min_delay(),
            max_retries: default_max_retries(),
            retry_delays: default_retry_delays(),
            probe_timeout_seconds: default_probe_timeout(),
            robots_timeout_seconds: default_robots_timeout(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            bot_version: default_bot_version(),
            contact_url: default_contact_url(),
        }
    }
}

impl FetcherConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_secs(self.min_delay_seconds)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl UserAgentConfig {
    /// Formats the full user agent string: `Name/Version (+contact-url)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.bot_name, self.bot_version, self.contact_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_constants() {
        let config = Config::default();
        assert_eq!(config.fetcher.min_delay_seconds, 2);
        assert_eq!(config.fetcher.max_retries, 3);
        assert_eq!(config.fetcher.retry_delays, vec![1, 2, 4]);
        assert_eq!(config.fetcher.probe_timeout_seconds, 10);
        assert_eq!(config.fetcher.robots_timeout_seconds, 5);
        assert_eq!(config.fetcher.request_timeout_seconds, 30);
    }

    #[test]
    fn test_user_agent_header_value() {
        let ua = UserAgentConfig::default();
        assert_eq!(
            ua.header_value(),
            "MenuScrapingBot/1.0 (+https://example.com/bot)"
        );
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.fetcher.min_delay_seconds, 2);
        assert_eq!(config.user_agent.bot_name, "MenuScrapingBot");
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: Config = toml::from_str(
            r#"
[fetcher]
min-delay-seconds = 5

[user-agent]
bot-name = "TestBot"
"#,
        )
        .unwrap();
        assert_eq!(config.fetcher.min_delay_seconds, 5);
        assert_eq!(config.fetcher.max_retries, 3);
        assert_eq!(config.user_agent.bot_name, "TestBot");
        assert_eq!(config.user_agent.bot_version, "1.0");
    }
}
