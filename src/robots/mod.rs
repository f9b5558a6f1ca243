//! Robots.txt handling
//!
//! Derives the robots.txt URL for a page and evaluates a fetched body
//! against a bot name and target URL. Evaluation is fail-open: a missing
//! or unreadable robots.txt means scraping is allowed. Bodies are not
//! cached; each compliance check re-fetches and re-parses.

mod parser;

pub use parser::{evaluate, RobotsVerdict};

use url::Url;

/// Builds the robots.txt URL for the origin of `url`
///
/// Scheme, host and any explicit port are preserved; path, query and
/// fragment are replaced.
pub fn robots_txt_url(url: &Url) -> Option<Url> {
    url.host_str()?;
    let mut robots = url.clone();
    robots.set_path("/robots.txt");
    robots.set_query(None);
    robots.set_fragment(None);
    Some(robots)
}
