//! Configuration module for Carte
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every knob has a default matching the built-in fetcher constants, so a config
//! file is only needed to override them.
//!
//! # Example
//!
//! ```no_run
//! use carte::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Minimum delay: {}s", config.fetcher.min_delay_seconds);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
