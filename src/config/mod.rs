//! Configuration module for Krisha-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Running without a file uses the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use krisha_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Results go to: {}", config.output.csv_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, PacingConfig, SelectorConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::compile_selector;
