//! Configuration module for Link-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use link_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("link-sweep.toml")).unwrap();
//! println!("Batch sub-budget: {}", config.batch.sub_budget);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BatchConfig, Config, CrawlerConfig, ServerConfig, UserAgentConfig, VerifierConfig,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
