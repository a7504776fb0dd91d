//! Command-line parsing and configuration file layering

pub mod args;
pub mod config;
mod error;

pub use args::Args;
pub use config::default_config_path;
pub use error::{ConfigError, ConfigResult};

#[cfg(test)]
mod tests;
