//! CLI Integration Tests
//!
//! - `cli::config_file` - TOML discovery, loading and precedence
//! - `cli::binary` - the `ringq` executable end to end

mod cli;
