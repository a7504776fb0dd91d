//! Tests for the CLI module
//!
//! Argument parsing and resolution, and TOML layering over parsed arguments.
