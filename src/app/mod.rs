//! Binary front end: CLI, configuration file, report output and startup

pub mod cli;
pub mod output;
pub mod startup;
