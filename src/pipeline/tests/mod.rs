//! Test modules for the run driver

mod interrupt;
