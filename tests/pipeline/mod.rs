//! Pipeline Integration Test Modules

pub mod delivery;
pub mod shutdown;
