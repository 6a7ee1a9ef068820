//! Error handling module
//!
//! Defines the plugin error type and the configuration tiers it reports on

pub mod types;

pub use types::*;
