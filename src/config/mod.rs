//! Configuration

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{Config, DEFAULT_LOG_FILTER};
