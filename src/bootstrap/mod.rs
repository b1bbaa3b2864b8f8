//! Process bootstrap: configuration loading and tracing setup.

pub mod config;
pub mod tracing;
