//! Configuration system for the grep-filter plugin.
//!
//! This crate provides configuration loading, saving, validation and default
//! values. It includes:
//!
//! - The [`Config`] struct and its YAML persistence
//! - Per-field default value functions
//! - The [`LogLevel`] selector used by the logging bridge
//! - Typed [`ConfigError`] variants

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
