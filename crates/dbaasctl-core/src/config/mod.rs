//! Configuration and profile management for dbaasctl
//!
//! A reusable configuration system for storing API credentials and
//! per-profile settings.
//!
//! # Features
//!
//! - Multiple named profiles for different accounts or regions
//! - Environment variable expansion in config files
//! - Platform-specific config file locations

#![allow(clippy::module_inception)]

pub mod config;
pub mod error;

// Re-export main types for convenience
pub use config::{Config, Profile};
pub use error::{ConfigError, Result};
