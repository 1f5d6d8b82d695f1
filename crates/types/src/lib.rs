//! Core configuration types for swimseed.
//!
//! This crate provides the foundational types used by the bootstrap node:
//! - [`BootstrapConfig`](config::BootstrapConfig) with validation and normalization
//! - [`BootstrapMode`](config::BootstrapMode) parsing
//! - [`DiscoverySource`](config::DiscoverySource), the tagged form of a seed source
//! - Error types using snafu

#![deny(unsafe_code)]

pub mod config;

// Re-export commonly used types at crate root
pub use config::{
    BootstrapConfig, BootstrapMode, ConfigError, DEFAULT_MAX_JOIN_DURATION, DiscoverySource,
};
