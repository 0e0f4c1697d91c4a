//! Configuration module for design capture
//!
//! This module provides the `DesignConfig` struct and its type-safe builder
//! with validation and site defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{DesignConfigBuilder, WithCookies, WithDesignUrl};
pub use types::DesignConfig;
