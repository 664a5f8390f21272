//! Build configuration for the msdf-tileset atlas generator.
//!
//! This crate provides:
//!
//! - `BuildConfig`, the read-only settings of one tileset build
//! - The distance-field mode and background enums
//! - Default values for every field (used by serde for partial YAML files)
//! - YAML load/save and validation

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{BuildConfig, GRID_DIM, MAX_ATLAS_SIZE};
pub use error::ConfigError;
pub use types::{AtlasBackground, LogLevel, MsdfMode};
