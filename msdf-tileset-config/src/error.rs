//! Typed error variants for the msdf-tileset-config crate.
//!
//! Callers that go through `anyhow` can still match on these with
//! `downcast_ref::<ConfigError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading, saving or validating a `BuildConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error on config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
