//! Typed error types for tileset builds.
//!
//! Two levels are distinguished:
//! - `GlyphError`: something went wrong for one glyph. Recoverable: the
//!   orchestrator logs it and moves on, except for `RasterizerMissing`.
//! - `TilesetError`: the whole build failed and no atlas is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a bitmap for a single glyph code.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// The rasterizer exited without writing an output image.
    ///
    /// The exit code and stderr are diagnostic detail only; a missing file is
    /// the failure signal regardless of the exit status.
    #[error("rasterizer produced no image for glyph {code} ({})", describe_exit(.exit_code, .stderr))]
    Unavailable {
        code: u8,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The output image exists but could not be decoded.
    #[error("failed to decode image for glyph {code} from '{}': {source}", .path.display())]
    Decode {
        code: u8,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Preparing the scratch directory or output file failed.
    #[error("scratch file error for glyph {code}: {source}")]
    Scratch {
        code: u8,
        #[source]
        source: std::io::Error,
    },

    /// The rasterizer executable could not be found or started.
    #[error("rasterizer '{}' could not be started: {source}", .path.display())]
    RasterizerMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GlyphError {
    /// Whether this error must abort the whole build.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GlyphError::RasterizerMissing { .. })
    }
}

/// Build-level failure. No atlas is persisted when one of these is returned.
#[derive(Debug, Error)]
pub enum TilesetError {
    /// The font could not be prepared for rasterization.
    #[error("font import failed: {0}")]
    FontImport(#[from] msdf_tileset_fonts::FontError),

    /// The rasterizer executable could not be found or started.
    #[error("rasterizer '{}' is not available: {source}", .path.display())]
    RasterizerMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rasterizer failed its preflight check for a reason other than a missing executable.
    #[error("rasterizer is not usable: {0}")]
    Rasterizer(#[source] GlyphError),

    #[error("invalid build configuration: {0}")]
    Config(#[from] msdf_tileset_config::ConfigError),

    /// The build was cancelled between glyphs.
    #[error("build cancelled after {completed} of {total} glyphs")]
    Cancelled { completed: usize, total: usize },

    /// The finished atlas could not be written.
    #[error("failed to write '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode atlas image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

fn describe_exit(exit_code: &Option<i32>, stderr: &str) -> String {
    let code = exit_code.map_or_else(|| "none".to_string(), |c| c.to_string());
    let stderr = if stderr.is_empty() { "<empty>" } else { stderr };
    format!("exit code {code}, stderr: {stderr}")
}
