//! Per-glyph rasterization.
//!
//! A rasterizer turns one [`GlyphRequest`] into a [`PixelBuffer`]. The
//! production implementation shells out to msdfgen; tests substitute
//! in-process fakes. Implementations are `Send + Sync` so the builder can run
//! several requests at once.

mod msdfgen;

use std::path::PathBuf;

use msdf_tileset_config::{BuildConfig, MsdfMode};

use crate::error::GlyphError;
use crate::pixels::PixelBuffer;

pub use msdfgen::MsdfgenRasterizer;

/// Everything needed to rasterize one glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRequest {
    pub font_path: PathBuf,
    pub code: u8,
    pub width: u32,
    pub height: u32,
    pub distance_range: u32,
    pub mode: MsdfMode,
}

impl GlyphRequest {
    /// Request for `code` with the glyph size and field settings of `config`.
    pub fn from_config(config: &BuildConfig, font_path: PathBuf, code: u8) -> Self {
        let size = config.glyph_size();
        Self {
            font_path,
            code,
            width: size,
            height: size,
            distance_range: config.distance_range,
            mode: config.mode,
        }
    }
}

pub trait GlyphRasterizer: Send + Sync {
    /// Check that the rasterizer can run at all, before any glyph work.
    ///
    /// A failure here aborts the build.
    fn preflight(&self) -> Result<(), GlyphError> {
        Ok(())
    }

    /// Produce the bitmap for one glyph.
    ///
    /// Blocks until done; there is no timeout.
    fn rasterize(&self, request: &GlyphRequest) -> Result<PixelBuffer, GlyphError>;
}
