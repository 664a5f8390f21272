//! JSON sidecar describing a finished tileset.
//!
//! Consumers that do not want to hardcode the grid layout can read tile
//! positions from here instead.

use serde::Serialize;

use msdf_tileset_config::{BuildConfig, GRID_DIM, MsdfMode};
use msdf_tileset_fonts::code_to_char;

use crate::builder::BuildOutput;

pub const MANIFEST_VERSION: u32 = 1;

/// Pixel rect in image (top-down) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Normalized texture coordinates with `v = 0` at the bottom row.
///
/// This is the space the atlas is sampled in once uploaded as a texture,
/// so `v0 = 1 - (y + h) / H` and `v1 = 1 - y / H` for the pixel rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestGlyph {
    pub code: u8,
    pub character: String,
    pub px: PixelRect,
    pub uv: UvRect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilesetManifest {
    pub version: u32,
    pub grid: u32,
    pub tile_size: u32,
    pub padding: u32,
    pub distance_range: u32,
    pub mode: MsdfMode,
    pub character_spacing: u32,
    pub off_by_one: bool,
    pub compressed: bool,
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub glyphs: Vec<ManifestGlyph>,
}

impl TilesetManifest {
    pub fn from_build(output: &BuildOutput, config: &BuildConfig) -> Self {
        let width = output.atlas.width();
        let height = output.atlas.height();

        let glyphs = output
            .report
            .rendered
            .iter()
            .map(|glyph| {
                let rect = glyph.rect;
                let px = PixelRect {
                    x: rect.x,
                    y: rect.y,
                    w: rect.width,
                    h: rect.height,
                };
                let uv = UvRect {
                    u0: rect.x as f32 / width as f32,
                    v0: 1.0 - (rect.y + rect.height) as f32 / height as f32,
                    u1: (rect.x + rect.width) as f32 / width as f32,
                    v1: 1.0 - rect.y as f32 / height as f32,
                };
                ManifestGlyph {
                    code: glyph.code,
                    character: code_to_char(glyph.code).to_string(),
                    px,
                    uv,
                }
            })
            .collect();

        Self {
            version: MANIFEST_VERSION,
            grid: GRID_DIM,
            tile_size: config.tile_size,
            padding: config.padding,
            distance_range: config.distance_range,
            mode: config.mode,
            character_spacing: config.character_spacing,
            off_by_one: config.off_by_one,
            compressed: output.report.compressed,
            atlas_width: width,
            atlas_height: height,
            glyphs,
        }
    }
}
