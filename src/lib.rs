//! Builds 16x16 glyph tileset atlases for distance-field text rendering.
//!
//! Every single-byte code 1..=255 owns one tile of a `tile_size * 16` square
//! atlas. Glyph bitmaps come from an external rasterizer (msdfgen), one
//! process per glyph; this crate addresses tiles, composites the bitmaps with
//! the texture-row flip consumers expect, and writes the result.
//!
//! ```no_run
//! use msdf_tileset::builder::TilesetBuilder;
//! use msdf_tileset::config::BuildConfig;
//! use msdf_tileset::persist::{AtlasSink, PngAtlasWriter, default_output_path};
//! use msdf_tileset::rasterizer::MsdfgenRasterizer;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), msdf_tileset::TilesetError> {
//! let config = BuildConfig::default().with_tile_size(48);
//! let rasterizer = MsdfgenRasterizer::from_config(&config);
//! let builder = TilesetBuilder::new(config, &rasterizer);
//!
//! let font = Path::new("fonts/Roboto.ttf");
//! let output = builder.build_from_path(font)?;
//! let dest = default_output_path(font, builder.config().mode);
//! PngAtlasWriter.persist(&output, builder.config(), &dest)?;
//! # Ok(())
//! # }
//! ```

pub mod atlas;
pub mod builder;
pub mod cli;
pub mod compress;
pub mod debug;
pub mod error;
pub mod persist;
pub mod pixels;
pub mod progress;
pub mod rasterizer;
pub mod tile;

pub use msdf_tileset_config as config;
pub use msdf_tileset_fonts as fonts;

pub use error::{GlyphError, TilesetError};
