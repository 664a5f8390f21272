//! The tileset atlas and glyph compositing.

use msdf_tileset_config::{AtlasBackground, GRID_DIM};

use crate::pixels::{PixelBuffer, Rgba};
use crate::tile::TileRect;

/// A `tile_size * 16` square atlas being filled one glyph at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasBuffer {
    tile_size: u32,
    background: Rgba,
    buffer: PixelBuffer,
}

impl AtlasBuffer {
    /// Allocate an atlas with every pixel set to `background`.
    pub fn new(tile_size: u32, background: Rgba) -> Self {
        let size = tile_size * GRID_DIM;
        Self {
            tile_size,
            background,
            buffer: PixelBuffer::filled(size, size, background),
        }
    }

    pub fn with_background(tile_size: u32, background: AtlasBackground) -> Self {
        Self::new(tile_size, Rgba(background.rgba()))
    }

    /// Edge length in pixels (width == height).
    pub fn size(&self) -> u32 {
        self.buffer.width()
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Pixel in atlas (bottom-up) coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.buffer.get(x, y)
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Copy `glyph` into `rect`, flipping vertically on both sides.
    ///
    /// Source pixel `(x, h-1-y)` goes to atlas pixel
    /// `(rect.x + x, H-1-(rect.y + y))`. The copy is clipped to the rect and
    /// to the atlas, so oversized glyphs never spill into neighbouring tiles.
    /// Returns the number of pixels written.
    pub fn blit(&mut self, glyph: &PixelBuffer, rect: TileRect) -> usize {
        let atlas_height = self.buffer.height();
        let glyph_height = glyph.height();
        let copy_width = glyph.width().min(rect.width);
        let copy_height = glyph_height.min(rect.height);
        let mut written = 0;

        for y in 0..copy_height {
            let dst_row = rect.y + y;
            if dst_row >= atlas_height {
                break;
            }
            let dst_y = atlas_height - 1 - dst_row;
            let src_y = glyph_height - 1 - y;
            for x in 0..copy_width {
                if let Some(color) = glyph.get(x, src_y)
                    && self.buffer.set(rect.x + x, dst_y, color)
                {
                    written += 1;
                }
            }
        }

        written
    }

    /// Read back the pixels of `rect` in glyph order, undoing the double flip.
    ///
    /// The result matches what was passed to [`AtlasBuffer::blit`] for an
    /// unclipped glyph.
    pub fn read_tile(&self, rect: TileRect) -> PixelBuffer {
        let atlas_height = self.buffer.height();
        let mut out = PixelBuffer::filled(rect.width, rect.height, self.background);
        for y in 0..rect.height {
            let dst_row = rect.y + y;
            if dst_row >= atlas_height {
                break;
            }
            for x in 0..rect.width {
                if let Some(color) = self.buffer.get(rect.x + x, atlas_height - 1 - dst_row) {
                    out.set(x, rect.height - 1 - y, color);
                }
            }
        }
        out
    }

    /// Whether every pixel of `rect` still holds the background colour.
    pub fn is_tile_background(&self, rect: TileRect) -> bool {
        let tile = self.read_tile(rect);
        tile.pixels().iter().all(|&p| p == self.background)
    }

    /// Top-down image for encoding.
    pub fn to_image(&self) -> image::RgbaImage {
        self.buffer.to_image()
    }
}
