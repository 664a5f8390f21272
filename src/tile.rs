//! Mapping from glyph codes to tile rectangles in the 16x16 atlas grid.
//!
//! Rows are counted from the top of the exported image: code 0 is the
//! top-left tile. The compositor converts to the atlas' bottom-up texture
//! rows when writing (see [`crate::atlas::AtlasBuffer::blit`]).

use msdf_tileset_config::GRID_DIM;
use serde::Serialize;

/// Destination rectangle of one glyph inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileRect {
    /// Column offset in pixels
    pub x: u32,
    /// Row offset in pixels
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    /// Whether two rects share at least one pixel.
    pub fn overlaps(&self, other: &TileRect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Whether this rect lies entirely inside a `size` x `size` atlas.
    pub fn fits_within(&self, size: u32) -> bool {
        self.x + self.width <= size && self.y + self.height <= size
    }
}

/// Grid slot of `code`, row-major over 16 columns.
///
/// With `off_by_one` the code is shifted one slot back; code 0 then wraps to
/// the last slot (255) so the mapping stays a bijection over the grid.
pub fn tile_index(code: u8, off_by_one: bool) -> u32 {
    let index = if off_by_one { code.wrapping_sub(1) } else { code };
    u32::from(index)
}

/// Compute the destination rectangle of `code`.
///
/// Pure arithmetic; callers guarantee `padding < tile_size`.
pub fn compute_tile_rect(code: u8, tile_size: u32, padding: u32, off_by_one: bool) -> TileRect {
    let index = tile_index(code, off_by_one);
    let row = index / GRID_DIM;
    let col = index % GRID_DIM;
    let inset = padding / 2;
    let glyph_size = tile_size - padding;

    TileRect {
        x: tile_size * col + inset,
        y: tile_size * row + inset,
        width: glyph_size,
        height: glyph_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_65_lands_in_row_4_col_1() {
        let rect = compute_tile_rect(65, 32, 0, false);
        assert_eq!(
            rect,
            TileRect {
                x: 32,
                y: 128,
                width: 32,
                height: 32
            }
        );
    }

    #[test]
    fn padding_insets_by_half_and_shrinks() {
        let rect = compute_tile_rect(17, 32, 5, false);
        // row 1, col 1; 5 / 2 == 2
        assert_eq!(rect.x, 34);
        assert_eq!(rect.y, 34);
        assert_eq!(rect.width, 27);
        assert_eq!(rect.height, 27);
    }

    #[test]
    fn off_by_one_wraps_code_zero_to_last_slot() {
        assert_eq!(tile_index(0, true), 255);
        assert_eq!(tile_index(1, true), 0);
        assert_eq!(tile_index(255, true), 254);
        let rect = compute_tile_rect(0, 8, 0, true);
        assert_eq!((rect.x, rect.y), (120, 120));
    }

    #[test]
    fn last_code_touches_atlas_edge() {
        let rect = compute_tile_rect(255, 32, 0, false);
        assert_eq!(rect.x + rect.width, 512);
        assert_eq!(rect.y + rect.height, 512);
        assert!(rect.fits_within(512));
    }

    #[test]
    fn overlap_detection() {
        let a = TileRect {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        };
        let b = TileRect {
            x: 4,
            y: 0,
            width: 4,
            height: 4,
        };
        let c = TileRect {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
        };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }
}
