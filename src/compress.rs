//! Lossy block compression of the finished atlas.
//!
//! Distance fields are sensitive to quantization: compressed atlases often
//! show wobbly glyph edges. Compression therefore only runs when
//! `use_compression` is set.

use crate::atlas::AtlasBuffer;
use crate::pixels::Rgba;

/// Edge length of a compression block.
pub const BLOCK_DIM: u32 = 4;

pub trait AtlasCompressor: Send + Sync {
    /// Compress `atlas` in place.
    fn compress(&self, atlas: &mut AtlasBuffer);
}

/// BC1-style compression applied in place.
///
/// Each 4x4 block keeps two RGB565 endpoints and a four-entry palette
/// interpolated between them; every pixel snaps to its nearest palette entry.
/// Alpha is left per pixel. The result is still a plain RGBA atlas, so it can
/// be exported as PNG and shows exactly the artifacts a BC1 upload would.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockCompressor;

impl AtlasCompressor for BlockCompressor {
    fn compress(&self, atlas: &mut AtlasBuffer) {
        let buffer = atlas.buffer_mut();
        let (width, height) = (buffer.width(), buffer.height());
        log::info!("Compressing {}x{} atlas in {}x{} blocks", width, height, BLOCK_DIM, BLOCK_DIM);

        let mut block = Vec::with_capacity((BLOCK_DIM * BLOCK_DIM) as usize);
        for by in (0..height).step_by(BLOCK_DIM as usize) {
            for bx in (0..width).step_by(BLOCK_DIM as usize) {
                block.clear();
                for y in by..(by + BLOCK_DIM).min(height) {
                    for x in bx..(bx + BLOCK_DIM).min(width) {
                        if let Some(px) = buffer.get(x, y) {
                            block.push((x, y, px));
                        }
                    }
                }

                let palette = block_palette(block.iter().map(|&(_, _, px)| px));
                for &(x, y, px) in &block {
                    buffer.set(x, y, nearest(&palette, px));
                }
            }
        }
    }
}

fn quantize_565(px: [u8; 3]) -> [u8; 3] {
    let r5 = (u32::from(px[0]) * 31 + 127) / 255;
    let g6 = (u32::from(px[1]) * 63 + 127) / 255;
    let b5 = (u32::from(px[2]) * 31 + 127) / 255;
    [
        ((r5 << 3) | (r5 >> 2)) as u8,
        ((g6 << 2) | (g6 >> 4)) as u8,
        ((b5 << 3) | (b5 >> 2)) as u8,
    ]
}

/// Endpoints are the per-channel bounding box of the block.
fn block_palette(pixels: impl Iterator<Item = Rgba>) -> [[u8; 3]; 4] {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for Rgba(px) in pixels {
        for c in 0..3 {
            lo[c] = lo[c].min(px[c]);
            hi[c] = hi[c].max(px[c]);
        }
    }
    if lo[0] > hi[0] {
        // Empty block
        return [[0; 3]; 4];
    }

    let e0 = quantize_565(hi);
    let e1 = quantize_565(lo);
    let mix = |a: u8, b: u8| ((2 * u16::from(a) + u16::from(b)) / 3) as u8;
    [
        e0,
        e1,
        [mix(e0[0], e1[0]), mix(e0[1], e1[1]), mix(e0[2], e1[2])],
        [mix(e1[0], e0[0]), mix(e1[1], e0[1]), mix(e1[2], e0[2])],
    ]
}

fn nearest(palette: &[[u8; 3]; 4], Rgba(px): Rgba) -> Rgba {
    let distance = |entry: &[u8; 3]| -> u32 {
        (0..3)
            .map(|c| {
                let d = i32::from(entry[c]) - i32::from(px[c]);
                (d * d) as u32
            })
            .sum()
    };
    let best = palette
        .iter()
        .min_by_key(|entry| distance(*entry))
        .copied()
        .unwrap_or([px[0], px[1], px[2]]);
    Rgba([best[0], best[1], best[2], px[3]])
}
