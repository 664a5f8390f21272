//! Default values for build settings.

use std::path::PathBuf;

pub fn tile_size() -> u32 {
    32
}

pub fn distance_range() -> u32 {
    4 // Pixel range of the distance field
}

pub fn padding() -> u32 {
    0
}

pub fn character_spacing() -> u32 {
    4
}

pub fn mode() -> crate::types::MsdfMode {
    crate::types::MsdfMode::Msdf
}

pub fn background() -> crate::types::AtlasBackground {
    crate::types::AtlasBackground::Transparent
}

pub fn rasterizer_path() -> PathBuf {
    PathBuf::from("msdfgen") // Resolved through PATH
}

pub fn scratch_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("msdf-tileset")
}

pub fn workers() -> usize {
    1 // Strictly sequential, one msdfgen process at a time
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Info
}

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}
