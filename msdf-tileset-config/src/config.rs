//! `BuildConfig`: the settings of one tileset build.
//!
//! A config is supplied once per build and is read-only while the build runs.
//! Tool and scratch locations are plain fields so tests can point the
//! rasterizer at a fake executable.

use crate::error::ConfigError;
use crate::types::{AtlasBackground, LogLevel, MsdfMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tiles per atlas row and per atlas column.
pub const GRID_DIM: u32 = 16;

/// Largest atlas edge accepted by `validate`.
pub const MAX_ATLAS_SIZE: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Edge length of one tile in pixels
    #[serde(default = "crate::defaults::tile_size")]
    pub tile_size: u32,

    /// Distance field range in pixels (msdfgen `-pxrange`)
    #[serde(default = "crate::defaults::distance_range")]
    pub distance_range: u32,

    /// Pixels left empty around each glyph inside its tile (split evenly, odd pixel goes right/bottom)
    #[serde(default = "crate::defaults::padding")]
    pub padding: u32,

    /// Character spacing of the consuming font setup; recorded in the manifest
    #[serde(default = "crate::defaults::character_spacing")]
    pub character_spacing: u32,

    #[serde(default = "crate::defaults::mode")]
    pub mode: MsdfMode,

    /// Rasterize every code in 1..=255 even when the font lacks a glyph for it
    #[serde(default = "crate::defaults::bool_false")]
    pub include_all_glyphs: bool,

    /// Shift every code one tile towards the start of the grid
    #[serde(default = "crate::defaults::bool_false")]
    pub off_by_one: bool,

    /// Apply lossy block compression after all glyphs are placed
    #[serde(default = "crate::defaults::bool_false")]
    pub use_compression: bool,

    #[serde(default = "crate::defaults::background")]
    pub background: AtlasBackground,

    /// msdfgen executable; a bare name is looked up through PATH
    #[serde(default = "crate::defaults::rasterizer_path")]
    pub rasterizer_path: PathBuf,

    /// Directory for per-glyph temporary images
    #[serde(default = "crate::defaults::scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Concurrent rasterizer processes (1 = sequential)
    #[serde(default = "crate::defaults::workers")]
    pub workers: usize,

    /// Write a JSON manifest next to the atlas PNG
    #[serde(default = "crate::defaults::bool_true")]
    pub write_manifest: bool,

    #[serde(default = "crate::defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            tile_size: crate::defaults::tile_size(),
            distance_range: crate::defaults::distance_range(),
            padding: crate::defaults::padding(),
            character_spacing: crate::defaults::character_spacing(),
            mode: crate::defaults::mode(),
            include_all_glyphs: crate::defaults::bool_false(),
            off_by_one: crate::defaults::bool_false(),
            use_compression: crate::defaults::bool_false(),
            background: crate::defaults::background(),
            rasterizer_path: crate::defaults::rasterizer_path(),
            scratch_dir: crate::defaults::scratch_dir(),
            workers: crate::defaults::workers(),
            write_manifest: crate::defaults::bool_true(),
            log_level: crate::defaults::log_level(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge length of the square atlas in pixels.
    pub fn atlas_size(&self) -> u32 {
        self.tile_size * GRID_DIM
    }

    /// Edge length of the bitmap requested from the rasterizer for each glyph.
    pub fn glyph_size(&self) -> u32 {
        self.tile_size.saturating_sub(self.padding)
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_distance_range(mut self, distance_range: u32) -> Self {
        self.distance_range = distance_range;
        self
    }

    pub fn with_mode(mut self, mode: MsdfMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_include_all_glyphs(mut self, include_all: bool) -> Self {
        self.include_all_glyphs = include_all;
        self
    }

    pub fn with_off_by_one(mut self, off_by_one: bool) -> Self {
        self.off_by_one = off_by_one;
        self
    }

    pub fn with_compression(mut self, use_compression: bool) -> Self {
        self.use_compression = use_compression;
        self
    }

    pub fn with_background(mut self, background: AtlasBackground) -> Self {
        self.background = background;
        self
    }

    pub fn with_rasterizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rasterizer_path = path.into();
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::Validation(
                "tile_size must be greater than 0".to_string(),
            ));
        }
        if self.padding >= self.tile_size {
            return Err(ConfigError::Validation(format!(
                "padding ({}) must be smaller than tile_size ({})",
                self.padding, self.tile_size
            )));
        }
        if self.tile_size > MAX_ATLAS_SIZE / GRID_DIM {
            return Err(ConfigError::Validation(format!(
                "tile_size {} gives a {}px atlas, the maximum is {}px",
                self.tile_size,
                u64::from(self.tile_size) * u64::from(GRID_DIM),
                MAX_ATLAS_SIZE
            )));
        }
        if self.distance_range == 0 {
            return Err(ConfigError::Validation(
                "distance_range must be greater than 0".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ConfigError::Validation(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a config from a YAML file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading build config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BuildConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config as YAML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent a torn file on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;

        log::info!("Saved build config to {:?}", path);
        Ok(())
    }
}
