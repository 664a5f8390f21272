//! Writing finished atlases to disk.

mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use msdf_tileset_config::{BuildConfig, MsdfMode};

use crate::builder::BuildOutput;
use crate::error::TilesetError;

pub use manifest::{MANIFEST_VERSION, ManifestGlyph, PixelRect, TilesetManifest, UvRect};

/// Makes a finished atlas durable.
pub trait AtlasSink {
    fn persist(
        &self,
        output: &BuildOutput,
        config: &BuildConfig,
        dest: &Path,
    ) -> Result<(), TilesetError>;
}

/// `<font dir>/<font stem>_<mode>_msdfTileset.png`
pub fn default_output_path(font_path: &Path, mode: MsdfMode) -> PathBuf {
    let stem = font_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string());
    let dir = font_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!("{stem}_{mode}_msdfTileset.png"))
}

/// Manifest path belonging to an atlas image path.
pub fn manifest_path(atlas_path: &Path) -> PathBuf {
    atlas_path.with_extension("json")
}

/// Encodes the atlas as PNG, plus an optional JSON manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngAtlasWriter;

impl PngAtlasWriter {
    fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<(), TilesetError> {
        let io_err = |source| TilesetError::Persist {
            path: dest.to_path_buf(),
            source,
        };

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Write to temp file then rename so a crash never leaves a half-written atlas
        let mut temp_name = dest.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, bytes).map_err(io_err)?;
        fs::rename(&temp_path, dest).map_err(io_err)?;
        Ok(())
    }
}

impl AtlasSink for PngAtlasWriter {
    fn persist(
        &self,
        output: &BuildOutput,
        config: &BuildConfig,
        dest: &Path,
    ) -> Result<(), TilesetError> {
        let image = output.atlas.to_image();
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|source| TilesetError::Encode {
                path: dest.to_path_buf(),
                source,
            })?;
        Self::write_atomic(dest, &png)?;
        log::info!(
            "Wrote {}x{} atlas to {:?}",
            image.width(),
            image.height(),
            dest
        );

        if config.write_manifest {
            let manifest = TilesetManifest::from_build(output, config);
            let json = serde_json::to_string_pretty(&manifest)?;
            let path = manifest_path(dest);
            Self::write_atomic(&path, json.as_bytes())?;
            log::info!("Wrote manifest with {} glyphs to {:?}", manifest.glyphs.len(), path);
        }

        Ok(())
    }
}
