//! On-disk font files and coverage lookup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use swash::FontRef;

use crate::error::FontError;

/// What the tileset build needs from a font asset.
pub trait FontProvider {
    /// Whether the font maps `ch` to a real glyph (not `.notdef`).
    fn has_character(&self, ch: char) -> bool;

    /// Location of the font file, handed to the external rasterizer.
    fn path(&self) -> &Path;
}

/// Map a single-byte glyph code to its character (Latin-1, U+0000..U+00FF).
pub fn code_to_char(code: u8) -> char {
    char::from(code)
}

/// A font file loaded from disk.
///
/// The bytes are kept so coverage queries do not touch the filesystem again.
#[derive(Clone)]
pub struct FontFile {
    path: PathBuf,
    data: Arc<Vec<u8>>,
    face_index: usize,
}

impl std::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFile")
            .field("path", &self.path)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl FontFile {
    /// Open face 0 of the font at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        Self::open_with_index(path, 0)
    }

    /// Open a specific face; needed for TrueType collections (.ttc).
    pub fn open_with_index(path: impl AsRef<Path>, face_index: usize) -> Result<Self, FontError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FontError::NotFound(path.to_path_buf()));
        }

        // The rasterizer runs in its own working directory context, so hand it an absolute path
        let path = std::path::absolute(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let data = std::fs::read(&path).map_err(|source| FontError::Read {
            path: path.clone(),
            source,
        })?;

        Self::from_bytes(path, data, face_index)
    }

    /// Wrap bytes that were already read from `path`.
    pub fn from_bytes(path: PathBuf, data: Vec<u8>, face_index: usize) -> Result<Self, FontError> {
        if FontRef::from_index(&data, face_index).is_none() {
            return Err(FontError::Unsupported { path, face_index });
        }

        log::debug!(
            "Loaded font {:?} (face {}, {} bytes)",
            path,
            face_index,
            data.len()
        );

        Ok(Self {
            path,
            data: Arc::new(data),
            face_index,
        })
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index)
    }

    /// Codes in 1..=255 that this font has glyphs for.
    pub fn covered_codes(&self) -> Vec<u8> {
        (1..=u8::MAX)
            .filter(|&code| self.has_character(code_to_char(code)))
            .collect()
    }
}

impl FontProvider for FontFile {
    fn has_character(&self, ch: char) -> bool {
        self.font_ref()
            .map(|font| font.charmap().map(ch) != 0)
            .unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
