use std::path::PathBuf;
use thiserror::Error;

/// A font could not be prepared for rasterization.
#[derive(Debug, Error)]
pub enum FontError {
    /// No file exists at the given path.
    #[error("font file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read font file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a font face swash can parse.
    #[error("'{}' is not a supported TrueType/OpenType font (face {face_index})", .path.display())]
    Unsupported { path: PathBuf, face_index: usize },
}
