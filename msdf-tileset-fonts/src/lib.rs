//! Font asset provider for the msdf-tileset atlas generator.
//!
//! The tileset build only needs two things from a font: whether it has a
//! glyph for a given character, and where the font file lives on disk so the
//! external rasterizer can open it. `FontProvider` captures exactly that;
//! `FontFile` implements it on top of swash's charmap lookup.

mod error;
pub mod font_file;

pub use error::FontError;
pub use font_file::{FontFile, FontProvider, code_to_char};
