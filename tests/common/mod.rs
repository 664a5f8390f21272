//! Shared integration test helpers for msdf-tileset.
//!
//! In-process fakes for the build's collaborators: a font with a fixed
//! coverage set, rasterizers that return solid bitmaps or fail on demand,
//! and recording progress/compression sinks.
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use msdf_tileset::atlas::AtlasBuffer;
use msdf_tileset::compress::AtlasCompressor;
use msdf_tileset::error::GlyphError;
use msdf_tileset::fonts::FontProvider;
use msdf_tileset::pixels::{PixelBuffer, Rgba};
use msdf_tileset::progress::ProgressSink;
use msdf_tileset::rasterizer::{GlyphRasterizer, GlyphRequest};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Font that covers exactly the given codes.
pub struct FakeFont {
    path: PathBuf,
    codes: BTreeSet<u8>,
}

impl FakeFont {
    pub fn with_codes(codes: &[u8]) -> Self {
        Self {
            path: PathBuf::from("/fonts/Fake.ttf"),
            codes: codes.iter().copied().collect(),
        }
    }
}

impl FontProvider for FakeFont {
    fn has_character(&self, ch: char) -> bool {
        u8::try_from(u32::from(ch))
            .map(|code| self.codes.contains(&code))
            .unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Rasterizer returning a solid bitmap of the requested size.
///
/// Codes listed in `unavailable` behave like msdfgen producing no file.
/// Every request is recorded.
#[derive(Default)]
pub struct SolidRasterizer {
    pub color: Option<Rgba>,
    pub unavailable: BTreeSet<u8>,
    pub requests: Mutex<Vec<GlyphRequest>>,
}

impl SolidRasterizer {
    pub fn white() -> Self {
        Self {
            color: Some(Rgba::WHITE),
            ..Default::default()
        }
    }

    pub fn failing_on(codes: &[u8]) -> Self {
        Self {
            color: Some(Rgba::WHITE),
            unavailable: codes.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn requested_codes(&self) -> Vec<u8> {
        let mut codes: Vec<u8> = self.requests.lock().iter().map(|r| r.code).collect();
        codes.sort_unstable();
        codes
    }
}

impl GlyphRasterizer for SolidRasterizer {
    fn rasterize(&self, request: &GlyphRequest) -> Result<PixelBuffer, GlyphError> {
        self.requests.lock().push(request.clone());
        if self.unavailable.contains(&request.code) {
            return Err(GlyphError::Unavailable {
                code: request.code,
                exit_code: Some(0),
                stderr: String::new(),
            });
        }
        Ok(PixelBuffer::filled(
            request.width,
            request.height,
            self.color.unwrap_or(Rgba::WHITE),
        ))
    }
}

/// Rasterizer whose executable can never be started.
pub struct MissingRasterizer {
    pub fail_preflight: bool,
}

impl GlyphRasterizer for MissingRasterizer {
    fn preflight(&self) -> Result<(), GlyphError> {
        if self.fail_preflight {
            return Err(missing_error());
        }
        Ok(())
    }

    fn rasterize(&self, _request: &GlyphRequest) -> Result<PixelBuffer, GlyphError> {
        Err(missing_error())
    }
}

fn missing_error() -> GlyphError {
    GlyphError::RasterizerMissing {
        path: PathBuf::from("/missing/msdfgen"),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    }
}

/// Event log shared by recording collaborators, in call order.
#[derive(Default)]
pub struct EventLog(pub Mutex<Vec<String>>);

impl EventLog {
    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    fn push(&self, event: String) {
        self.0.lock().push(event);
    }
}

/// Progress sink that records every call.
#[derive(Default)]
pub struct RecordingProgress {
    pub log: EventLog,
}

impl ProgressSink for RecordingProgress {
    fn begin(&self, total: usize) {
        self.log.push(format!("begin {total}"));
    }

    fn glyph(&self, current: usize, total: usize, _code: u8) {
        self.log.push(format!("glyph {current}/{total}"));
    }

    fn stage(&self, message: &str) {
        self.log.push(format!("stage {message}"));
    }

    fn finish(&self) {
        self.log.push("finish".to_string());
    }
}

/// Compressor that records how many rasterizer requests had been made when it ran.
pub struct RecordingCompressor<'a> {
    pub rasterizer: &'a SolidRasterizer,
    pub calls: Mutex<Vec<usize>>,
}

impl<'a> RecordingCompressor<'a> {
    pub fn new(rasterizer: &'a SolidRasterizer) -> Self {
        Self {
            rasterizer,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl AtlasCompressor for RecordingCompressor<'_> {
    fn compress(&self, _atlas: &mut AtlasBuffer) {
        let seen = self.rasterizer.requests.lock().len();
        self.calls.lock().push(seen);
    }
}
