//! Build states and the per-build outcome report.

use std::fmt;

use crate::atlas::AtlasBuffer;
use crate::tile::TileRect;

/// Where a build currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    /// Atlas allocated and filled with the background colour
    Initializing,
    /// Working on one glyph slot
    PerGlyph { code: u8 },
    /// All slots attempted; optional compression
    Finalizing,
    Done,
    /// Unrecoverable error or cancellation; no atlas is produced
    Aborted,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildState::Idle => f.write_str("idle"),
            BuildState::Initializing => f.write_str("initializing"),
            BuildState::PerGlyph { code } => write!(f, "glyph {code}"),
            BuildState::Finalizing => f.write_str("finalizing"),
            BuildState::Done => f.write_str("done"),
            BuildState::Aborted => f.write_str("aborted"),
        }
    }
}

/// Logs state transitions of one build.
#[derive(Debug)]
pub(crate) struct StateTracker {
    current: BuildState,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self {
            current: BuildState::Idle,
        }
    }

    pub(crate) fn enter(&mut self, next: BuildState) {
        // Per-glyph transitions are too chatty for debug
        if matches!(next, BuildState::PerGlyph { .. }) {
            log::trace!("Build state: {} -> {}", self.current, next);
        } else {
            log::debug!("Build state: {} -> {}", self.current, next);
        }
        self.current = next;
    }

    pub(crate) fn current(&self) -> BuildState {
        self.current
    }
}

/// A glyph that made it into the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGlyph {
    pub code: u8,
    pub rect: TileRect,
}

/// A glyph the rasterizer could not deliver; its tile stays background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedGlyph {
    pub code: u8,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Sorted by code
    pub rendered: Vec<RenderedGlyph>,
    /// Codes the font has no glyph for (only when `include_all_glyphs` is off)
    pub skipped_uncovered: Vec<u8>,
    /// Sorted by code
    pub failed: Vec<FailedGlyph>,
    pub compressed: bool,
    pub final_state: BuildState,
}

impl BuildReport {
    pub(crate) fn new() -> Self {
        Self {
            rendered: Vec::new(),
            skipped_uncovered: Vec::new(),
            failed: Vec::new(),
            compressed: false,
            final_state: BuildState::Idle,
        }
    }

    /// Slots the rasterizer was actually called for.
    pub fn attempted(&self) -> usize {
        self.rendered.len() + self.failed.len()
    }

    pub fn is_rendered(&self, code: u8) -> bool {
        self.rendered.iter().any(|g| g.code == code)
    }

    pub(crate) fn sort(&mut self) {
        self.rendered.sort_by_key(|g| g.code);
        self.failed.sort_by_key(|g| g.code);
        self.skipped_uncovered.sort_unstable();
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub atlas: AtlasBuffer,
    pub report: BuildReport,
}
