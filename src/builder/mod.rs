//! Tileset build orchestration.
//!
//! A build walks codes 1..=255, asks the rasterizer for every code the font
//! covers (or every code with `include_all_glyphs`), blits each bitmap into
//! its tile and finally compresses the atlas when asked to.
//!
//! Glyph-level failures are logged and skipped. A missing rasterizer or a
//! cancellation aborts the build and no atlas is returned.
//!
//! With `workers > 1` rasterizer calls run on a bounded pool of scoped
//! threads. Results come back over a channel and are composited on the
//! calling thread only, so the atlas never needs a lock.

mod report;

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;

use msdf_tileset_config::BuildConfig;
use msdf_tileset_fonts::{FontFile, FontProvider, code_to_char};

use crate::atlas::AtlasBuffer;
use crate::compress::{AtlasCompressor, BlockCompressor};
use crate::error::{GlyphError, TilesetError};
use crate::pixels::PixelBuffer;
use crate::progress::{CancelToken, LogProgress, ProgressGuard, ProgressSink};
use crate::rasterizer::{GlyphRasterizer, GlyphRequest};
use crate::tile::compute_tile_rect;

pub use report::{BuildOutput, BuildReport, BuildState, FailedGlyph, RenderedGlyph};
use report::StateTracker;

/// First glyph code considered; code 0 is never rasterized.
pub const FIRST_CODE: u8 = 1;
/// Last glyph code considered.
pub const LAST_CODE: u8 = u8::MAX;

static LOG_PROGRESS: LogProgress = LogProgress;
static BLOCK_COMPRESSOR: BlockCompressor = BlockCompressor;

/// Drives one or more tileset builds with fixed collaborators.
pub struct TilesetBuilder<'a> {
    config: BuildConfig,
    rasterizer: &'a dyn GlyphRasterizer,
    progress: &'a dyn ProgressSink,
    compressor: &'a dyn AtlasCompressor,
    cancel: CancelToken,
}

impl<'a> TilesetBuilder<'a> {
    pub fn new(config: BuildConfig, rasterizer: &'a dyn GlyphRasterizer) -> Self {
        Self {
            config,
            rasterizer,
            progress: &LOG_PROGRESS,
            compressor: &BLOCK_COMPRESSOR,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_compressor(mut self, compressor: &'a dyn AtlasCompressor) -> Self {
        self.compressor = compressor;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Open the font at `font_path` and build from it.
    pub fn build_from_path(&self, font_path: &Path) -> Result<BuildOutput, TilesetError> {
        let font = FontFile::open(font_path)?;
        self.build(&font)
    }

    /// Run a full build against `font`.
    pub fn build(&self, font: &dyn FontProvider) -> Result<BuildOutput, TilesetError> {
        let mut state = StateTracker::new();
        match self.run(font, &mut state) {
            Ok(mut output) => {
                state.enter(BuildState::Done);
                output.report.final_state = state.current();
                log::info!(
                    "Tileset done: {} rendered, {} failed, {} not in font",
                    output.report.rendered.len(),
                    output.report.failed.len(),
                    output.report.skipped_uncovered.len()
                );
                Ok(output)
            }
            Err(e) => {
                state.enter(BuildState::Aborted);
                log::error!("Tileset build aborted: {}", e);
                Err(e)
            }
        }
    }

    fn run(
        &self,
        font: &dyn FontProvider,
        state: &mut StateTracker,
    ) -> Result<BuildOutput, TilesetError> {
        self.config.validate()?;

        state.enter(BuildState::Initializing);
        if let Err(e) = self.rasterizer.preflight() {
            return Err(escalate(e));
        }

        let total = usize::from(LAST_CODE - FIRST_CODE) + 1;
        let guard = ProgressGuard::begin(self.progress, total);

        let mut atlas = AtlasBuffer::with_background(self.config.tile_size, self.config.background);
        let mut report = BuildReport::new();
        log::info!(
            "Building {}x{} {} tileset from {:?} (tile {}px, padding {}, range {})",
            atlas.width(),
            atlas.height(),
            self.config.mode,
            font.path(),
            self.config.tile_size,
            self.config.padding,
            self.config.distance_range
        );

        let font_path = font.path().to_path_buf();
        if self.config.workers > 1 {
            self.run_pooled(font, &font_path, &mut atlas, &mut report, &guard, state)?;
        } else {
            self.run_sequential(font, &font_path, &mut atlas, &mut report, &guard, state)?;
        }
        report.sort();

        state.enter(BuildState::Finalizing);
        if self.config.use_compression {
            guard.sink().stage("Compressing tileset...");
            self.compressor.compress(&mut atlas);
            report.compressed = true;
        }

        Ok(BuildOutput { atlas, report })
    }

    fn wants(&self, font: &dyn FontProvider, code: u8) -> bool {
        self.config.include_all_glyphs || font.has_character(code_to_char(code))
    }

    fn request(&self, font_path: &Path, code: u8) -> GlyphRequest {
        GlyphRequest::from_config(&self.config, font_path.to_path_buf(), code)
    }

    fn run_sequential(
        &self,
        font: &dyn FontProvider,
        font_path: &Path,
        atlas: &mut AtlasBuffer,
        report: &mut BuildReport,
        guard: &ProgressGuard<'_>,
        state: &mut StateTracker,
    ) -> Result<(), TilesetError> {
        let total = usize::from(LAST_CODE - FIRST_CODE) + 1;

        for (done, code) in (FIRST_CODE..=LAST_CODE).enumerate() {
            if self.cancel.is_cancelled() {
                return Err(TilesetError::Cancelled {
                    completed: done,
                    total,
                });
            }
            state.enter(BuildState::PerGlyph { code });

            if self.wants(font, code) {
                let result = self.rasterizer.rasterize(&self.request(font_path, code));
                self.place(atlas, report, code, result)?;
            } else {
                report.skipped_uncovered.push(code);
            }
            guard.sink().glyph(done + 1, total, code);
        }
        Ok(())
    }

    fn run_pooled(
        &self,
        font: &dyn FontProvider,
        font_path: &Path,
        atlas: &mut AtlasBuffer,
        report: &mut BuildReport,
        guard: &ProgressGuard<'_>,
        state: &mut StateTracker,
    ) -> Result<(), TilesetError> {
        let total = usize::from(LAST_CODE - FIRST_CODE) + 1;
        if self.cancel.is_cancelled() {
            return Err(TilesetError::Cancelled {
                completed: 0,
                total,
            });
        }
        let mut done = 0;

        let mut jobs = Vec::new();
        for code in FIRST_CODE..=LAST_CODE {
            if self.wants(font, code) {
                jobs.push(code);
            } else {
                report.skipped_uncovered.push(code);
                done += 1;
                guard.sink().glyph(done, total, code);
            }
        }

        let workers = self.config.workers.min(jobs.len());
        log::debug!("Rasterizing {} glyphs on {} workers", jobs.len(), workers);

        let next = AtomicUsize::new(0);
        let stop = AtomicBool::new(false);

        std::thread::scope(|scope| {
            let (tx, rx) = mpsc::channel::<(u8, Result<PixelBuffer, GlyphError>)>();

            for _ in 0..workers {
                let tx = tx.clone();
                let (jobs, next, stop) = (&jobs, &next, &stop);
                scope.spawn(move || {
                    while !stop.load(Ordering::SeqCst) && !self.cancel.is_cancelled() {
                        let Some(&code) = jobs.get(next.fetch_add(1, Ordering::SeqCst)) else {
                            break;
                        };
                        let result = self.rasterizer.rasterize(&self.request(font_path, code));
                        if tx.send((code, result)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            // Workers finish their current call before the scope returns
            let outcome = (|| -> Result<(), TilesetError> {
                for (code, result) in rx {
                    state.enter(BuildState::PerGlyph { code });
                    self.place(atlas, report, code, result)?;
                    done += 1;
                    guard.sink().glyph(done, total, code);

                    if self.cancel.is_cancelled() {
                        return Err(TilesetError::Cancelled {
                            completed: done,
                            total,
                        });
                    }
                }
                // Workers stop taking jobs once cancelled, possibly before any result arrived
                if done < total && self.cancel.is_cancelled() {
                    return Err(TilesetError::Cancelled {
                        completed: done,
                        total,
                    });
                }
                Ok(())
            })();

            if outcome.is_err() {
                stop.store(true, Ordering::SeqCst);
            }
            outcome
        })
    }

    /// Composite one rasterizer result, or record why it is missing.
    fn place(
        &self,
        atlas: &mut AtlasBuffer,
        report: &mut BuildReport,
        code: u8,
        result: Result<PixelBuffer, GlyphError>,
    ) -> Result<(), TilesetError> {
        match result {
            Ok(glyph) => {
                let rect = compute_tile_rect(
                    code,
                    self.config.tile_size,
                    self.config.padding,
                    self.config.off_by_one,
                );
                atlas.blit(&glyph, rect);
                report.rendered.push(RenderedGlyph { code, rect });
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(escalate(e)),
            Err(e) => {
                log::warn!("Could not load glyph {}: {}", code, e);
                report.failed.push(FailedGlyph {
                    code,
                    reason: e.to_string(),
                });
                Ok(())
            }
        }
    }
}

fn escalate(err: GlyphError) -> TilesetError {
    match err {
        GlyphError::RasterizerMissing { path, source } => {
            TilesetError::RasterizerMissing { path, source }
        }
        other => TilesetError::Rasterizer(other),
    }
}
