//! Progress reporting and cancellation for tileset builds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receives progress updates from a running build.
///
/// A host UI can render a progress bar from these; the build never depends
/// on them.
pub trait ProgressSink: Send + Sync {
    /// The build is about to attempt `total` glyph slots.
    fn begin(&self, total: usize);

    /// Glyph `current` of `total` (1-based) was just handled.
    fn glyph(&self, current: usize, total: usize, code: u8);

    /// A named stage other than glyph work started (e.g. compression).
    fn stage(&self, message: &str);

    /// The build ended, successfully or not. Called exactly once.
    fn finish(&self);
}

/// Reports progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn begin(&self, total: usize) {
        log::info!("Generating MSDF tileset: {} glyph slots", total);
    }

    fn glyph(&self, current: usize, total: usize, code: u8) {
        log::debug!("Glyph {}/{} (code {})", current, total, code);
        if current % 32 == 0 || current == total {
            log::info!("Progress: {}/{} glyphs", current, total);
        }
    }

    fn stage(&self, message: &str) {
        log::info!("{}", message);
    }

    fn finish(&self) {
        log::debug!("Progress indicator released");
    }
}

/// Discards all progress updates.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn begin(&self, _total: usize) {}
    fn glyph(&self, _current: usize, _total: usize, _code: u8) {}
    fn stage(&self, _message: &str) {}
    fn finish(&self) {}
}

/// Calls [`ProgressSink::finish`] when dropped, so the indicator is released
/// on every exit path of a build, including early returns and panics.
pub struct ProgressGuard<'a> {
    sink: &'a dyn ProgressSink,
}

impl<'a> ProgressGuard<'a> {
    pub fn begin(sink: &'a dyn ProgressSink, total: usize) -> Self {
        sink.begin(total);
        Self { sink }
    }

    pub fn sink(&self) -> &dyn ProgressSink {
        self.sink
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.sink.finish();
    }
}

/// Shared flag used to cancel a build between glyphs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
