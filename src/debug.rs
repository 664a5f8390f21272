//! Log bridge for msdf-tileset.
//!
//! Routes everything sent through the `log` facade to stderr, and optionally
//! mirrors it into a log file. Level precedence: the `--log-level` CLI flag,
//! then `RUST_LOG`, then the config's `log_level`.
//!
//! Lines look like `[2026-10-17 12:00:00.123] [INFO ] [msdf_tileset::builder] message`.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use log::{LevelFilter, Log, Metadata, Record};

struct LogBridge {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

fn format_line(record: &Record<'_>) -> String {
    let level = match record.level() {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!(
        "[{}] [{}] [{}] {}\n",
        timestamp(),
        level,
        record.target(),
        record.args()
    )
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        let _ = std::io::stderr().write_all(line.as_bytes());
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = file.write_all(line.as_bytes());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Parse a `RUST_LOG`-style level (`info`, `debug`, ...). Module filters are not supported.
pub fn level_from_env() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    value.trim().parse::<LevelFilter>().ok()
}

/// Pick the effective level from CLI flag, environment and config, in that order.
pub fn resolve_level(cli: Option<LevelFilter>, config: LevelFilter) -> LevelFilter {
    cli.or_else(level_from_env).unwrap_or(config)
}

/// Install the bridge as the global logger. Later calls are ignored.
///
/// A log file that cannot be opened is reported on stderr and skipped; it
/// never prevents a build.
pub fn init_log_bridge(level: LevelFilter, log_file: Option<&Path>) {
    let file = log_file.and_then(|path| {
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
        {
            Ok(f) => Some(Mutex::new(f)),
            Err(e) => {
                eprintln!("msdf-tileset: cannot open log file {}: {e}", path.display());
                None
            }
        }
    });

    let bridge = BRIDGE.get_or_init(|| LogBridge { level, file });
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Trace), LevelFilter::Warn),
            LevelFilter::Trace
        );
    }

    #[test]
    fn line_format_has_level_and_target() {
        let line = format_line(
            &Record::builder()
                .args(format_args!("hello"))
                .level(log::Level::Warn)
                .target("msdf_tileset::builder")
                .build(),
        );
        assert!(line.contains("[WARN ] [msdf_tileset::builder] hello"));
        assert!(line.ends_with('\n'));
    }
}
