//! Enumerated configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance-field flavour requested from the rasterizer.
///
/// The lowercase name doubles as the msdfgen subcommand token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MsdfMode {
    /// Single-channel signed distance field
    Sdf,
    /// Single-channel pseudo distance field
    Psdf,
    /// Multi-channel signed distance field
    #[default]
    Msdf,
    /// Multi-channel with true distance in the alpha channel
    Mtsdf,
}

impl MsdfMode {
    /// Command-line token understood by msdfgen
    pub fn as_str(&self) -> &'static str {
        match self {
            MsdfMode::Sdf => "sdf",
            MsdfMode::Psdf => "psdf",
            MsdfMode::Msdf => "msdf",
            MsdfMode::Mtsdf => "mtsdf",
        }
    }

    /// All available modes
    pub fn all() -> &'static [MsdfMode] {
        &[MsdfMode::Sdf, MsdfMode::Psdf, MsdfMode::Msdf, MsdfMode::Mtsdf]
    }
}

impl fmt::Display for MsdfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MsdfMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MsdfMode::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mode '{s}' (expected sdf, psdf, msdf or mtsdf)"))
    }
}

/// Fill colour of atlas pixels no glyph was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AtlasBackground {
    /// Fully transparent black (0, 0, 0, 0)
    #[default]
    Transparent,
    /// Opaque black (0, 0, 0, 255)
    OpaqueBlack,
}

impl AtlasBackground {
    /// RGBA bytes of this background
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            AtlasBackground::Transparent => [0, 0, 0, 0],
            AtlasBackground::OpaqueBlack => [0, 0, 0, 255],
        }
    }
}

/// Log level for the stderr/file log bridge.
///
/// The `--log-level` CLI flag and `RUST_LOG` take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
