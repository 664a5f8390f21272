//! msdfgen subprocess invocation.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use msdf_tileset_config::BuildConfig;

use super::{GlyphRasterizer, GlyphRequest};
use crate::error::GlyphError;
use crate::pixels::PixelBuffer;

/// Runs the msdfgen executable once per glyph.
///
/// Each glyph gets its own output file (`glyph_<code>.png`) in the scratch
/// directory, so concurrent calls for different codes never share a file.
#[derive(Debug, Clone)]
pub struct MsdfgenRasterizer {
    executable: PathBuf,
    scratch_dir: PathBuf,
}

impl MsdfgenRasterizer {
    pub fn new(executable: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(&config.rasterizer_path, &config.scratch_dir)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Output file msdfgen is told to write for `code`.
    pub fn output_path(&self, code: u8) -> PathBuf {
        self.scratch_dir.join(format!("glyph_{code}.png"))
    }

    /// msdfgen arguments for `request`, one argv entry each (no shell quoting).
    pub fn command_args(&self, request: &GlyphRequest) -> Vec<OsString> {
        let output = self.output_path(request.code);
        vec![
            request.mode.as_str().into(),
            "-o".into(),
            output.into_os_string(),
            "-font".into(),
            request.font_path.clone().into_os_string(),
            request.code.to_string().into(),
            "-size".into(),
            request.width.to_string().into(),
            request.height.to_string().into(),
            "-pxrange".into(),
            request.distance_range.to_string().into(),
            "-autoframe".into(),
        ]
    }

    fn missing(&self, source: std::io::Error) -> GlyphError {
        GlyphError::RasterizerMissing {
            path: self.executable.clone(),
            source,
        }
    }

    /// A path with more than one component must point at an existing file;
    /// bare names are left to PATH lookup at spawn time.
    fn names_explicit_file(&self) -> bool {
        self.executable.components().count() > 1 || self.executable.is_absolute()
    }
}

impl GlyphRasterizer for MsdfgenRasterizer {
    fn preflight(&self) -> Result<(), GlyphError> {
        if self.names_explicit_file() && !self.executable.is_file() {
            return Err(self.missing(std::io::Error::new(
                ErrorKind::NotFound,
                "no such file",
            )));
        }
        Ok(())
    }

    fn rasterize(&self, request: &GlyphRequest) -> Result<PixelBuffer, GlyphError> {
        let code = request.code;
        let output_path = self.output_path(code);

        fs::create_dir_all(&self.scratch_dir)
            .map_err(|source| GlyphError::Scratch { code, source })?;

        // A leftover file from an earlier run would be mistaken for fresh output
        match fs::remove_file(&output_path) {
            Ok(()) => log::debug!("Removed stale glyph output {:?}", output_path),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(GlyphError::Scratch { code, source }),
        }

        let args = self.command_args(request);
        log::debug!("Running {:?} {:?}", self.executable, args);

        let output = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            // Any spawn failure (not found, not executable, ...) means no glyph can be built
            .map_err(|e| self.missing(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // The exit status is not trusted: msdfgen may exit cleanly without output
        if !output_path.is_file() {
            return Err(GlyphError::Unavailable {
                code,
                exit_code: output.status.code(),
                stderr,
            });
        }

        if !output.status.success() {
            log::debug!(
                "msdfgen exited with {} for glyph {} but wrote output; stderr: {}",
                output.status,
                code,
                stderr
            );
        }

        let decoded = image::open(&output_path).map_err(|source| GlyphError::Decode {
            code,
            path: output_path.clone(),
            source,
        });

        if let Err(e) = fs::remove_file(&output_path) {
            log::debug!("Could not remove glyph output {:?}: {}", output_path, e);
        }

        let image = decoded?.to_rgba8();
        if image.dimensions() != (request.width, request.height) {
            log::warn!(
                "Glyph {} came back {}x{}, expected {}x{}; it will be clipped to its tile",
                code,
                image.width(),
                image.height(),
                request.width,
                request.height
            );
        }

        Ok(PixelBuffer::from_image(&image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msdf_tileset_config::MsdfMode;

    fn request(code: u8) -> GlyphRequest {
        GlyphRequest {
            font_path: PathBuf::from("/fonts/Test.ttf"),
            code,
            width: 30,
            height: 28,
            distance_range: 4,
            mode: MsdfMode::Mtsdf,
        }
    }

    #[test]
    fn command_line_layout() {
        let rasterizer = MsdfgenRasterizer::new("/bin/msdfgen", "/scratch");
        let args: Vec<String> = rasterizer
            .command_args(&request(65))
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "mtsdf",
                "-o",
                "/scratch/glyph_65.png",
                "-font",
                "/fonts/Test.ttf",
                "65",
                "-size",
                "30",
                "28",
                "-pxrange",
                "4",
                "-autoframe",
            ]
        );
    }

    #[test]
    fn output_paths_are_per_code() {
        let rasterizer = MsdfgenRasterizer::new("msdfgen", "/scratch");
        assert_ne!(rasterizer.output_path(1), rasterizer.output_path(2));
    }

    #[test]
    fn preflight_accepts_bare_name() {
        let rasterizer = MsdfgenRasterizer::new("msdfgen", "/scratch");
        assert!(rasterizer.preflight().is_ok());
    }

    #[test]
    fn preflight_rejects_missing_explicit_path() {
        let rasterizer = MsdfgenRasterizer::new("/definitely/not/here/msdfgen", "/scratch");
        let err = rasterizer.preflight().unwrap_err();
        assert!(err.is_fatal());
    }
}
