//! Command-line interface for msdf-tileset.
//!
//! This module handles CLI argument parsing and runs the subcommands.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use msdf_tileset_config::{AtlasBackground, BuildConfig, MsdfMode};
use msdf_tileset_fonts::{FontFile, code_to_char};

use crate::builder::TilesetBuilder;
use crate::error::TilesetError;
use crate::persist::{AtlasSink, PngAtlasWriter, default_output_path};
use crate::rasterizer::MsdfgenRasterizer;
use crate::tile::compute_tile_rect;

/// msdf-tileset - build 16x16 MSDF glyph tilesets with msdfgen
#[derive(Parser)]
#[command(name = "msdf-tileset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level; overrides RUST_LOG and config
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Also write log output to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Off => LevelFilter::Off,
            LogLevelArg::Error => LevelFilter::Error,
            LogLevelArg::Warn => LevelFilter::Warn,
            LogLevelArg::Info => LevelFilter::Info,
            LogLevelArg::Debug => LevelFilter::Debug,
            LogLevelArg::Trace => LevelFilter::Trace,
        }
    }
}

/// Fixed settings of known tileset flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// MTSDF, 32px tiles, range 4, opaque black background; writes `<font>_atlas.png`
    FontConverter,
}

impl Preset {
    /// Overwrite the settings this preset pins.
    pub fn apply(self, config: BuildConfig) -> BuildConfig {
        match self {
            Preset::FontConverter => {
                let mut config = config
                    .with_mode(MsdfMode::Mtsdf)
                    .with_tile_size(32)
                    .with_padding(0)
                    .with_distance_range(4)
                    .with_background(AtlasBackground::OpaqueBlack)
                    .with_include_all_glyphs(false)
                    .with_off_by_one(false)
                    .with_compression(false);
                config.character_spacing = 4;
                config
            }
        }
    }

    /// Atlas path used when `--output` is not given.
    pub fn output_path(self, font_path: &Path) -> PathBuf {
        match self {
            Preset::FontConverter => {
                let stem = font_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "font".to_string());
                let dir = font_path.parent().unwrap_or_else(|| Path::new(""));
                dir.join(format!("{stem}_atlas.png"))
            }
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a tileset atlas from a font
    Build(BuildArgs),

    /// Write a config file with default values
    InitConfig {
        /// Destination (default: msdf-tileset.yaml)
        #[arg(value_name = "PATH", default_value = "msdf-tileset.yaml")]
        path: PathBuf,
    },

    /// List the codes a font covers and where they land in the grid
    Inspect {
        /// TrueType/OpenType font file
        #[arg(long, value_name = "FONT")]
        font: PathBuf,

        /// Build config used for tile size, padding and off-by-one
        #[arg(long, value_name = "YAML")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// TrueType/OpenType font file
    #[arg(long, value_name = "FONT")]
    pub font: PathBuf,

    /// YAML build config; flags below override its values
    #[arg(long, value_name = "YAML")]
    pub config: Option<PathBuf>,

    /// Atlas PNG path (default: <font dir>/<font>_<mode>_msdfTileset.png)
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Start from a fixed settings preset; flags below still override it
    #[arg(long, value_enum, value_name = "PRESET")]
    pub preset: Option<Preset>,

    #[arg(long, value_name = "PX")]
    pub tile_size: Option<u32>,

    #[arg(long, value_name = "PX")]
    pub padding: Option<u32>,

    /// Distance range in pixels
    #[arg(long, value_name = "PX")]
    pub distance_range: Option<u32>,

    /// sdf, psdf, msdf or mtsdf
    #[arg(long, value_name = "MODE")]
    pub mode: Option<MsdfMode>,

    /// Rasterize all codes 1-255, not only those the font covers
    #[arg(long)]
    pub include_all_glyphs: bool,

    /// Shift codes one tile back
    #[arg(long)]
    pub off_by_one: bool,

    /// Apply lossy block compression (may add visible edge artifacts)
    #[arg(long)]
    pub compress: bool,

    /// Fill empty pixels with opaque black instead of transparent
    #[arg(long)]
    pub opaque_background: bool,

    /// msdfgen executable
    #[arg(long, value_name = "PATH")]
    pub rasterizer: Option<PathBuf>,

    /// Directory for temporary glyph images
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Concurrent msdfgen processes
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Skip the JSON manifest
    #[arg(long)]
    pub no_manifest: bool,
}

impl BuildArgs {
    /// Apply the preset, then command-line overrides, on top of `config`.
    pub fn apply(&self, config: BuildConfig) -> BuildConfig {
        let mut config = match self.preset {
            Some(preset) => preset.apply(config),
            None => config,
        };
        if let Some(v) = self.tile_size {
            config.tile_size = v;
        }
        if let Some(v) = self.padding {
            config.padding = v;
        }
        if let Some(v) = self.distance_range {
            config.distance_range = v;
        }
        if let Some(v) = self.mode {
            config.mode = v;
        }
        if let Some(v) = &self.rasterizer {
            config.rasterizer_path = v.clone();
        }
        if let Some(v) = &self.scratch_dir {
            config.scratch_dir = v.clone();
        }
        if let Some(v) = self.workers {
            config.workers = v;
        }
        config.include_all_glyphs |= self.include_all_glyphs;
        config.off_by_one |= self.off_by_one;
        config.use_compression |= self.compress;
        if self.opaque_background {
            config.background = AtlasBackground::OpaqueBlack;
        }
        if self.no_manifest {
            config.write_manifest = false;
        }
        config
    }

    /// Destination of the atlas for `font`.
    pub fn output_path(&self, mode: MsdfMode) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        match self.preset {
            Some(preset) => preset.output_path(&self.font),
            None => default_output_path(&self.font, mode),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<BuildConfig> {
    match path {
        Some(path) => BuildConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(BuildConfig::default()),
    }
}

/// Config-file log level, used when neither `--log-level` nor `RUST_LOG` is set.
fn config_log_level(cli: &Cli) -> LevelFilter {
    let path = match &cli.command {
        Commands::Build(args) => args.config.as_deref(),
        Commands::Inspect { config, .. } => config.as_deref(),
        Commands::InitConfig { .. } => None,
    };
    path.and_then(|p| BuildConfig::load(p).ok())
        .map(|c| c.log_level.to_level_filter())
        .unwrap_or(LevelFilter::Info)
}

/// Parse arguments, initialise logging and run the requested command
pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();

    let level = crate::debug::resolve_level(
        cli.log_level.map(|l| l.to_level_filter()),
        config_log_level(&cli),
    );
    crate::debug::init_log_bridge(level, cli.log_file.as_deref());

    match &cli.command {
        Commands::Build(args) => run_build(args),
        Commands::InitConfig { path } => init_config(path),
        Commands::Inspect { font, config } => inspect(font, config.as_deref()),
    }
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let config = args.apply(load_config(args.config.as_deref())?);
    config.validate()?;

    let font = FontFile::open(&args.font).map_err(TilesetError::from)?;
    let output_path = args.output_path(config.mode);

    let rasterizer = MsdfgenRasterizer::from_config(&config);
    let builder = TilesetBuilder::new(config, &rasterizer);
    let output = builder.build(&font)?;

    PngAtlasWriter.persist(&output, builder.config(), &output_path)?;

    println!(
        "Wrote {} ({} glyphs, {} unavailable)",
        output_path.display(),
        output.report.rendered.len(),
        output.report.failed.len()
    );
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    BuildConfig::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn inspect(font_path: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let font = FontFile::open(font_path)?;
    let codes = font.covered_codes();

    println!("{}: {} of 255 codes covered", font_path.display(), codes.len());
    for code in codes {
        let rect = compute_tile_rect(code, config.tile_size, config.padding, config.off_by_one);
        let ch = code_to_char(code);
        let shown = if ch.is_control() { ' ' } else { ch };
        println!(
            "  {code:>3} {shown}  tile ({:>2}, {:>2})  px {}x{} at ({}, {})",
            rect.y / config.tile_size,
            rect.x / config.tile_size,
            rect.width,
            rect.height,
            rect.x,
            rect.y
        );
    }
    Ok(())
}
