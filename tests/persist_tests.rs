//! Atlas PNG and manifest output.

mod common;

use common::{FakeFont, SolidRasterizer};
use msdf_tileset::builder::{BuildOutput, TilesetBuilder};
use msdf_tileset::config::{BuildConfig, MsdfMode};
use msdf_tileset::persist::{AtlasSink, PngAtlasWriter, default_output_path, manifest_path};
use std::path::Path;
use tempfile::TempDir;

fn build(config: &BuildConfig) -> BuildOutput {
    let font = FakeFont::with_codes(&[65, 97]);
    let rasterizer = SolidRasterizer::white();
    TilesetBuilder::new(config.clone(), &rasterizer)
        .build(&font)
        .unwrap()
}

#[test]
fn test_png_is_written_and_decodes() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out").join("Fake_msdf_msdfTileset.png");
    let config = BuildConfig::new().with_tile_size(32);
    let output = build(&config);

    PngAtlasWriter.persist(&output, &config, &dest).unwrap();

    let decoded = image::open(&dest).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (512, 512));
    assert_eq!(decoded, output.atlas.to_image());
    assert_eq!(*decoded.get_pixel(40, 140), image::Rgba([255, 255, 255, 255]));
    assert_eq!(*decoded.get_pixel(0, 0), image::Rgba([0, 0, 0, 0]));

    // No temp file is left behind
    let mut leftover = dest.as_os_str().to_owned();
    leftover.push(".tmp");
    assert!(!Path::new(&leftover).exists());
}

#[test]
fn test_manifest_describes_rendered_glyphs() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("atlas.png");
    let config = BuildConfig::new().with_tile_size(32).with_padding(2);
    let output = build(&config);

    PngAtlasWriter.persist(&output, &config, &dest).unwrap();

    let text = std::fs::read_to_string(manifest_path(&dest)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(json["version"], 1);
    assert_eq!(json["grid"], 16);
    assert_eq!(json["tile_size"], 32);
    assert_eq!(json["padding"], 2);
    assert_eq!(json["mode"], "msdf");
    assert_eq!(json["compressed"], false);
    assert_eq!(json["atlas_width"], 512);

    let glyphs = json["glyphs"].as_array().unwrap();
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0]["code"], 65);
    assert_eq!(glyphs[0]["character"], "A");
    assert_eq!(glyphs[0]["px"]["x"], 33);
    assert_eq!(glyphs[0]["px"]["y"], 129);
    assert_eq!(glyphs[0]["px"]["w"], 30);
    assert_eq!(glyphs[1]["code"], 97);
    assert_eq!(glyphs[1]["px"]["y"], 193);

    let u0 = glyphs[0]["uv"]["u0"].as_f64().unwrap();
    assert!((u0 - 33.0 / 512.0).abs() < 1e-6);
    // v runs bottom-up, like the texture the atlas is uploaded to
    let v0 = glyphs[0]["uv"]["v0"].as_f64().unwrap();
    let v1 = glyphs[0]["uv"]["v1"].as_f64().unwrap();
    assert!((v0 - (1.0 - 159.0 / 512.0)).abs() < 1e-6);
    assert!((v1 - (1.0 - 129.0 / 512.0)).abs() < 1e-6);
}

#[test]
fn test_manifest_can_be_disabled() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("atlas.png");
    let mut config = BuildConfig::new().with_tile_size(8);
    config.write_manifest = false;
    let output = build(&config);

    PngAtlasWriter.persist(&output, &config, &dest).unwrap();

    assert!(dest.exists());
    assert!(!manifest_path(&dest).exists());
}

#[test]
fn test_existing_atlas_is_replaced() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("atlas.png");
    std::fs::write(&dest, b"old").unwrap();

    let config = BuildConfig::new().with_tile_size(8);
    PngAtlasWriter.persist(&build(&config), &config, &dest).unwrap();

    let decoded = image::open(&dest).unwrap();
    assert_eq!(decoded.width(), 128);
}

#[test]
fn test_default_output_path_next_to_font() {
    let path = default_output_path(Path::new("/data/fonts/Inter-Regular.otf"), MsdfMode::Psdf);
    assert_eq!(
        path,
        Path::new("/data/fonts/Inter-Regular_psdf_msdfTileset.png")
    );
}
