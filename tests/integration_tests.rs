use std::fs;

use shieldlogo::{generate, Error, LogoConfig};
use tempfile::TempDir;
use tiny_skia::Pixmap;

fn config_in(dir: &TempDir) -> LogoConfig {
    LogoConfig::default()
        .with_fonts(Vec::new())
        .with_output(dir.path().join("assets/images/logo.png"))
}

#[test]
fn generate_creates_missing_directories() {
    let dir = TempDir::new().unwrap();
    let cfg = config_in(&dir);
    assert!(!dir.path().join("assets").exists());

    let logo = generate(&cfg).expect("generate");
    assert_eq!(logo.path, cfg.output);
    assert_eq!(logo.font, "built-in 8x8");

    let bytes = fs::read(&cfg.output).expect("output written");
    assert_eq!(bytes, logo.image.png_data);
    let pixmap = Pixmap::decode_png(&bytes).expect("valid png");
    assert_eq!((pixmap.width(), pixmap.height()), (1024, 1024));
}

#[test]
fn rerun_is_byte_identical_and_overwrites() {
    let dir = TempDir::new().unwrap();
    let cfg = config_in(&dir);

    fs::create_dir_all(cfg.output.parent().unwrap()).unwrap();
    fs::write(&cfg.output, b"stale").unwrap();

    generate(&cfg).unwrap();
    let first = fs::read(&cfg.output).unwrap();
    generate(&cfg).unwrap();
    let second = fs::read(&cfg.output).unwrap();

    assert_ne!(first, b"stale".to_vec());
    assert_eq!(first, second);
}

#[test]
fn unusable_font_candidates_still_complete() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken.ttf");
    fs::write(&broken, b"nope").unwrap();
    let cfg = config_in(&dir).with_fonts(vec![dir.path().join("missing.ttf"), broken]);

    let logo = generate(&cfg).expect("fallback font should be used");
    assert_eq!(logo.font, "built-in 8x8");
    assert!(cfg.output.exists());
}

#[test]
fn scaled_canvas_is_honored() {
    let dir = TempDir::new().unwrap();
    let cfg = config_in(&dir).with_canvas_size(300);
    let logo = generate(&cfg).unwrap();
    assert_eq!((logo.image.width, logo.image.height), (300, 300));
}

#[test]
fn unwritable_output_is_an_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("assets");
    fs::write(&blocker, b"file, not a directory").unwrap();
    let cfg = config_in(&dir);

    match generate(&cfg) {
        Err(Error::OutputError(msg)) => assert!(msg.contains("assets")),
        other => panic!("expected output error, got {:?}", other.map(|l| l.path)),
    }
}
