//! Changing the working directory must not change what a loader resolves.
//! Kept in its own test binary since it mutates process-wide state.

use image::{Rgb, RgbImage};
use keysprite::{AssetLoader, AssetRoot, DisplayMode, PixelFormat, SoftwareBackend};

#[test]
fn resolution_ignores_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let media = dir.path().join("media");
    std::fs::create_dir(&media).unwrap();
    RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8 * 40, y as u8 * 80, 255]))
        .save(media.join("tile.png"))
        .unwrap();

    let loader = AssetLoader::new(
        AssetRoot::new(&media),
        SoftwareBackend::new(DisplayMode::new(64, 64, PixelFormat::Xrgb8888)),
    );

    let before_path = loader.resolve("tile.png");
    let before = loader.load("tile.png").unwrap();

    let elsewhere = tempfile::tempdir().unwrap();
    std::env::set_current_dir(elsewhere.path()).unwrap();

    assert_eq!(loader.resolve("tile.png"), before_path);
    assert_eq!(loader.load("tile.png").unwrap(), before);

    let bundled = AssetRoot::bundled();
    assert!(bundled.path().is_absolute());
    assert!(bundled.resolve("brick.bmp").exists());
}
