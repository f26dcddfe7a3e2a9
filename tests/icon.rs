use std::io::{self, Write};

use image::{ImageError, Rgba, RgbaImage};
use iconbadge::icon::{load_icon, save_png, write_atomically};

#[test]
fn failed_write_keeps_the_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    let previous = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
    save_png(&previous, &path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let result = write_atomically(&path, |writer| {
        writer.write_all(b"\x89PNG half an image")?;
        Err(ImageError::IoError(io::Error::other("disk full")))
    });

    assert!(result.is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(load_icon(&path).unwrap(), previous);
    // The temporary file is gone too.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn save_replaces_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    std::fs::write(&path, b"stale").unwrap();

    let image = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40]));
    save_png(&image, &path).unwrap();

    assert_eq!(load_icon(&path).unwrap(), image);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn save_into_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("icon.png");
    let image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));

    assert!(matches!(save_png(&image, &path), Err(ImageError::IoError(_))));
}
