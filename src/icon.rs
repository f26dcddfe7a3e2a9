use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader, ImageResult, RgbaImage};
use tempfile::NamedTempFile;

/// Decodes an icon from disk as straight-alpha RGBA.
///
/// The format is sniffed from the file contents, not the extension, so
/// anything with ".png" somewhere in its name is given a fair chance.
pub fn load_icon(path: &Path) -> ImageResult<RgbaImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

/// Writes `image` as PNG, replacing any existing file only once the new
/// one is complete.
pub fn save_png(image: &RgbaImage, path: &Path) -> ImageResult<()> {
    write_atomically(path, |writer| {
        PngEncoder::new(writer).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
    })
}

/// Streams `encode` into a temporary file beside `path`, then renames it
/// over `path`. If anything fails, `path` is left as it was and the
/// temporary file is removed.
pub fn write_atomically<F>(path: &Path, encode: F) -> ImageResult<()>
where
    F: FnOnce(&mut dyn Write) -> ImageResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        encode(&mut writer)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
