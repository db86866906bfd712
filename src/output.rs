//! Getting the finished image in front of someone.

use std::io;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use log::info;

use crate::error::Result;

/// Saves `image` to `path`, picking the format from the extension.
pub fn save(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save(path)?;
    info!("saved {}", path.display());
    Ok(())
}

/// Opens `image` in the system image viewer.
///
/// The image is written as PNG to a temporary file that is left on disk,
/// since the viewer may still be reading it after this returns. Returns the
/// file's path.
pub fn display(image: &RgbaImage) -> Result<PathBuf> {
    let path = tempfile::Builder::new()
        .prefix("reroll-")
        .suffix(".png")
        .tempfile()?
        .into_temp_path()
        .keep()
        .map_err(io::Error::from)?;

    image.save_with_format(&path, ImageFormat::Png)?;
    open::that(&path)?;
    info!("opened {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn save_writes_a_readable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("character.png");
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));

        save(&img, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, img);
    }

    #[test]
    fn save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::new(1, 1);
        assert!(save(&img, &dir.path().join("character.nope")).is_err());
    }
}
