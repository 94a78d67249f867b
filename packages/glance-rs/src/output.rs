//! Loading source images and saving annotated copies next to them.
use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, ImageFormat, ImageReader};
use log::info;
use std::path::{Path, PathBuf};

pub const OCR_SUFFIX: &str = "ocr";
pub const OBJECTS_SUFFIX: &str = "objects";
pub const ANNOTATED_SUFFIX: &str = "annotated";

/// A decoded source image together with the format it was stored in.
pub struct SourceImage {
  pub image: DynamicImage,
  pub format: ImageFormat,
}

/// Derives `<dir>/<stem>_<suffix><.ext>` from the source path.
pub fn annotated_path(source: &Path, suffix: &str) -> PathBuf {
  let stem = source
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();
  let name = match source.extension() {
    Some(ext) => format!("{}_{}.{}", stem, suffix, ext.to_string_lossy()),
    None => format!("{}_{}", stem, suffix),
  };
  source.with_file_name(name)
}

/// Decodes the image, detecting the format from its contents.
pub fn load_image(path: &Path) -> Result<SourceImage> {
  let reader = ImageReader::open(path)
    .with_context(|| format!("failed to open image {}", path.display()))?
    .with_guessed_format()
    .with_context(|| format!("failed to read image {}", path.display()))?;
  let format = reader
    .format()
    .ok_or_else(|| anyhow!("unrecognized image format: {}", path.display()))?;
  let image = reader
    .decode()
    .with_context(|| format!("failed to decode image {}", path.display()))?;
  Ok(SourceImage { image, format })
}

/// Saves the annotated image in the source's format.
pub fn save_image(image: &DynamicImage, format: ImageFormat, path: &Path) -> Result<()> {
  image
    .save_with_format(path, format)
    .with_context(|| format!("failed to save annotated image {}", path.display()))?;
  info!("Wrote {}", path.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_suffix_goes_before_extension() {
    assert_eq!(annotated_path(Path::new("photo.jpg"), OCR_SUFFIX), PathBuf::from("photo_ocr.jpg"));
    assert_eq!(
      annotated_path(Path::new("/tmp/shots/receipt.final.png"), OBJECTS_SUFFIX),
      PathBuf::from("/tmp/shots/receipt.final_objects.png")
    );
  }

  #[test]
  fn test_missing_extension_keeps_bare_stem() {
    assert_eq!(
      annotated_path(Path::new("images/scan"), ANNOTATED_SUFFIX),
      PathBuf::from("images/scan_annotated")
    );
  }

  #[test]
  fn test_round_trip_keeps_format_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("source.png");
    image::RgbImage::from_pixel(12, 7, image::Rgb([9, 9, 9])).save(&src).unwrap();

    let loaded = load_image(&src).unwrap();
    assert_eq!(loaded.format, ImageFormat::Png);

    let out = annotated_path(&src, OCR_SUFFIX);
    save_image(&loaded.image, loaded.format, &out).unwrap();
    let reloaded = load_image(&out).unwrap();
    assert_eq!((reloaded.image.width(), reloaded.image.height()), (12, 7));
  }

  #[test]
  fn test_missing_image_is_an_error() {
    let err = load_image(Path::new("no/such/image.jpg")).err().unwrap();
    assert!(err.to_string().contains("failed to open image"));
  }

  #[test]
  fn test_non_image_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();
    assert!(load_image(&path).is_err());
  }
}
