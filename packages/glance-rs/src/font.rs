//! Label font resolution: a preferred TrueType face when one can be loaded,
//! otherwise the built-in 8x8 bitmap glyphs, which are always available.
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgba, RgbaImage};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT_SIZE: f32 = 18.0;

/// Well-known locations of the preferred "Arial" face.
const PREFERRED_FONT_PATHS: &[&str] = &[
  "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
  "/usr/share/fonts/truetype/msttcorefonts/arial.ttf",
  "/usr/share/fonts/TTF/arial.ttf",
  "/usr/share/fonts/microsoft/arial.ttf",
  "/Library/Fonts/Arial.ttf",
  "/System/Library/Fonts/Supplemental/Arial.ttf",
  "C:\\Windows\\Fonts\\arial.ttf",
];

const GLYPH_SIZE: u32 = 8;

pub enum LabelFont {
  TrueType {
    font: FontVec,
    scale: PxScale,
    source: PathBuf,
  },
  Bitmap {
    scale: u32,
  },
}

impl std::fmt::Debug for LabelFont {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      LabelFont::TrueType { source, scale, .. } => f
        .debug_struct("TrueType")
        .field("source", source)
        .field("size", &scale.y)
        .finish(),
      LabelFont::Bitmap { scale } => f.debug_struct("Bitmap").field("scale", scale).finish(),
    }
  }
}

impl LabelFont {
  /// Resolves the label font: the explicit path first, then the well-known
  /// system locations, then the built-in bitmap font.
  pub fn resolve(preferred: Option<&Path>, size: f32) -> Self {
    let font = Self::preferred(preferred, size).unwrap_or_else(|| Self::builtin(size));
    info!("Using label font {:?}", font);
    font
  }

  /// The guaranteed-available fallback, scaled to roughly `size` pixels.
  pub fn builtin(size: f32) -> Self {
    let scale = (size / GLYPH_SIZE as f32).round().max(1.0) as u32;
    LabelFont::Bitmap { scale }
  }

  fn preferred(explicit: Option<&Path>, size: f32) -> Option<Self> {
    if let Some(path) = explicit {
      match Self::load_truetype(path, size) {
        Some(font) => return Some(font),
        None => warn!("Could not load font {}, falling back", path.display()),
      }
    }
    PREFERRED_FONT_PATHS
      .iter()
      .map(Path::new)
      .find_map(|path| Self::load_truetype(path, size))
  }

  /// Loads a TrueType/OpenType face, returning `None` when the file is
  /// missing or unparsable.
  pub fn load_truetype(path: &Path, size: f32) -> Option<Self> {
    let bytes = std::fs::read(path)
      .map_err(|e| debug!("Font {} unavailable: {}", path.display(), e))
      .ok()?;
    let font = FontVec::try_from_vec(bytes)
      .map_err(|e| debug!("Font {} is invalid: {}", path.display(), e))
      .ok()?;
    Some(LabelFont::TrueType {
      font,
      scale: PxScale::from(size),
      source: path.to_path_buf(),
    })
  }

  pub fn is_builtin(&self) -> bool {
    matches!(self, LabelFont::Bitmap { .. })
  }

  /// Height in pixels of one line of label text.
  pub fn line_height(&self) -> u32 {
    match self {
      LabelFont::TrueType { font, scale, .. } => font.as_scaled(*scale).height().ceil() as u32,
      LabelFont::Bitmap { scale } => GLYPH_SIZE * scale,
    }
  }

  /// Draws `text` with its top-left corner at (`x`, `y`). Pixels outside the
  /// canvas are clipped.
  pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    match self {
      LabelFont::TrueType { font, scale, .. } => {
        imageproc::drawing::draw_text_mut(canvas, color, x, y, *scale, font, text);
      }
      LabelFont::Bitmap { scale } => draw_bitmap_text(canvas, x, y, *scale, color, text),
    }
  }
}

fn glyph(c: char) -> [u8; 8] {
  BASIC_FONTS
    .get(c)
    .or_else(|| LATIN_FONTS.get(c))
    .or_else(|| BASIC_FONTS.get('?'))
    .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbaImage, x: i32, y: i32, scale: u32, color: Rgba<u8>, text: &str) {
  let (width, height) = (canvas.width() as i64, canvas.height() as i64);
  let scale = scale as i64;
  let advance = GLYPH_SIZE as i64 * scale;

  for (i, c) in text.chars().enumerate() {
    let origin_x = x as i64 + i as i64 * advance;
    if origin_x >= width {
      break;
    }
    for (row, bits) in glyph(c).iter().enumerate() {
      for col in 0..GLYPH_SIZE as i64 {
        // bit 0 is the leftmost pixel of the row
        if bits & (1 << col) == 0 {
          continue;
        }
        let px = origin_x + col * scale;
        let py = y as i64 + row as i64 * scale;
        for dy in 0..scale {
          for dx in 0..scale {
            let (fx, fy) = (px + dx, py + dy);
            if (0..width).contains(&fx) && (0..height).contains(&fy) {
              canvas.put_pixel(fx as u32, fy as u32, color);
            }
          }
        }
      }
    }
  }
}
