//! Draws analysis results over a copy of the source image.
//!
//! Each pass first turns the result into an ordered list of draw operations,
//! skipping items whose geometry cannot be drawn, then rasterizes the list in
//! order so later items paint over earlier ones. Outlines are stroked with
//! tiny-skia straight into the canvas bytes, labels are drawn with the
//! resolved [`LabelFont`].
use glance_vision::{AnalysisResult, BoundingBox, Geometry, LabeledRegion, Point, ReadResult};
use image::{DynamicImage, GenericImage, Rgba, RgbaImage};
use log::debug;
use tiny_skia::{LineJoin, Paint, PathBuilder, PixmapMut, Stroke, Transform};

use crate::font::LabelFont;

/// What to do with a label whose computed position falls outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPlacement {
  /// Keep the computed position; off-image pixels are clipped.
  #[default]
  Unclamped,
  /// Shift the label so its whole line box stays inside the image.
  ClampToImage,
}

#[derive(Debug, Clone)]
pub struct AnnotationStyle {
  pub object_color: Rgba<u8>,
  pub object_stroke: f32,
  pub line_color: Rgba<u8>,
  pub line_stroke: f32,
  pub word_color: Rgba<u8>,
  pub word_stroke: f32,
  /// Distance labels are lifted above their anchor point.
  pub label_margin: f32,
  pub label_placement: LabelPlacement,
}

impl Default for AnnotationStyle {
  fn default() -> Self {
    Self {
      object_color: Rgba([255, 0, 0, 255]),
      object_stroke: 3.0,
      line_color: Rgba([0, 0, 255, 255]),
      line_stroke: 2.0,
      word_color: Rgba([0, 128, 0, 255]),
      word_stroke: 1.0,
      label_margin: 20.0,
      label_placement: LabelPlacement::Unclamped,
    }
  }
}

/// Counts of what a pass drew and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
  pub region_outlines: usize,
  pub labels: usize,
  pub line_outlines: usize,
  pub word_outlines: usize,
  pub skipped: usize,
}

impl std::ops::AddAssign for DrawStats {
  fn add_assign(&mut self, other: Self) {
    self.region_outlines += other.region_outlines;
    self.labels += other.labels;
    self.line_outlines += other.line_outlines;
    self.word_outlines += other.word_outlines;
    self.skipped += other.skipped;
  }
}

#[derive(Debug, Clone)]
pub struct Annotated {
  pub image: DynamicImage,
  pub stats: DrawStats,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outline {
  Rect(BoundingBox),
  Polygon(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawOp {
  Outline {
    shape: Outline,
    color: Rgba<u8>,
    width: f32,
  },
  Label {
    x: f32,
    y: f32,
    text: String,
    color: Rgba<u8>,
  },
}

#[derive(Debug, Default)]
pub(crate) struct Plan {
  pub(crate) ops: Vec<DrawOp>,
  pub(crate) stats: DrawStats,
}

impl Plan {
  fn label(&mut self, anchor: Point, text: &str, color: Rgba<u8>, margin: f32) {
    self.ops.push(DrawOp::Label {
      x: anchor.x,
      y: anchor.y - margin,
      text: text.to_string(),
      color,
    });
    self.stats.labels += 1;
  }

  fn outline(&mut self, shape: Outline, color: Rgba<u8>, width: f32) {
    self.ops.push(DrawOp::Outline { shape, color, width });
  }
}

pub(crate) fn plan_objects(objects: &[LabeledRegion], style: &AnnotationStyle) -> Plan {
  let mut plan = Plan::default();
  for (index, region) in objects.iter().enumerate() {
    let anchor = match &region.geometry {
      Geometry::Box(bbox) if bbox.is_drawable() => {
        plan.outline(Outline::Rect(*bbox), style.object_color, style.object_stroke);
        Point::new(bbox.x, bbox.y)
      }
      Geometry::Polygon(poly) if poly.is_drawable() => {
        plan.outline(
          Outline::Polygon(poly.points.clone()),
          style.object_color,
          style.object_stroke,
        );
        poly.points[0]
      }
      geometry => {
        debug!("Skipping object {} ({:?}): undrawable geometry {:?}", index, region.label, geometry);
        plan.stats.skipped += 1;
        continue;
      }
    };
    plan.stats.region_outlines += 1;
    plan.label(anchor, &region.label, style.object_color, style.label_margin);
  }
  plan
}

pub(crate) fn plan_text(read: &ReadResult, style: &AnnotationStyle) -> Plan {
  let mut plan = Plan::default();
  for line in read.lines() {
    if line.polygon.is_drawable() {
      plan.outline(
        Outline::Polygon(line.polygon.points.clone()),
        style.line_color,
        style.line_stroke,
      );
      plan.stats.line_outlines += 1;
      plan.label(line.polygon.points[0], &line.text, style.line_color, style.label_margin);
    } else {
      debug!("Skipping outline for line {:?}: {} points", line.text, line.polygon.points.len());
      plan.stats.skipped += 1;
    }

    for word in &line.words {
      if word.polygon.is_drawable() {
        plan.outline(
          Outline::Polygon(word.polygon.points.clone()),
          style.word_color,
          style.word_stroke,
        );
        plan.stats.word_outlines += 1;
      } else {
        plan.stats.skipped += 1;
      }
    }
  }
  plan
}

fn build_path(shape: &Outline) -> Option<tiny_skia::Path> {
  match shape {
    Outline::Rect(bbox) => {
      let rect = tiny_skia::Rect::from_xywh(bbox.x, bbox.y, bbox.width, bbox.height)?;
      Some(PathBuilder::from_rect(rect))
    }
    Outline::Polygon(points) => {
      let (first, rest) = points.split_first()?;
      let mut pb = PathBuilder::new();
      pb.move_to(first.x, first.y);
      for p in rest {
        pb.line_to(p.x, p.y);
      }
      pb.close();
      pb.finish()
    }
  }
}

fn stroke_outline(canvas: &mut RgbaImage, shape: &Outline, color: Rgba<u8>, width: f32) {
  let Some(path) = build_path(shape) else {
    return;
  };
  let (w, h) = canvas.dimensions();
  // borrow the canvas bytes in place, no copy per shape
  let Some(mut pixmap) = PixmapMut::from_bytes(&mut **canvas, w, h) else {
    return;
  };

  let [r, g, b, a] = color.0;
  let mut paint = Paint::default();
  paint.set_color_rgba8(r, g, b, a);
  paint.anti_alias = true;

  let stroke = Stroke {
    width,
    line_join: LineJoin::Miter,
    ..Default::default()
  };
  pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draws analysis results onto copies of source images.
#[derive(Debug)]
pub struct AnnotationRenderer {
  font: LabelFont,
  style: AnnotationStyle,
}

impl AnnotationRenderer {
  pub fn new(font: LabelFont, style: AnnotationStyle) -> Self {
    Self { font, style }
  }

  /// Outlines each object and writes its label above the top-left corner.
  pub fn annotate_objects(&self, image: &DynamicImage, objects: &[LabeledRegion]) -> Annotated {
    self.render(image, plan_objects(objects, &self.style))
  }

  /// Outlines OCR lines and their words; only lines carry text labels.
  pub fn annotate_text(&self, image: &DynamicImage, read: Option<&ReadResult>) -> Annotated {
    match read {
      Some(read) => self.render(image, plan_text(read, &self.style)),
      None => self.render(image, Plan::default()),
    }
  }

  /// Objects first, then text, in a single copy of the image.
  pub fn annotate(&self, image: &DynamicImage, result: &AnalysisResult) -> Annotated {
    let mut plan = plan_objects(result.objects.as_deref().unwrap_or_default(), &self.style);
    if let Some(read) = &result.read {
      let text = plan_text(read, &self.style);
      plan.ops.extend(text.ops);
      plan.stats += text.stats;
    }
    self.render(image, plan)
  }

  /// Draws in RGBA8, then writes back only the pixels the plan changed into
  /// a clone of the source, so colour type, bit depth and untouched pixels
  /// are preserved.
  fn render(&self, image: &DynamicImage, plan: Plan) -> Annotated {
    let base = image.to_rgba8();
    let mut canvas = base.clone();
    self.rasterize(&mut canvas, &plan.ops);

    let mut out = image.clone();
    for (x, y, drawn) in canvas.enumerate_pixels() {
      if base.get_pixel(x, y) != drawn {
        out.put_pixel(x, y, *drawn);
      }
    }
    Annotated {
      image: out,
      stats: plan.stats,
    }
  }

  pub(crate) fn rasterize(&self, canvas: &mut RgbaImage, ops: &[DrawOp]) {
    for op in ops {
      match op {
        DrawOp::Outline { shape, color, width } => stroke_outline(canvas, shape, *color, *width),
        DrawOp::Label { x, y, text, color } => {
          let (x, y) = self.label_origin(canvas, *x, *y);
          self.font.draw(canvas, x, y, *color, text);
        }
      }
    }
  }

  fn label_origin(&self, canvas: &RgbaImage, x: f32, y: f32) -> (i32, i32) {
    let (x, y) = (x.round() as i32, y.round() as i32);
    match self.style.label_placement {
      LabelPlacement::Unclamped => (x, y),
      LabelPlacement::ClampToImage => {
        let max_y = canvas.height() as i32 - self.font.line_height() as i32;
        (x.max(0), y.min(max_y).max(0))
      }
    }
  }
}
