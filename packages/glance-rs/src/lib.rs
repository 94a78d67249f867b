//! # glance-rs
//!
//! Renders Azure AI Vision analysis results as console reports and as
//! annotated copies of the analyzed image.
//!
//! ## Features
//!
//! - **Object annotation**: outline detected objects and label them above their boxes
//! - **Text annotation**: outline OCR lines and words in two distinct colors, labeling lines
//! - **Reports**: caption, tags, objects and text in a fixed order, with percentage confidences
//! - **Font fallback**: a preferred TrueType face when available, a built-in bitmap font otherwise
//!
//! ## Quick Start
//!
//! ```ignore
//! use glance_rs::prelude::*;
//! use glance_vision::AnalysisResult;
//!
//! let result = AnalysisResult::from_service_json(&std::fs::read_to_string("response.json")?)?;
//! print!("{}", build_report(&result));
//!
//! let source = load_image(Path::new("photo.jpg"))?;
//! let renderer = AnnotationRenderer::new(LabelFont::resolve(None, 18.0), AnnotationStyle::default());
//! let annotated = renderer.annotate(&source.image, &result);
//! save_image(&annotated.image, source.format, &annotated_path(Path::new("photo.jpg"), "annotated"))?;
//! ```

pub mod font;
pub mod output;
pub mod renderer;
pub mod report;

// Re-export commonly used types at the root level
pub use font::LabelFont;
pub use output::{annotated_path, load_image, save_image, SourceImage};
pub use renderer::{Annotated, AnnotationRenderer, AnnotationStyle, DrawStats, LabelPlacement};
pub use report::{build_report, format_confidence, Report, ReportSection};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use glance_rs::prelude::*;
/// ```
pub mod prelude {
  pub use crate::output::{ANNOTATED_SUFFIX, OBJECTS_SUFFIX, OCR_SUFFIX};
  pub use crate::{
    annotated_path, build_report, format_confidence, load_image, save_image, Annotated,
    AnnotationRenderer, AnnotationStyle, DrawStats, LabelFont, LabelPlacement, Report,
    ReportSection, SourceImage,
  };
}
