pub mod azure;
pub mod engine;
pub mod region;
pub mod result;

pub use azure::{AzureVisionClient, VisionConfig};
pub use engine::{AnalysisInput, AnalysisOptions, ImageAnalyzer, VisionError, VisualFeature};
pub use region::{BoundingBox, Geometry, LabeledRegion, Point, Polygon, TextBlock, TextLine, Word};
pub use result::{AnalysisResult, Caption, ImageMetadata, ReadResult, Tag};
