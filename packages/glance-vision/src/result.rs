//! Plain result model handed from the vision client to renderers and reports.
use crate::region::{LabeledRegion, TextBlock, TextLine};

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub confidence: f32,
}

/// OCR output grouped the way the service groups it: blocks of lines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadResult {
    pub blocks: Vec<TextBlock>,
}

impl ReadResult {
    /// Builds a single-block result from loose lines.
    pub fn from_lines(lines: Vec<TextLine>) -> Self {
        Self {
            blocks: vec![TextBlock { lines }],
        }
    }

    /// Lines in reading order, block by block.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
}

/// Everything one analysis call produced. Absent sections stay `None`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    pub caption: Option<Caption>,
    pub tags: Option<Vec<Tag>>,
    pub objects: Option<Vec<LabeledRegion>>,
    pub read: Option<ReadResult>,
    pub metadata: Option<ImageMetadata>,
    pub model_version: Option<String>,
}

impl AnalysisResult {
    /// Parses a raw Image Analysis response body.
    pub fn from_service_json(body: &str) -> Result<Self, crate::VisionError> {
        crate::azure::wire::parse_response(body)
    }
}
