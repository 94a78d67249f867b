//! Serde mirror of the Image Analysis 4.0 response body and its conversion
//! into the crate's plain result model.
use serde::Deserialize;

use crate::engine::VisionError;
use crate::region::{BoundingBox, LabeledRegion, Point, Polygon, TextBlock, TextLine, Word};
use crate::result::{AnalysisResult, Caption, ImageMetadata, ReadResult, Tag};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse {
    model_version: Option<String>,
    metadata: Option<WireMetadata>,
    caption_result: Option<WireCaption>,
    tags_result: Option<WireTags>,
    objects_result: Option<WireObjects>,
    read_result: Option<WireRead>,
}

#[derive(Debug, Deserialize)]
struct WireMetadata {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct WireCaption {
    text: String,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct WireTags {
    #[serde(default)]
    values: Vec<WireTag>,
}

#[derive(Debug, Deserialize)]
struct WireTag {
    name: String,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct WireObjects {
    #[serde(default)]
    values: Vec<WireObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireObject {
    bounding_box: WireBox,
    #[serde(default)]
    tags: Vec<WireTag>,
}

#[derive(Debug, Deserialize)]
struct WireBox {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

#[derive(Debug, Deserialize)]
struct WireRead {
    #[serde(default)]
    blocks: Vec<WireBlock>,
}

#[derive(Debug, Deserialize)]
struct WireBlock {
    #[serde(default)]
    lines: Vec<WireLine>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLine {
    text: String,
    #[serde(default)]
    bounding_polygon: Vec<WirePoint>,
    #[serde(default)]
    words: Vec<WireWord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireWord {
    text: String,
    #[serde(default)]
    bounding_polygon: Vec<WirePoint>,
    confidence: f32,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    x: f32,
    y: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) message: String,
}

fn polygon(points: Vec<WirePoint>) -> Polygon {
    Polygon::new(points.into_iter().map(|p| Point::new(p.x, p.y)).collect())
}

impl From<AnalyzeResponse> for AnalysisResult {
    fn from(resp: AnalyzeResponse) -> Self {
        let objects = resp.objects_result.map(|objects| {
            objects
                .values
                .into_iter()
                .map(|obj| {
                    // The service ranks tags; the first one is the label we show.
                    let (label, confidence) = obj
                        .tags
                        .into_iter()
                        .next()
                        .map(|t| (t.name, t.confidence))
                        .unwrap_or_default();
                    let b = obj.bounding_box;
                    LabeledRegion::with_box(label, confidence, BoundingBox::new(b.x, b.y, b.w, b.h))
                })
                .collect()
        });

        let read = resp.read_result.map(|read| ReadResult {
            blocks: read
                .blocks
                .into_iter()
                .map(|block| TextBlock {
                    lines: block
                        .lines
                        .into_iter()
                        .map(|line| TextLine {
                            text: line.text,
                            polygon: polygon(line.bounding_polygon),
                            words: line
                                .words
                                .into_iter()
                                .map(|w| Word {
                                    text: w.text,
                                    polygon: polygon(w.bounding_polygon),
                                    confidence: w.confidence,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        });

        AnalysisResult {
            caption: resp.caption_result.map(|c| Caption {
                text: c.text,
                confidence: c.confidence,
            }),
            tags: resp.tags_result.map(|tags| {
                tags.values
                    .into_iter()
                    .map(|t| Tag {
                        name: t.name,
                        confidence: t.confidence,
                    })
                    .collect()
            }),
            objects,
            read,
            metadata: resp.metadata.map(|m| ImageMetadata {
                width: m.width,
                height: m.height,
            }),
            model_version: resp.model_version,
        }
    }
}

pub(crate) fn parse_response(body: &str) -> Result<AnalysisResult, VisionError> {
    let resp: AnalyzeResponse = serde_json::from_str(body)?;
    Ok(resp.into())
}
