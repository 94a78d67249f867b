//! Console report of an analysis result.
//!
//! Sections always appear in the same order (caption, tags, objects, text) and
//! items keep the order the service returned them in. Absent sections are
//! left out entirely.
use glance_vision::{AnalysisResult, Geometry};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
  pub text: String,
  pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectEntry {
  pub label: String,
  pub confidence: f32,
  pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineEntry {
  pub text: String,
  pub polygon: String,
  pub words: Vec<ScoredEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ReportSection {
  Caption { caption: ScoredEntry },
  Tags { tags: Vec<ScoredEntry> },
  Objects { objects: Vec<ObjectEntry> },
  Text { lines: Vec<LineEntry> },
}

impl ReportSection {
  pub fn heading(&self) -> &'static str {
    match self {
      ReportSection::Caption { .. } => "Caption:",
      ReportSection::Tags { .. } => "Tags:",
      ReportSection::Objects { .. } => "Objects:",
      ReportSection::Text { .. } => "Detected text:",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
  pub sections: Vec<ReportSection>,
}

impl Report {
  pub fn is_empty(&self) -> bool {
    self.sections.is_empty()
  }
}

/// Formats a [0, 1] confidence as a percentage with two decimals.
pub fn format_confidence(confidence: f32) -> String {
  format!("{:.2}%", confidence * 100.0)
}

fn location(geometry: &Geometry) -> String {
  match geometry {
    Geometry::Box(b) => format!("x={}, y={}, w={}, h={}", b.x, b.y, b.width, b.height),
    Geometry::Polygon(p) => p.to_string(),
  }
}

pub fn build_report(result: &AnalysisResult) -> Report {
  let mut sections = Vec::new();

  if let Some(caption) = &result.caption {
    sections.push(ReportSection::Caption {
      caption: ScoredEntry {
        text: caption.text.clone(),
        confidence: caption.confidence,
      },
    });
  }

  if let Some(tags) = &result.tags {
    sections.push(ReportSection::Tags {
      tags: tags
        .iter()
        .map(|t| ScoredEntry {
          text: t.name.clone(),
          confidence: t.confidence,
        })
        .collect(),
    });
  }

  if let Some(objects) = &result.objects {
    sections.push(ReportSection::Objects {
      objects: objects
        .iter()
        .map(|o| ObjectEntry {
          label: o.label.clone(),
          confidence: o.confidence,
          location: location(&o.geometry),
        })
        .collect(),
    });
  }

  if let Some(read) = &result.read {
    sections.push(ReportSection::Text {
      lines: read
        .lines()
        .map(|line| LineEntry {
          text: line.text.clone(),
          polygon: line.polygon.to_string(),
          words: line
            .words
            .iter()
            .map(|w| ScoredEntry {
              text: w.text.clone(),
              confidence: w.confidence,
            })
            .collect(),
        })
        .collect(),
    });
  }

  Report { sections }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for section in &self.sections {
      writeln!(f, "{}", section.heading())?;
      match section {
        ReportSection::Caption { caption } => {
          writeln!(f, "   '{}' (confidence: {})", caption.text, format_confidence(caption.confidence))?;
        }
        ReportSection::Tags { tags } => {
          for tag in tags {
            writeln!(f, "   '{}' (confidence: {})", tag.text, format_confidence(tag.confidence))?;
          }
        }
        ReportSection::Objects { objects } => {
          for object in objects {
            writeln!(
              f,
              "   '{}' (confidence: {}) at {}",
              object.label,
              format_confidence(object.confidence),
              object.location
            )?;
          }
        }
        ReportSection::Text { lines } => {
          for line in lines {
            writeln!(f, "Line: '{}', bounding polygon {}", line.text, line.polygon)?;
            for word in &line.words {
              writeln!(f, "  Word: '{}' (confidence: {})", word.text, format_confidence(word.confidence))?;
            }
          }
        }
      }
    }
    Ok(())
  }
}
