use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::result::AnalysisResult;

#[derive(Debug, Clone)]
pub enum AnalysisInput {
    FilePath(PathBuf),
    Bytes(Vec<u8>),
    Url(String),
}

impl AnalysisInput {
    /// Treats `http://` and `https://` arguments as remote images, anything else as a local path.
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            AnalysisInput::Url(arg.to_string())
        } else {
            AnalysisInput::FilePath(PathBuf::from(arg))
        }
    }

    pub fn local_path(&self) -> Option<&PathBuf> {
        match self {
            AnalysisInput::FilePath(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualFeature {
    Caption,
    Tags,
    Objects,
    Read,
}

impl VisualFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualFeature::Caption => "caption",
            VisualFeature::Tags => "tags",
            VisualFeature::Objects => "objects",
            VisualFeature::Read => "read",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub features: Vec<VisualFeature>,
    pub gender_neutral_caption: bool,
    pub language: Option<String>,
}

impl AnalysisOptions {
    pub fn new(features: &[VisualFeature]) -> Self {
        Self {
            features: features.to_vec(),
            ..Default::default()
        }
    }
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            features: vec![
                VisualFeature::Caption,
                VisualFeature::Tags,
                VisualFeature::Objects,
                VisualFeature::Read,
            ],
            gender_neutral_caption: true,
            language: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        input: &AnalysisInput,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, VisionError>;
}
