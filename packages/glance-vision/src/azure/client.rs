use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::wire::{parse_response, ErrorEnvelope};
use crate::engine::{AnalysisInput, AnalysisOptions, ImageAnalyzer, VisionError};
use crate::result::AnalysisResult;

pub const API_VERSION: &str = "2023-10-01";
const ANALYZE_PATH: &str = "computervision/imageanalysis:analyze";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Connection settings for an Azure AI Vision resource.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub endpoint: String,
    pub key: String,
    pub timeout: Duration,
}

impl VisionConfig {
    /// Builds a config from explicit values, rejecting missing or blank ones.
    pub fn new(endpoint: Option<String>, key: Option<String>) -> Result<Self, VisionError> {
        let endpoint = endpoint
            .map(|e| e.trim().trim_end_matches('/').to_string())
            .filter(|e| !e.is_empty())
            .ok_or(VisionError::MissingConfig("VISION_ENDPOINT"))?;
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(VisionError::MissingConfig("VISION_KEY"))?;
        Ok(Self {
            endpoint,
            key,
            timeout: Duration::from_secs(30),
        })
    }
}

pub struct AzureVisionClient {
    config: VisionConfig,
    client: Client,
}

impl AzureVisionClient {
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        info!("Vision client configured: endpoint={}", config.endpoint);
        Ok(Self { config, client })
    }

    pub(crate) fn analyze_url(&self) -> String {
        format!("{}/{}", self.config.endpoint, ANALYZE_PATH)
    }

    pub(crate) fn query(options: &AnalysisOptions) -> Vec<(&'static str, String)> {
        let features = options
            .features
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let mut query = vec![("api-version", API_VERSION.to_string()), ("features", features)];
        if options.gender_neutral_caption {
            query.push(("gender-neutral-caption", "true".to_string()));
        }
        if let Some(language) = &options.language {
            query.push(("language", language.clone()));
        }
        query
    }
}

#[async_trait]
impl ImageAnalyzer for AzureVisionClient {
    async fn analyze(
        &self,
        input: &AnalysisInput,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, VisionError> {
        if options.features.is_empty() {
            return Err(VisionError::InvalidInput(
                "at least one visual feature is required".to_string(),
            ));
        }

        let request = self
            .client
            .post(self.analyze_url())
            .header(KEY_HEADER, &self.config.key)
            .query(&Self::query(options));

        let request = match input {
            AnalysisInput::FilePath(path) => {
                let data = tokio::fs::read(path).await?;
                debug!("Uploading {} ({} bytes)", path.display(), data.len());
                request
                    .header(CONTENT_TYPE, "application/octet-stream")
                    .body(data)
            }
            AnalysisInput::Bytes(data) => {
                if data.is_empty() {
                    return Err(VisionError::InvalidInput("image data is empty".to_string()));
                }
                request
                    .header(CONTENT_TYPE, "application/octet-stream")
                    .body(data.clone())
            }
            AnalysisInput::Url(url) => request.json(&serde_json::json!({ "url": url })),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.code, envelope.error.message),
                Err(_) => (String::new(), body),
            };
            return Err(VisionError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VisualFeature;

    fn config() -> VisionConfig {
        VisionConfig::new(
            Some("https://example.cognitiveservices.azure.com/".to_string()),
            Some("test-key".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_config_requires_endpoint_and_key() {
        assert!(matches!(
            VisionConfig::new(None, Some("k".into())),
            Err(VisionError::MissingConfig("VISION_ENDPOINT"))
        ));
        assert!(matches!(
            VisionConfig::new(Some("https://x".into()), Some("   ".into())),
            Err(VisionError::MissingConfig("VISION_KEY"))
        ));
    }

    #[test]
    fn test_analyze_url_trims_trailing_slash() {
        let client = AzureVisionClient::new(config()).unwrap();
        assert_eq!(
            client.analyze_url(),
            "https://example.cognitiveservices.azure.com/computervision/imageanalysis:analyze"
        );
    }

    #[test]
    fn test_query_lists_features_in_order() {
        let mut options = AnalysisOptions::new(&[VisualFeature::Read, VisualFeature::Caption]);
        options.gender_neutral_caption = false;
        let query = AzureVisionClient::query(&options);
        assert_eq!(query[0], ("api-version", API_VERSION.to_string()));
        assert_eq!(query[1], ("features", "read,caption".to_string()));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_query_carries_language_and_caption_flag() {
        let options = AnalysisOptions {
            language: Some("fr".to_string()),
            ..AnalysisOptions::new(&[VisualFeature::Caption])
        };
        let query = AzureVisionClient::query(&options);
        assert!(query.contains(&("gender-neutral-caption", "true".to_string())));
        assert_eq!(query.last(), Some(&("language", "fr".to_string())));
    }

    #[tokio::test]
    async fn test_empty_feature_list_is_rejected() {
        let client = AzureVisionClient::new(config()).unwrap();
        let options = AnalysisOptions::new(&[]);
        let err = client
            .analyze(&AnalysisInput::Bytes(vec![1, 2, 3]), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let client = AzureVisionClient::new(config()).unwrap();
        let input = AnalysisInput::FilePath("does/not/exist.jpg".into());
        let err = client
            .analyze(&input, &AnalysisOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VisionError::Io(_)));
    }
}
