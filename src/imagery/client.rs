//! Image generation over the OpenAI images API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ApiKeys;
use crate::error::{VantageError, VantageResult};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const IMAGE_MODEL: &str = "dall-e-3";
pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_QUALITY: &str = "standard";

/// Produces an image for a prompt and returns its URL
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> VantageResult<String>;
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

/// Client for `POST /v1/images/generations`
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiImageClient {
    /// Create a client using the process-wide keys
    pub fn from_keys(keys: &ApiKeys) -> VantageResult<Self> {
        Self::with_api_key(keys.openai_api_key(), DEFAULT_BASE_URL)
    }

    /// Create with a custom API key and base URL
    pub fn with_api_key(api_key: impl Into<String>, base_url: impl Into<String>) -> VantageResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(VantageError::Config(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| VantageError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/images/generations", self.base_url)
    }
}

/// First image URL in a response body
fn first_url(body: GenerationResponse) -> VantageResult<String> {
    body.data
        .into_iter()
        .next()
        .and_then(|image| image.url)
        .ok_or_else(|| VantageError::ImageGeneration("no image returned".to_string()))
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    #[instrument(skip(self, prompt), fields(model = IMAGE_MODEL))]
    async fn generate(&self, prompt: &str) -> VantageResult<String> {
        let request = GenerationRequest {
            model: IMAGE_MODEL,
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VantageError::ImageGeneration(format!(
                "image service returned {}: {}",
                status, body
            )));
        }

        let body: GenerationResponse = response.json().await?;
        let url = first_url(body)?;
        debug!("Image generated");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let err = OpenAiImageClient::with_api_key("", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, VantageError::Config(_)));

        let keys = ApiKeys::from_lookup(|_| None);
        assert!(OpenAiImageClient::from_keys(&keys).is_err());
    }

    #[test]
    fn test_endpoint() {
        let client = OpenAiImageClient::with_api_key("sk-test", "http://localhost:9000/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/images/generations");
    }

    #[test]
    fn test_request_body() {
        let request = GenerationRequest {
            model: IMAGE_MODEL,
            prompt: "a storefront",
            n: 1,
            size: IMAGE_SIZE,
            quality: IMAGE_QUALITY,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "dall-e-3",
                "prompt": "a storefront",
                "n": 1,
                "size": "1024x1024",
                "quality": "standard"
            })
        );
    }

    #[test]
    fn test_first_url() {
        let body: GenerationResponse =
            serde_json::from_str(r#"{"created": 1, "data": [{"url": "https://img/1.png"}]}"#).unwrap();
        assert_eq!(first_url(body).unwrap(), "https://img/1.png");
    }

    #[test]
    fn test_missing_url_is_error() {
        let body: GenerationResponse = serde_json::from_str(r#"{"data": [{"b64_json": "xx"}]}"#).unwrap();
        assert!(matches!(first_url(body), Err(VantageError::ImageGeneration(_))));

        let body: GenerationResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(first_url(body).is_err());
    }
}
