//! Metadata lookup backed by the Gemini `generateContent` API.
//!
//! The model is asked to describe the video behind a URL and is constrained to
//! answer with JSON matching [`VideoMetadata`]. Nothing here touches the video
//! itself.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::model::VideoMetadata;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("No API key configured")]
    MissingApiKey,
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Service returned no text")]
    EmptyResponse,
    #[error("Malformed metadata JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can turn a URL into video metadata
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<VideoMetadata, AnalyzeError>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl MetadataSource for GeminiClient {
    async fn analyze(&self, url: &str) -> Result<VideoMetadata, AnalyzeError> {
        if self.api_key.is_empty() {
            return Err(AnalyzeError::MissingApiKey);
        }

        debug!(model = %self.model, url, "requesting metadata");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = resp.json().await?;
        parse_response(body)
    }
}

pub fn prompt_for(url: &str) -> String {
    format!(
        "Analyze this video URL and extract its metadata. If you don't have real-time access \
         to the specific video, generate highly realistic metadata based on the URL structure \
         (platform, identifiers, etc.). URL: {url}"
    )
}

/// JSON schema the model's answer must satisfy
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "author": { "type": "STRING" },
            "platform": { "type": "STRING" },
            "duration": { "type": "STRING" },
            "thumbnailUrl": { "type": "STRING" },
            "availableQualities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "size": { "type": "STRING" },
                        "format": { "type": "STRING" }
                    },
                    "required": ["label", "size", "format"]
                }
            }
        },
        "required": ["title", "author", "platform", "duration", "thumbnailUrl", "availableQualities"]
    })
}

fn request_body(url: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt_for(url) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn parse_response(resp: GenerateResponse) -> Result<VideoMetadata, AnalyzeError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AnalyzeError::EmptyResponse);
    }
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> GenerateResponse {
        serde_json::from_value(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        }))
        .unwrap()
    }

    #[test]
    fn body_carries_prompt_and_schema() {
        let body = request_body("https://youtu.be/abc");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.ends_with("URL: https://youtu.be/abc"));

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        let required = config["responseSchema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        assert!(required.contains(&json!("availableQualities")));
    }

    #[test]
    fn parses_candidate_text() {
        let meta = parse_response(response(
            r#"{"title":"T","author":"A","platform":"YouTube","duration":"3:00",
                "thumbnailUrl":"","availableQualities":[{"label":"720p","size":"9 MB","format":"MP4"}]}"#,
        ))
        .unwrap();
        assert_eq!(meta.title, "T");
        assert_eq!(meta.available_qualities.len(), 1);
    }

    #[test]
    fn empty_candidates_fail() {
        let resp: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(parse_response(resp), Err(AnalyzeError::EmptyResponse)));
        assert!(matches!(parse_response(response("  ")), Err(AnalyzeError::EmptyResponse)));
    }

    #[test]
    fn malformed_json_fails() {
        assert!(matches!(
            parse_response(response("{\"title\": ")),
            Err(AnalyzeError::Json(_))
        ));
        // valid JSON but wrong shape
        assert!(matches!(
            parse_response(response("{}")),
            Err(AnalyzeError::Json(_))
        ));
    }

    #[test]
    fn endpoint_uses_model_name() {
        let config = AppConfig {
            api_base: "https://example.test/v1beta/".to_string(),
            ..AppConfig::default()
        };
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let client = GeminiClient::new(&AppConfig::default());
        let err = client.analyze("https://youtu.be/abc").await.unwrap_err();
        assert!(matches!(err, AnalyzeError::MissingApiKey));
    }
}
