//! AI color theme generation.
//!
//! A theme is requested from a free-text description with a single call to a
//! generative model. The model is asked to answer with a JSON document that
//! matches [`ThemeEnvelope`]; anything else is a [`GenerationError`].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::theme::{ThemeEnvelope, ThemeSuggestion};
use crate::utils::color::is_svg_safe_color;
use crate::utils::config::ThemeConfig;

/// Prompt sent to the model; `{description}` is replaced with the user's text
pub const THEME_PROMPT: &str = "You are an expert in generating color themes for QR codes.

Based on the user's description, generate a QR code theme with appropriate colors and styles.
Colors must be hex values like #1F9481. The primary color is used for the QR modules and must
contrast strongly with the background color so the code stays scannable.

Description: {description}";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Please describe the theme you want.")]
    EmptyDescription,
    #[error("AI theme generation is not configured.")]
    NotConfigured,
    #[error("Theme request failed: {0}")]
    Request(String),
    #[error("Theme service responded with status {0}")]
    Backend(u16),
    #[error("Theme service returned an unusable theme: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ThemeGenerator: Send + Sync {
    /// One call to the backend; no retries.
    async fn generate(&self, description: &str) -> Result<ThemeSuggestion, GenerationError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Ask for a theme. Blank descriptions never reach the generator.
pub async fn request_theme(
    generator: &dyn ThemeGenerator,
    description: &str,
) -> Result<ThemeSuggestion, GenerationError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(GenerationError::EmptyDescription);
    }

    let suggestion = generator.generate(description).await?;
    if let Some(field) = suggestion.missing_field() {
        return Err(GenerationError::Malformed(format!("{} is empty", field)));
    }
    for color in [
        &suggestion.primary_color,
        &suggestion.secondary_color,
        &suggestion.background_color,
    ] {
        if !is_svg_safe_color(color) {
            return Err(GenerationError::Malformed(format!("invalid color {:?}", color)));
        }
    }

    Ok(suggestion)
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Theme generator backed by the Google Generative Language `generateContent` API
pub struct GeminiThemeClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiThemeClient {
    pub fn new(config: &ThemeConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build theme HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request_body(description: &str) -> serde_json::Value {
        let color = json!({ "type": "STRING" });
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": THEME_PROMPT.replace("{description}", description) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "qrCodeTheme": {
                            "type": "OBJECT",
                            "properties": {
                                "primaryColor": color,
                                "secondaryColor": color,
                                "backgroundColor": color,
                                "style": color
                            },
                            "required": ["primaryColor", "secondaryColor", "backgroundColor", "style"]
                        }
                    },
                    "required": ["qrCodeTheme"]
                }
            }
        })
    }
}

#[async_trait]
impl ThemeGenerator for GeminiThemeClient {
    async fn generate(&self, description: &str) -> Result<ThemeSuggestion, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!("Requesting QR theme from model {}", self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(description))
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Theme backend answered {}", status);
            return Err(GenerationError::Backend(status.as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| GenerationError::Malformed("no candidate text".to_string()))?;

        let envelope: ThemeEnvelope = serde_json::from_str(text.trim())
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;

        Ok(envelope.qr_code_theme)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct CountingGenerator {
        calls: AtomicUsize,
        reply: ThemeSuggestion,
    }

    #[async_trait]
    impl ThemeGenerator for CountingGenerator {
        async fn generate(&self, _description: &str) -> Result<ThemeSuggestion, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn suggestion() -> ThemeSuggestion {
        ThemeSuggestion {
            primary_color: "#0b3d91".into(),
            secondary_color: "#fc3d21".into(),
            background_color: "#ffffff".into(),
            style: "retro space".into(),
        }
    }

    fn client_for(server: &MockServer, api_key: Option<&str>) -> GeminiThemeClient {
        GeminiThemeClient::new(&ThemeConfig {
            api_key: api_key.map(String::from),
            base_url: server.uri(),
            model: "test-model".into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn candidate_body(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
    }

    #[tokio::test]
    async fn blank_description_never_calls_generator() {
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            reply: suggestion(),
        };

        let err = request_theme(&generator, "   ").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyDescription));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_field_in_reply_is_malformed() {
        let mut reply = suggestion();
        reply.style = String::new();
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            reply,
        };

        let err = request_theme(&generator, "space").await.unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reply_with_markup_color_is_malformed() {
        let mut reply = suggestion();
        reply.background_color = "#fff\"/><script>alert(1)</script>".into();
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
            reply,
        };

        let err = request_theme(&generator, "space").await.unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(m) if m.contains("invalid color")));
    }

    #[tokio::test]
    async fn parses_model_reply() {
        let server = MockServer::start().await;
        let theme = json!({ "qrCodeTheme": suggestion() }).to_string();
        Mock::given(method("POST"))
            .and(path("/v1beta/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&theme)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("key-123"));
        let result = request_theme(&client, "retro space").await.unwrap();
        assert_eq!(result, suggestion());
    }

    #[tokio::test]
    async fn incomplete_reply_is_malformed() {
        let server = MockServer::start().await;
        let partial = json!({ "qrCodeTheme": { "primaryColor": "#000000" } }).to_string();
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(&partial)))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("key"));
        let err = request_theme(&client, "anything").await.unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[tokio::test]
    async fn backend_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("key"));
        let err = request_theme(&client, "anything").await.unwrap_err();
        assert!(matches!(err, GenerationError::Backend(500)));
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(!client.is_configured());
        let err = request_theme(&client, "anything").await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured));
    }
}
