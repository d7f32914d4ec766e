/*!
 * Google Gemini `generateContent` client.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Provider, error_from_response, http_client, map_send_error};
use crate::errors::ProviderError;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Gemini client
#[derive(Debug)]
pub struct Gemini {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    generation_config: GenerationConfig,
}

/// Request body of `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// Sampling settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl GeminiRequest {
    pub fn new(prompt: impl Into<String>, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config,
        }
    }
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new_with_timeout(api_key, endpoint, model, 120)
    }

    pub fn new_with_timeout(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: http_client(timeout_secs),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint.trim_end_matches('/').to_string()
            },
            model: model.into(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.generation_config.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.generation_config.max_output_tokens = max_output_tokens;
        self
    }

    /// URL of the generateContent call, without the key
    pub fn generate_url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    pub async fn generate(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let url = self.generate_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("Gemini API error: {}", err);
            return Err(err);
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Gemini API response: {}", e)))
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .generate(GeminiRequest::new(prompt, self.generation_config.clone()))
            .await?;
        let text = response.text();
        if text.is_empty() {
            if let Some(reason) = response.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
                debug!("Gemini finished without text: {}", reason);
            }
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let config = GenerationConfig {
            max_output_tokens: 5,
            ..self.generation_config.clone()
        };
        self.generate(GeminiRequest::new("Hello", config)).await.map(|_| ())
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
