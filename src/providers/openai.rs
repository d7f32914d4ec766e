/*!
 * OpenAI-compatible chat completions client.
 *
 * Works against api.openai.com, Azure OpenAI deployments and local servers
 * that speak the same protocol (LM Studio).
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{Provider, error_from_response, http_client, map_send_error};
use crate::errors::ProviderError;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
const AZURE_API_VERSION: &str = "2024-02-01";

/// OpenAI client for chat completions
#[derive(Debug)]
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Base URL, e.g. `https://api.openai.com/v1`
    endpoint: String,
    /// Model, or deployment name on Azure
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

/// Chat completions request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat message
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl OpenAIRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(OpenAIMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

impl OpenAIResponse {
    /// Text of the first choice
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

impl OpenAI {
    /// Create a new client. An empty endpoint means the public API.
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
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Azure hosts address a deployment and authenticate with `api-key`.
    pub fn is_azure(&self) -> bool {
        Url::parse(&self.endpoint)
            .ok()
            .and_then(|url| url.host_str().map(|h| h.ends_with(".openai.azure.com")))
            .unwrap_or(false)
    }

    /// Full chat completions URL for the configured endpoint
    pub fn completions_url(&self) -> String {
        if self.is_azure() {
            format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.endpoint, self.model, AZURE_API_VERSION
            )
        } else {
            format!("{}/chat/completions", self.endpoint)
        }
    }

    /// Send a chat completions request
    pub async fn complete(&self, request: OpenAIRequest) -> Result<OpenAIResponse, ProviderError> {
        let url = self.completions_url();
        debug!("POST {}", url);

        let mut builder = self.client.post(&url).json(&request);
        if self.is_azure() {
            builder = builder.header("api-key", &self.api_key);
        } else if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!("OpenAI API error: {}", err);
            return Err(err);
        }

        response
            .json::<OpenAIResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse OpenAI API response: {}", e)))
    }

    fn request_for(&self, prompt: &str) -> OpenAIRequest {
        let mut request = OpenAIRequest::new(&self.model).add_message("user", prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.max_tokens(max_tokens);
        }
        request
    }
}

#[async_trait]
impl Provider for OpenAI {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self.complete(self.request_for(prompt)).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "OpenAI usage: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        match response.first_text() {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(ProviderError::EmptyResponse),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = OpenAIRequest::new(&self.model).add_message("user", "Hello").max_tokens(5);
        self.complete(request).await.map(|_| ())
    }

    fn name(&self) -> &str {
        if self.is_azure() { "Azure OpenAI" } else { "OpenAI" }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
