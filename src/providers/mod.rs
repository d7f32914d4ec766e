/*!
 * Provider implementations for different text generation services.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: OpenAI API integration (also Azure OpenAI and LM Studio)
 * - Gemini: Google Gemini API integration
 * - Anthropic: Anthropic API integration
 * - Ollama: Local LLM server
 * - Mock: scripted provider for tests
 */

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// A provider turns one prompt into one piece of text. Everything about
/// prompts and response parsing lives in the translation service, so
/// providers can be used interchangeably.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Send `prompt` and return the generated text
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Display name of the provider
    fn name(&self) -> &str;

    /// Model the provider generates with
    fn model(&self) -> &str;
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;

use anthropic::Anthropic;
use gemini::Gemini;
use ollama::Ollama;
use openai::OpenAI;

/// HTTP client shared by the provider implementations
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

/// Map a transport failure to a provider error
pub(crate) fn map_send_error(error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}

/// Map an HTTP status and body to a provider error
pub(crate) fn error_from_status(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(body),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(body),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: body,
        },
    }
}

/// Turn a non-success response into a provider error
pub(crate) async fn error_from_response(response: Response) -> ProviderError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error_from_status(status, body)
}

/// The configured provider
#[derive(Debug)]
pub enum ProviderClient {
    OpenAI(OpenAI),
    Gemini(Gemini),
    Anthropic(Anthropic),
    Ollama(Ollama),
}

impl ProviderClient {
    /// Build the active provider of a translation configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let model = config.get_model();
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();
        let temperature = config.common.temperature;
        let max_tokens = config.common.max_tokens;

        let client = match config.provider {
            TranslationProvider::OpenAI => Self::OpenAI(
                OpenAI::new_with_timeout(config.get_api_key(), endpoint, model, timeout_secs)
                    .with_temperature(temperature)
                    .with_max_tokens(max_tokens),
            ),
            TranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };
                Self::OpenAI(
                    OpenAI::new_with_timeout(api_key, endpoint, model, timeout_secs)
                        .with_temperature(temperature)
                        .with_max_tokens(max_tokens),
                )
            }
            TranslationProvider::Gemini => Self::Gemini(
                Gemini::new_with_timeout(config.get_api_key(), endpoint, model, timeout_secs)
                    .with_temperature(temperature)
                    .with_max_output_tokens(max_tokens),
            ),
            TranslationProvider::Anthropic => Self::Anthropic(
                Anthropic::new_with_timeout(config.get_api_key(), endpoint, model, timeout_secs)
                    .with_temperature(temperature)
                    .with_max_tokens(max_tokens),
            ),
            TranslationProvider::Ollama => {
                Self::Ollama(Ollama::new(&endpoint, model, timeout_secs).with_temperature(temperature))
            }
        };

        Ok(client)
    }

    fn inner(&self) -> &dyn Provider {
        match self {
            Self::OpenAI(client) => client,
            Self::Gemini(client) => client,
            Self::Anthropic(client) => client,
            Self::Ollama(client) => client,
        }
    }
}

#[async_trait]
impl Provider for ProviderClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        self.inner().generate_text(prompt).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.inner().test_connection().await
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn model(&self) -> &str {
        self.inner().model()
    }
}
