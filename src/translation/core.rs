/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which is responsible for translating JSON trees using various AI providers.
 * A tree goes through two provider passes: translate, then polish. Each
 * response is parsed back into a tree by the extractor.
 */

use anyhow::Result;
use log::{debug, info};
use parking_lot::Mutex;
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::app_config::{TranslationCommonConfig, TranslationConfig};
use crate::errors::TranslationError;
use crate::language_utils::display_name_or_tag;
use crate::providers::{Provider, ProviderClient};
use crate::tree::is_empty_diff;

use super::extract::extract_json_from_response;
use super::prompts::{PromptStyle, TreePromptBuilder};

/// Usage statistics for tracking API consumption
#[derive(Clone, Debug)]
pub struct UsageStats {
    /// Number of provider calls made
    pub requests: u64,

    /// Number of provider calls that failed
    pub failed_requests: u64,

    /// Start time of tracking
    pub start_time: Instant,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl UsageStats {
    /// Create new usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            requests: 0,
            failed_requests: 0,
            start_time: Instant::now(),
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Average duration of a provider call
    pub fn average_request_duration(&self) -> Duration {
        if self.requests == 0 {
            Duration::from_secs(0)
        } else {
            self.api_duration / self.requests as u32
        }
    }

    /// Generate a summary of usage
    pub fn summary(&self) -> String {
        let elapsed_minutes = self.start_time.elapsed().as_secs_f64() / 60.0;
        let api_minutes = self.api_duration.as_secs_f64() / 60.0;

        format!(
            "Usage Summary:\n\
             Provider: {}\n\
             Model: {}\n\
             Requests: {} ({} failed)\n\
             Elapsed time: {:.2} minutes\n\
             API request time: {:.2} minutes\n\
             Average request time: {:.2}s",
            self.provider,
            self.model,
            self.requests,
            self.failed_requests,
            elapsed_minutes,
            api_minutes,
            self.average_request_duration().as_secs_f64()
        )
    }
}

/// Translation options for customizing the translation process
#[derive(Clone, Debug)]
pub struct TranslationOptions {
    /// Whether to run the polishing pass
    pub polish: bool,

    /// Terms that must stay untranslated
    pub protected_terms: Vec<String>,

    /// Extra instruction for the translation prompt
    pub custom_instructions: Option<String>,

    /// Minimum time between the start of two provider calls
    pub rate_limit_delay: Duration,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_common(&TranslationCommonConfig::default())
    }
}

impl TranslationOptions {
    pub fn from_common(common: &TranslationCommonConfig) -> Self {
        Self {
            polish: common.polish,
            protected_terms: common.protected_terms.clone(),
            custom_instructions: common.custom_instructions.clone(),
            rate_limit_delay: Duration::from_millis(common.rate_limit_delay_ms),
        }
    }
}

/// Main translation service for locale trees
#[derive(Debug)]
pub struct TranslationService<P: Provider = ProviderClient> {
    /// Provider implementation
    provider: P,

    /// Translation options
    pub options: TranslationOptions,

    /// Start of the most recent provider call
    last_call: Mutex<Option<Instant>>,

    /// Usage counters
    stats: Mutex<UsageStats>,
}

impl TranslationService<ProviderClient> {
    /// Create a new translation service with the given configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let provider = ProviderClient::from_config(config)?;
        Ok(Self::with_options(provider, TranslationOptions::from_common(&config.common)))
    }
}

impl<P: Provider> TranslationService<P> {
    /// Create a service with default options
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, TranslationOptions::default())
    }

    pub fn with_options(provider: P, options: TranslationOptions) -> Self {
        let stats = UsageStats::with_provider_info(provider.name().to_string(), provider.model().to_string());
        Self {
            provider,
            options,
            last_call: Mutex::new(None),
            stats: Mutex::new(stats),
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Snapshot of the usage counters
    pub fn stats(&self) -> UsageStats {
        self.stats.lock().clone()
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), TranslationError> {
        info!(
            "Testing connection to {} with model {}",
            self.provider.name(),
            self.provider.model()
        );
        self.provider.test_connection().await?;
        info!("Successfully connected to {}", self.provider.name());
        Ok(())
    }

    /// Translate every string of `tree` into `target_language`.
    ///
    /// The result is polished in a second pass when polishing is enabled and
    /// the style allows it. An empty tree is returned as is without calling
    /// the provider.
    pub async fn translate_tree(
        &self,
        tree: &Value,
        target_language: &str,
        style: PromptStyle,
    ) -> Result<Value, TranslationError> {
        if is_empty_diff(tree) {
            return Ok(tree.clone());
        }

        let mut builder = TreePromptBuilder::new(&display_name_or_tag(target_language))
            .with_style(style)
            .with_protected_terms(&self.options.protected_terms);
        if let Some(instructions) = &self.options.custom_instructions {
            builder = builder.with_custom_instructions(instructions);
        }

        debug!("Translating tree into {} ({:?})", target_language, style);
        let response = self.generate(&builder.build_translation(tree)).await?;
        let translated = same_shape(tree, extract_json_from_response(&response)?, &response)?;

        if !(self.options.polish && style.polishes()) {
            return Ok(translated);
        }

        debug!("Polishing {} translation", target_language);
        let response = self.generate(&builder.build_polish(&translated)).await?;
        same_shape(tree, extract_json_from_response(&response)?, &response)
    }

    /// One provider call, spaced from the previous one by the rate limit delay
    async fn generate(&self, prompt: &str) -> Result<String, TranslationError> {
        self.wait_for_slot().await;

        let start_time = Instant::now();
        let result = self.provider.generate_text(prompt).await;
        let duration = start_time.elapsed();

        {
            let mut stats = self.stats.lock();
            stats.requests += 1;
            stats.api_duration += duration;
            if result.is_err() {
                stats.failed_requests += 1;
            }
        }

        debug!("{} responded in {:?}", self.provider.name(), duration);
        Ok(result?)
    }

    async fn wait_for_slot(&self) {
        let wait = {
            let mut last_call = self.last_call.lock();
            let now = Instant::now();
            let wait = last_call
                .map(|previous| self.options.rate_limit_delay.saturating_sub(now.duration_since(previous)))
                .unwrap_or_default();
            *last_call = Some(now + wait);
            wait
        };

        if !wait.is_zero() {
            debug!("Rate limit: waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }
}

/// Reject a parsed reply whose top level is not the kind of the tree sent out
fn same_shape(sent: &Value, parsed: Value, raw: &str) -> Result<Value, TranslationError> {
    let expected = match sent {
        Value::Object(_) => "a JSON object",
        Value::Array(_) => "a JSON array",
        _ => return Ok(parsed),
    };
    if std::mem::discriminant(sent) == std::mem::discriminant(&parsed) {
        Ok(parsed)
    } else {
        Err(TranslationError::MalformedProviderResponse {
            raw: raw.to_string(),
            reason: format!("expected {}", expected),
        })
    }
}
