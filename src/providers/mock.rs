/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockProvider::working()` - Echoes the embedded document back as JSON
 * - `MockProvider::tagging(tag)` - Prefixes every string leaf with a tag
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::malformed()` - Answers with prose and no JSON
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::translation::prompts::embedded_document;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns the document of the prompt unchanged, in a fenced block
    Working,
    /// Returns the document with every string leaf prefixed by the tag
    Tagging { tag: String },
    /// Always fails with an error
    Failing,
    /// Returns text without any JSON in it
    Malformed,
    /// Returns empty response
    Empty,
    /// Simulates slow response (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Every prompt received, shared between clones
    prompts: Arc<Mutex<Vec<String>>>,
    /// Prompts containing this text fail with an API error
    fail_on: Option<String>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that marks every string it "translates"
    pub fn tagging(tag: &str) -> Self {
        Self::new(MockBehavior::Tagging { tag: tag.to_string() })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that never returns JSON
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that waits before echoing
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Fail every prompt that contains `needle`
    pub fn with_failure_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of every prompt received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Wrap `document` the way a well-behaved model answers
    pub fn fenced(document: &str) -> String {
        format!("Here is the result:\n```json\n{}\n```", document)
    }

    fn echo(prompt: &str) -> String {
        Self::fenced(embedded_document(prompt).unwrap_or("{}"))
    }

    fn tag_document(prompt: &str, tag: &str) -> String {
        let document = embedded_document(prompt).unwrap_or("{}");
        match serde_json::from_str::<Value>(document) {
            Ok(tree) => {
                let tagged = tag_strings(&tree, tag);
                Self::fenced(&serde_json::to_string_pretty(&tagged).unwrap_or_default())
            }
            Err(_) => Self::fenced(document),
        }
    }
}

/// Prefix every string leaf with `tag`, once
fn tag_strings(value: &Value, tag: &str) -> Value {
    match value {
        Value::String(s) if s.starts_with(tag) => value.clone(),
        Value::String(s) => Value::String(format!("{}{}", tag, s)),
        Value::Array(items) => Value::Array(items.iter().map(|v| tag_strings(v, tag)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), tag_strings(v, tag)))
                .collect(),
        ),
        other => other.clone(),
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
            prompts: Arc::clone(&self.prompts),
            fail_on: self.fail_on.clone(),
            custom_response: self.custom_response,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        if let Some(needle) = &self.fail_on {
            if prompt.contains(needle.as_str()) {
                return Err(ProviderError::ApiError {
                    message: format!("Simulated failure on '{}' (request #{})", needle, count + 1),
                    status_code: 503,
                });
            }
        }

        if let Some(generator) = self.custom_response {
            return Ok(generator(prompt));
        }

        match &self.behavior {
            MockBehavior::Working => Ok(Self::echo(prompt)),
            MockBehavior::Tagging { tag } => Ok(Self::tag_document(prompt, tag)),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
            MockBehavior::Malformed => Ok("I'm sorry, I can't produce that document right now.".to_string()),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(Self::echo(prompt))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
