use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::tree::exclude::DEFAULT_EXCLUDED_KEYS;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Locale the other locales are translated from
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Locales kept in sync with the source locale
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Where the locale and variant files live
    #[serde(default)]
    pub paths: PathsConfig,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Variant content settings
    #[serde(default)]
    pub variants: VariantsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Project layout, relative to the project root
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PathsConfig {
    // @field: Directory holding one sub-directory per locale
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,

    // @field: Directory of the separated variant layout (index.json + tool dirs)
    #[serde(default = "default_variants_dir")]
    pub variants_dir: PathBuf,

    // @field: Single-file variant layout used before the split
    #[serde(default = "default_legacy_variants_file")]
    pub legacy_variants_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            locales_dir: default_locales_dir(),
            variants_dir: default_variants_dir(),
            legacy_variants_file: default_legacy_variants_file(),
        }
    }
}

/// Variant content settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VariantsConfig {
    // @field: Keys withheld from translation at any depth
    #[serde(default = "default_excluded_keys")]
    pub excluded_keys: Vec<String>,

    // @field: Variant keys containing any of these are never served
    #[serde(default)]
    pub blocked_keywords: Vec<String>,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            excluded_keys: default_excluded_keys(),
            blocked_keywords: Vec::new(),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI (also Azure OpenAI)
    #[default]
    OpenAI,
    // @provider: Google Gemini
    Gemini,
    // @provider: Anthropic
    Anthropic,
    // @provider: Ollama
    Ollama,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Gemini => "gemini".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Whether requests need an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Gemini | Self::Anthropic)
    }

    // @returns: Vendor-specific API key environment variable
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Ollama | Self::LMStudio => None,
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" | "azure" => Ok(Self::OpenAI),
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Generic API key variable, checked before the vendor-specific ones
pub const API_KEY_ENV_VAR: &str = "LOCALESYNC_API_KEY";

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (deployment name on Azure)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Delay in milliseconds between consecutive provider calls
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens a single response may use
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Run the second, polishing pass after translating
    #[serde(default = "default_true")]
    pub polish: bool,

    /// Terms left untranslated, such as brand names
    #[serde(default = "default_protected_terms")]
    pub protected_terms: Vec<String>,

    /// Extra instruction appended to every translation prompt
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            polish: true,
            protected_terms: default_protected_terms(),
            custom_instructions: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_languages() -> Vec<String> {
    ["ja", "id", "hi", "zh-CN", "zh-TW", "ko", "es", "fr", "de", "pt", "ru", "th", "vi"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_locales_dir() -> PathBuf {
    PathBuf::from("src/i18n/locales")
}

fn default_variants_dir() -> PathBuf {
    PathBuf::from("src/data/variants")
}

fn default_legacy_variants_file() -> PathBuf {
    PathBuf::from("src/data/variant-pages.json")
}

fn default_excluded_keys() -> Vec<String> {
    DEFAULT_EXCLUDED_KEYS.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_rate_limit_delay_ms() -> u64 {
    1000 // one second between provider calls
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    8192
}

fn default_true() -> bool {
    true
}

fn default_protected_terms() -> Vec<String> {
    vec!["KomikoAI".to_string()]
}

fn default_model(provider: &TranslationProvider) -> String {
    match provider {
        TranslationProvider::OpenAI => "gpt-4o".to_string(),
        TranslationProvider::Gemini => "gemini-1.5-flash".to_string(),
        TranslationProvider::Anthropic => "claude-3-5-haiku-latest".to_string(),
        TranslationProvider::Ollama => "llama3.2".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        TranslationProvider::LMStudio => "local-model".to_string(),
    }
}

fn default_endpoint(provider: &TranslationProvider) -> String {
    match provider {
        TranslationProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        TranslationProvider::Gemini => "https://generativelanguage.googleapis.com".to_string(),
        TranslationProvider::Anthropic => "https://api.anthropic.com".to_string(),
        TranslationProvider::Ollama => "http://localhost:11434".to_string(),
        TranslationProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

impl Config {
    /// Load the configuration file, or write a default one when it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json =
            serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_locale_tag(&self.source_language)?;

        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language is required"));
        }
        for language in &self.target_languages {
            crate::language_utils::validate_locale_tag(language)?;
            if language == &self.source_language {
                return Err(anyhow!("Target languages must not include the source language '{}'", language));
            }
        }

        if self.translation.common.temperature < 0.0 || self.translation.common.temperature > 2.0 {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.translation.common.temperature
            ));
        }

        // Validate API key for hosted providers
        if self.translation.provider.requires_api_key() && self.translation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Translation API key is required for {} provider (set it in the config or via {})",
                self.translation.provider.display_name(),
                API_KEY_ENV_VAR
            ));
        }

        Ok(())
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, root: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            root.join(relative)
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            paths: PathsConfig::default(),
            translation: TranslationConfig::default(),
            variants: VariantsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    /// Override the model of the active provider, adding its entry if needed
    pub fn set_model(&mut self, model: &str) {
        let provider_str = self.provider.to_lowercase_string();
        match self.available_providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(provider_config) => provider_config.model = model.to_string(),
            None => {
                let mut provider_config = ProviderConfig::new(self.provider.clone());
                provider_config.model = model.to_string();
                self.available_providers.push(provider_config);
            }
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        default_model(&self.provider)
    }

    /// Get the API key for the active provider.
    ///
    /// The config value wins; otherwise `LOCALESYNC_API_KEY`, then the
    /// vendor variable (`OPENAI_API_KEY`, ...).
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        std::iter::once(API_KEY_ENV_VAR)
            .chain(self.provider.api_key_env_var())
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        default_endpoint(&self.provider)
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config.available_providers.push(ProviderConfig::new(TranslationProvider::OpenAI));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Gemini));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Anthropic));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::Ollama));
        config.available_providers.push(ProviderConfig::new(TranslationProvider::LMStudio));

        config
    }
}
