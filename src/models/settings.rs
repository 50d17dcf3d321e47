//! Settings Models
//!
//! Application configuration and settings data structures. The provider
//! credential is deliberately absent: it is resolved from the environment
//! at provider construction and never persisted.

use serde::{Deserialize, Serialize};

use boundary_guard_core::proxy::ProxyConfig;
use boundary_guard_core::Language;
use boundary_guard_llm::{ProviderConfig, ProviderType};

/// Environment variable holding the completion provider credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model used for analysis
    pub model: String,
    /// Sampling temperature (low favors literal classification)
    pub temperature: f32,
    /// Maximum tokens the provider may generate
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Default output language for reports
    pub default_language: Language,
    /// Proxy for outbound provider calls
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proxy: Option<ProxyConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.3,
            max_output_tokens: 4096,
            timeout_secs: 60,
            default_language: Language::En,
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub default_language: Option<Language>,
    pub proxy: Option<Option<ProxyConfig>>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max) = update.max_output_tokens {
            self.max_output_tokens = max;
        }
        if let Some(timeout) = update.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(language) = update.default_language {
            self.default_language = language;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = proxy;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 1.0".to_string());
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be positive".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be positive".to_string());
        }
        Ok(())
    }

    /// Build the provider configuration, attaching the resolved credential.
    pub fn provider_config(&self, api_key: Option<String>) -> ProviderConfig {
        ProviderConfig {
            provider: ProviderType::Gemini,
            api_key,
            base_url: None,
            model: self.model.clone(),
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
            proxy: self.proxy.clone(),
        }
    }
}

/// Resolve the provider credential from the environment.
///
/// An empty value counts as absent; the caller decides whether that is
/// fatal (it is, on first use).
pub fn resolve_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
}
