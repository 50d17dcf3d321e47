//! LLM Types
//!
//! Core types for completion provider interactions: provider configuration,
//! the schema-constrained completion request, the response schema
//! declaration, and the provider error taxonomy.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use boundary_guard_core::proxy::ProxyConfig;

/// Supported completion provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
        }
    }
}

/// Configuration for a completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The provider type
    pub provider: ProviderType,
    /// API key (resolved from the environment by the application layer)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Default sampling temperature (0.0 - 1.0); per-request overrides win
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds; expiry surfaces as a network error
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Proxy configuration for outbound calls
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proxy: Option<ProxyConfig>,
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::Gemini,
            api_key: None,
            base_url: None,
            model: "gemini-2.5-flash".to_string(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
        }
    }
}

/// A single schema-constrained completion request.
///
/// Provider-agnostic: the system instruction frames the task, the user
/// payload carries the caller data as a JSON string, and the response
/// schema constrains generation to a machine-parseable shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Fixed task instruction (persona, taxonomy, output rules).
    pub system_instruction: String,
    /// Caller data, already serialized as a JSON string.
    pub user_payload: String,
    /// Declared shape of the expected JSON output.
    pub response_schema: ResponseSchema,
    /// Optional temperature override for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// JSON Schema declaration for schema-constrained generation.
///
/// Type names use the provider's uppercase spelling (`OBJECT`, `STRING`,
/// ...), matching the Generative Language API `Schema` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, ResponseSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl ResponseSchema {
    /// Create a string schema
    pub fn string(description: Option<&str>) -> Self {
        Self {
            schema_type: "STRING".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
            enum_values: None,
        }
    }

    /// Create an integer schema
    pub fn integer(description: Option<&str>) -> Self {
        Self {
            schema_type: "INTEGER".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
            enum_values: None,
        }
    }

    /// Create a boolean schema
    pub fn boolean(description: Option<&str>) -> Self {
        Self {
            schema_type: "BOOLEAN".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: None,
            enum_values: None,
        }
    }

    /// Create an object schema
    pub fn object(
        description: Option<&str>,
        properties: HashMap<String, ResponseSchema>,
        required: Vec<String>,
    ) -> Self {
        Self {
            schema_type: "OBJECT".to_string(),
            description: description.map(|s| s.to_string()),
            properties: Some(properties),
            required: Some(required),
            items: None,
            enum_values: None,
        }
    }

    /// Create an array schema
    pub fn array(description: Option<&str>, items: ResponseSchema) -> Self {
        Self {
            schema_type: "ARRAY".to_string(),
            description: description.map(|s| s.to_string()),
            properties: None,
            required: None,
            items: Some(Box::new(items)),
            enum_values: None,
        }
    }
}

/// Error types for completion operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmError {
    /// Authentication failed (missing or invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited {
        message: String,
        retry_after: Option<u32>,
    },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error (including timeouts)
    NetworkError { message: String },
    /// Call succeeded but the provider returned no text
    EmptyResponse,
    /// Response body could not be parsed
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl LlmError {
    /// Whether a fresh user-initiated attempt could plausibly succeed.
    ///
    /// Authentication failures require operator action first; everything
    /// else is transient from the caller's point of view.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LlmError::AuthenticationFailed { .. })
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message, .. } => {
                write!(f, "Rate limited: {}", message)
            }
            LlmError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::EmptyResponse => {
                write!(f, "Provider returned an empty response")
            }
            LlmError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            LlmError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for completion operations
pub type LlmResult<T> = Result<T, LlmError>;
