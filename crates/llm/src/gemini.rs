//! Gemini Provider
//!
//! Implementation of the CompletionProvider trait for the Google Generative
//! Language API. Requests schema-constrained generation: the response MIME
//! type is pinned to JSON and the declared response schema is enforced
//! provider-side, so well-behaved responses are machine-parseable as-is.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::provider::{missing_api_key_error, parse_http_error, CompletionProvider};
use super::types::{CompletionRequest, LlmError, LlmResult, ProviderConfig};
use crate::http_client::build_http_client;

/// Default Generative Language API endpoint
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = build_http_client(
            config.proxy.as_ref(),
            Duration::from_secs(config.timeout_secs),
        );
        Self { config, client }
    }

    /// Get the generateContent URL for the configured model
    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);
        format!("{}/{}:generateContent", base, self.config.model)
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        serde_json::json!({
            "system_instruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.user_payload }]
            }],
            "generationConfig": {
                "temperature": request.temperature.unwrap_or(self.config.temperature),
                "maxOutputTokens": self.config.max_output_tokens,
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            }
        })
    }

    /// Extract the response text from a parsed API response.
    ///
    /// Concatenates the first candidate's text parts. A successful call
    /// with no text is an `EmptyResponse`.
    fn extract_text(response: &GeminiResponse) -> LlmResult<String> {
        let text: String = response
            .candidates
            .as_deref()
            .unwrap_or_default()
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_ref())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: CompletionRequest) -> LlmResult<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = self.build_request_body(&request);

        tracing::debug!(model = %self.config.model, "dispatching generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            tracing::warn!(status, "generateContent request failed");
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::extract_text(&gemini_response)
    }
}

/// Generative Language API response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}
