//! Completion Provider Trait
//!
//! Defines the common interface for completion providers. The analysis
//! pipeline only ever sees this trait, so deterministic fakes can stand in
//! for the real provider in tests.

use async_trait::async_trait;

use super::types::{CompletionRequest, LlmError, LlmResult};

/// Trait that all completion providers must implement.
///
/// A provider turns one schema-constrained request into one raw text
/// response: exactly one outbound call per invocation, no retries, no
/// caching, no partial results.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Execute the request and return the raw response text.
    ///
    /// A missing credential must be reported without attempting the call.
    async fn complete(&self, request: CompletionRequest) -> LlmResult<String>;
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 | 404 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error() {
        let err = missing_api_key_error("gemini");
        match err {
            LlmError::AuthenticationFailed { message } => {
                assert!(message.contains("gemini"));
            }
            _ => panic!("Expected AuthenticationFailed"),
        }
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_http_error(401, "unauthorized", "gemini");
        assert!(matches!(err, LlmError::AuthenticationFailed { .. }));

        let err = parse_http_error(429, "rate limited", "gemini");
        assert!(matches!(err, LlmError::RateLimited { .. }));

        let err = parse_http_error(400, "bad schema", "gemini");
        assert!(matches!(err, LlmError::InvalidRequest { .. }));

        let err = parse_http_error(500, "internal error", "gemini");
        assert!(matches!(err, LlmError::ServerError { .. }));

        let err = parse_http_error(418, "teapot", "gemini");
        assert!(matches!(err, LlmError::Other { .. }));
    }
}
