//! Boundary Guard LLM
//!
//! Provides the completion-provider abstraction used by the analysis
//! pipeline, plus the Gemini implementation with schema-constrained JSON
//! generation and the HTTP client factory.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::CompletionProvider;
pub use types::*;
