//! Session Models
//!
//! The client-visible analysis lifecycle. Exactly one variant holds at any
//! time; a state is replaced wholesale on the next user action. The request
//! and report value objects are owned by the variant that carries them.

use serde::{Deserialize, Serialize};

use boundary_guard_core::{AnalysisReport, AnalysisRequest, ValidationError};
use boundary_guard_llm::LlmError;

use crate::utils::error::AppError;

/// The analysis session lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// No analysis requested yet, or the session was cleared.
    Idle,
    /// An invocation is in flight.
    Loading { request: AnalysisRequest },
    /// The last invocation produced a validated report.
    Result {
        report: AnalysisReport,
        request: AnalysisRequest,
    },
    /// The last invocation failed; stable until the next user action.
    Failed {
        failure: AnalysisFailure,
        request: AnalysisRequest,
    },
}

impl SessionState {
    /// Whether an invocation is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    /// Whether the session holds no analysis.
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Internal failure classification, kept distinct for diagnostics even
/// where the user-facing message is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing credential or invalid configuration. Fatal; requires
    /// operator action, not a retry.
    Configuration,
    /// Network or provider-side failure.
    Transport,
    /// The call succeeded but returned no text.
    EmptyOutput,
    /// The output could not be parsed as JSON.
    MalformedOutput,
    /// The output parsed but violated the report schema.
    SchemaViolation,
}

/// A user-presentable failure derived from an error kind.
///
/// The message never echoes raw provider payloads; those are unpredictable
/// and go to the diagnostic log instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub kind: FailureKind,
    pub message: String,
}

const CONFIGURATION_MESSAGE: &str =
    "The analysis service is not configured. Set the GEMINI_API_KEY environment variable and restart.";
const RETRY_MESSAGE: &str = "The analysis could not be completed. Please try again.";

impl AnalysisFailure {
    /// Classify an application error into the user-facing failure taxonomy.
    pub fn from_error(err: &AppError) -> Self {
        let (kind, message) = match err {
            AppError::Config(_) | AppError::Provider(LlmError::AuthenticationFailed { .. }) => {
                (FailureKind::Configuration, CONFIGURATION_MESSAGE)
            }
            AppError::Provider(LlmError::EmptyResponse) => (FailureKind::EmptyOutput, RETRY_MESSAGE),
            AppError::Provider(LlmError::ParseError { .. })
            | AppError::Validation(ValidationError::MalformedJson { .. }) => {
                (FailureKind::MalformedOutput, RETRY_MESSAGE)
            }
            AppError::Validation(ValidationError::SchemaViolation { .. }) => {
                (FailureKind::SchemaViolation, RETRY_MESSAGE)
            }
            // Network, rate limit, server-side, and anything unexpected:
            // transient from the user's point of view.
            _ => (FailureKind::Transport, RETRY_MESSAGE),
        };
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// Whether a fresh user-initiated attempt could plausibly succeed.
    pub fn can_retry(&self) -> bool {
        self.kind != FailureKind::Configuration
    }
}
