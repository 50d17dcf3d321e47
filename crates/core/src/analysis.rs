//! Analysis Contract
//!
//! The request and report value objects exchanged between the session state
//! machine, the completion provider, and presentation. Both are immutable
//! once constructed and owned exclusively by the session state that holds
//! them.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Language, ManipulationCategory, Perspective, RiskBand};

/// A single analysis request: the text under scrutiny plus how it should be
/// framed and which language the verdict must be written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The message text to analyze. Non-empty after trimming; the session
    /// state machine enforces this before construction.
    pub text: String,
    /// Whether the user received or authored the text.
    pub perspective: Perspective,
    /// Output language for all natural-language report fields.
    pub language: Language,
}

impl AnalysisRequest {
    /// Build a request from caller-supplied parts.
    pub fn new(text: impl Into<String>, perspective: Perspective, language: Language) -> Self {
        Self {
            text: text.into(),
            perspective,
            language,
        }
    }
}

/// A quoted excerpt plus the manipulation categories and rationale
/// attributed to it.
///
/// `quoted_text` should be a verbatim substring of the analyzed input, but
/// that is provider-trusted rather than mechanically verified here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSpan {
    /// Exact quote from the source text.
    pub quoted_text: String,
    /// Categories attributed to this span.
    pub categories: Vec<ManipulationCategory>,
    /// Short rationale for the attribution.
    pub reason: String,
}

/// The three-part narrative explanation of the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// What communication pattern is happening in the text.
    pub what_is_happening: String,
    /// Why the pattern is harmful to the receiver.
    pub why_harmful: String,
    /// A healthier phrasing of the same underlying need.
    pub contrast_example: String,
}

/// A single piece of communication guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Style label for the suggestion (e.g. "assertive", "soft boundary").
    pub style: String,
    /// The suggested wording.
    pub text: String,
}

/// The structured verdict for one analyzed message.
///
/// All fields are required; the sequences may be empty. When
/// `manipulation_present` is false the provider should leave `categories`
/// and `evidence` empty, but that invariant is advisory and not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Overall risk score, clamped into [0,100] on ingest.
    pub risk_score: u8,
    /// Whether any manipulation was detected.
    pub manipulation_present: bool,
    /// Detected categories for the message as a whole.
    pub categories: Vec<ManipulationCategory>,
    /// Evidence spans, in the provider's order.
    pub evidence: Vec<EvidenceSpan>,
    /// Narrative explanation of the verdict.
    pub explanation: Explanation,
    /// Suggested ways to respond to a received message.
    pub response_suggestions: Vec<Suggestion>,
    /// Suggested rewrites for a self-authored message.
    pub rewrite_suggestions: Vec<Suggestion>,
}

impl AnalysisReport {
    /// The severity band for this report's risk score.
    pub fn band(&self) -> RiskBand {
        RiskBand::for_score(self.risk_score)
    }
}
