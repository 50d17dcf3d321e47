//! Response Validation
//!
//! Turns raw provider output into a typed [`AnalysisReport`] or a typed
//! failure. The provider is asked for schema-constrained JSON, but its
//! output is still untrusted: fields may be missing, mistyped, out of
//! range, or wrapped in markdown fences. This module is the boundary where
//! that non-determinism is normalized away.
//!
//! Validation policy:
//! - `risk_score`, `manipulation_present`, and `explanation` (with its three
//!   string members) are hard requirements; a missing or mistyped field is a
//!   [`ValidationError::SchemaViolation`] carrying the dotted field path.
//! - Out-of-range risk scores are clamped into [0,100] rather than rejected.
//! - Missing sequences (`categories`, `evidence`, suggestion lists) coerce
//!   to empty defaults to tolerate minor provider omissions.

use serde_json::Value;
use thiserror::Error;

use crate::analysis::{AnalysisReport, EvidenceSpan, Explanation, Suggestion};
use crate::taxonomy::ManipulationCategory;

/// Validation failure for raw provider output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The output could not be parsed as JSON at all.
    #[error("Malformed JSON in provider output: {message}")]
    MalformedJson { message: String },

    /// A required field is missing or has the wrong type.
    #[error("Schema violation at field '{field}'")]
    SchemaViolation { field: String },
}

impl ValidationError {
    fn violation(field: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
        }
    }
}

/// Parse and validate raw provider output into an [`AnalysisReport`].
///
/// Pure transformation: no I/O, total over well-formed JSON input, explicit
/// failure for ill-formed input.
pub fn parse_report(raw: &str) -> Result<AnalysisReport, ValidationError> {
    let json_str = extract_json_object(raw).ok_or_else(|| ValidationError::MalformedJson {
        message: "no JSON object found in output".to_string(),
    })?;

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| ValidationError::MalformedJson {
            message: e.to_string(),
        })?;

    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::violation("$"))?;

    let risk_score = clamp_score(
        obj.get("risk_score")
            .ok_or_else(|| ValidationError::violation("risk_score"))?,
    )
    .ok_or_else(|| ValidationError::violation("risk_score"))?;

    let manipulation_present = obj
        .get("manipulation_present")
        .and_then(Value::as_bool)
        .ok_or_else(|| ValidationError::violation("manipulation_present"))?;

    let explanation = parse_explanation(
        obj.get("explanation")
            .ok_or_else(|| ValidationError::violation("explanation"))?,
    )?;

    let categories = parse_categories(obj.get("categories"), "categories")?;

    let evidence = match obj.get("evidence") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_evidence_span(item, i))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ValidationError::violation("evidence")),
    };

    let response_suggestions = parse_suggestions(obj.get("response_suggestions"), "response_suggestions")?;
    let rewrite_suggestions = parse_suggestions(obj.get("rewrite_suggestions"), "rewrite_suggestions")?;

    Ok(AnalysisReport {
        risk_score,
        manipulation_present,
        categories,
        evidence,
        explanation,
        response_suggestions,
        rewrite_suggestions,
    })
}

/// Accept any JSON number for the score and clamp it into [0,100].
fn clamp_score(value: &Value) -> Option<u8> {
    let score = value.as_i64().map(|n| n as f64).or_else(|| value.as_f64())?;
    Some(score.round().clamp(0.0, 100.0) as u8)
}

fn required_str(obj: &serde_json::Map<String, Value>, key: &str, path: &str) -> Result<String, ValidationError> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| ValidationError::violation(path))
}

fn parse_explanation(value: &Value) -> Result<Explanation, ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::violation("explanation"))?;

    Ok(Explanation {
        what_is_happening: required_str(obj, "what_is_happening", "explanation.what_is_happening")?,
        why_harmful: required_str(obj, "why_harmful", "explanation.why_harmful")?,
        contrast_example: required_str(obj, "contrast_example", "explanation.contrast_example")?,
    })
}

/// Parse a category list. Missing or null coerces to empty; a present value
/// must be an array of strings. Unknown identifiers are preserved verbatim.
fn parse_categories(
    value: Option<&Value>,
    path: &str,
) -> Result<Vec<ManipulationCategory>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(ManipulationCategory::from)
                    .ok_or_else(|| ValidationError::violation(format!("{path}[{i}]")))
            })
            .collect(),
        Some(_) => Err(ValidationError::violation(path)),
    }
}

fn parse_evidence_span(value: &Value, index: usize) -> Result<EvidenceSpan, ValidationError> {
    let path = format!("evidence[{index}]");
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::violation(&path))?;

    Ok(EvidenceSpan {
        quoted_text: required_str(obj, "quoted_text", &format!("{path}.quoted_text"))?,
        categories: parse_categories(obj.get("categories"), &format!("{path}.categories"))?,
        reason: required_str(obj, "reason", &format!("{path}.reason"))?,
    })
}

fn parse_suggestions(
    value: Option<&Value>,
    path: &str,
) -> Result<Vec<Suggestion>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = format!("{path}[{i}]");
                let obj = item
                    .as_object()
                    .ok_or_else(|| ValidationError::violation(&item_path))?;
                Ok(Suggestion {
                    style: required_str(obj, "style", &format!("{item_path}.style"))?,
                    text: required_str(obj, "text", &format!("{item_path}.text"))?,
                })
            })
            .collect(),
        Some(_) => Err(ValidationError::violation(path)),
    }
}

/// Extract a JSON object from text that may wrap it in markdown code fences.
///
/// Providers occasionally decorate output despite the schema constraint, so
/// fenced blocks are tried first, then the outermost brace pair.
fn extract_json_object(text: &str) -> Option<String> {
    if let Some(start) = text.find("```json") {
        let after_fence = &text[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return Some(after_fence[..end].trim().to_string());
        }
    }
    if let Some(start) = text.find("```") {
        let after_fence = &text[start + 3..];
        // Skip optional language identifier on first line
        let after_lang = if let Some(nl) = after_fence.find('\n') {
            &after_fence[nl + 1..]
        } else {
            after_fence
        };
        if let Some(end) = after_lang.find("```") {
            let content = after_lang[..end].trim();
            if content.starts_with('{') {
                return Some(content.to_string());
            }
        }
    }
    // Raw JSON object
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}') {
            if end > start {
                return Some(text[start..=end].to_string());
            }
        }
    }
    None
}
