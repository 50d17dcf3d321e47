//! Analysis Prompts
//!
//! Builds the instruction payload for one analysis: the fixed task framing,
//! the category taxonomy and risk rubric, the output-language directive,
//! the strict response schema, and the caller's data as a JSON payload.
//! Pure construction with no error conditions; the session state machine
//! guarantees non-empty trimmed text before calling in here.

use std::collections::HashMap;

use boundary_guard_core::{AnalysisRequest, Language, ManipulationCategory, RiskBand};
use boundary_guard_llm::{CompletionRequest, ResponseSchema};

use crate::models::settings::AppConfig;

/// Fixed task framing for the detection persona.
const TASK_INSTRUCTION: &str = "\
You are Boundary Guard, an assistant specializing in detecting manipulative, \
coercive, or psychologically unhealthy communication patterns in text \
conversations.

Your objectives:
1. Identify whether the given message contains manipulation or unhealthy communication.
2. Classify the manipulation type(s) and quote the exact evidence spans.
3. Explain clearly what is happening, why it is manipulative, and how it may impact the receiver.
4. Provide practical communication guidance: response suggestions for a received message, rewrite suggestions for a self-authored one.
5. Keep explanations compassionate, psychologically aware, and non-judgmental. Avoid diagnosing people.";

/// Build the full system instruction for the requested output language.
pub fn build_system_instruction(language: Language) -> String {
    let mut parts = Vec::with_capacity(5);

    parts.push(TASK_INSTRUCTION.to_string());

    let taxonomy = ManipulationCategory::RECOMMENDED
        .iter()
        .enumerate()
        .map(|(i, category)| format!("{}. {}", i + 1, category.id()))
        .collect::<Vec<_>>()
        .join("\n");
    parts.push(format!("\n## Supported Manipulation Types\n{}", taxonomy));

    let rubric = [
        RiskBand::Healthy,
        RiskBand::Mild,
        RiskBand::Moderate,
        RiskBand::High,
    ]
    .iter()
    .map(|band| {
        let (lower, upper) = band.bounds();
        format!("{}-{}: {}.", lower, upper, band.label(Language::En))
    })
    .collect::<Vec<_>>()
    .join("\n");
    parts.push(format!("\n## Risk Scoring\n{}", rubric));

    parts.push(format!(
        "\n## Response Language\n{}",
        language_directive(language)
    ));

    parts.push("\nReturn JSON only.".to_string());

    parts.join("\n")
}

/// Directive keeping natural-language fields in the requested language
/// while the structural vocabulary stays machine-readable.
fn language_directive(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Write all natural-language fields (explanations, reasons, suggestion text, \
             suggestion style labels) in English. Keep JSON field names and manipulation \
             type identifiers exactly as specified, in English snake_case."
        }
        Language::Zh => {
            "Write all natural-language fields (explanations, reasons, suggestion text, \
             suggestion style labels) in Simplified Chinese. Keep JSON field names and \
             manipulation type identifiers exactly as specified, in English snake_case."
        }
    }
}

/// The strict output schema declaration matching the analysis report shape.
pub fn analysis_response_schema() -> ResponseSchema {
    let suggestion = |description: &str| {
        let mut properties = HashMap::new();
        properties.insert("style".to_string(), ResponseSchema::string(None));
        properties.insert("text".to_string(), ResponseSchema::string(None));
        ResponseSchema::array(
            Some(description),
            ResponseSchema::object(
                None,
                properties,
                vec!["style".to_string(), "text".to_string()],
            ),
        )
    };

    let mut span_properties = HashMap::new();
    span_properties.insert(
        "quoted_text".to_string(),
        ResponseSchema::string(Some("Exact quote from the source text")),
    );
    span_properties.insert(
        "categories".to_string(),
        ResponseSchema::array(None, ResponseSchema::string(None)),
    );
    span_properties.insert(
        "reason".to_string(),
        ResponseSchema::string(Some("Short explanation")),
    );

    let mut explanation_properties = HashMap::new();
    explanation_properties.insert(
        "what_is_happening".to_string(),
        ResponseSchema::string(None),
    );
    explanation_properties.insert("why_harmful".to_string(), ResponseSchema::string(None));
    explanation_properties.insert(
        "contrast_example".to_string(),
        ResponseSchema::string(None),
    );

    let mut properties = HashMap::new();
    properties.insert(
        "risk_score".to_string(),
        ResponseSchema::integer(Some("0-100 risk score")),
    );
    properties.insert(
        "manipulation_present".to_string(),
        ResponseSchema::boolean(None),
    );
    properties.insert(
        "categories".to_string(),
        ResponseSchema::array(
            Some("Detected manipulation type identifiers"),
            ResponseSchema::string(None),
        ),
    );
    properties.insert(
        "evidence".to_string(),
        ResponseSchema::array(
            None,
            ResponseSchema::object(
                None,
                span_properties,
                vec![
                    "quoted_text".to_string(),
                    "categories".to_string(),
                    "reason".to_string(),
                ],
            ),
        ),
    );
    properties.insert(
        "explanation".to_string(),
        ResponseSchema::object(
            None,
            explanation_properties,
            vec![
                "what_is_happening".to_string(),
                "why_harmful".to_string(),
                "contrast_example".to_string(),
            ],
        ),
    );
    properties.insert(
        "response_suggestions".to_string(),
        suggestion("Suggested ways to respond to a received message"),
    );
    properties.insert(
        "rewrite_suggestions".to_string(),
        suggestion("Suggested rewrites for a self-authored message"),
    );

    ResponseSchema::object(
        None,
        properties,
        vec![
            "risk_score".to_string(),
            "manipulation_present".to_string(),
            "categories".to_string(),
            "evidence".to_string(),
            "explanation".to_string(),
            "response_suggestions".to_string(),
            "rewrite_suggestions".to_string(),
        ],
    )
}

/// Compose the provider-agnostic completion request for one analysis.
pub fn build_completion_request(
    request: &AnalysisRequest,
    config: &AppConfig,
) -> CompletionRequest {
    let user_payload = serde_json::json!({
        "user_text": request.text,
        "perspective": request.perspective,
        "response_language": request.language,
    })
    .to_string();

    CompletionRequest {
        system_instruction: build_system_instruction(request.language),
        user_payload,
        response_schema: analysis_response_schema(),
        temperature: Some(config.temperature),
    }
}
