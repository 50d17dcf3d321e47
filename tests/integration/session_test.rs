//! Session Lifecycle Integration Tests
//!
//! Verifies the session state machine end-to-end:
//! - Synchronous Idle -> Loading transition before the invocation settles
//! - Empty-text and overlapping-request no-ops
//! - Failure classification, including missing credential with no outbound call
//! - Superseded invocations never overwrite later state
//! - The full guilt-tripping scenario through builder, validator, and bands

use std::sync::Arc;

use boundary_guard::models::session::FailureKind;
use boundary_guard::models::settings::AppConfig;
use boundary_guard::services::analysis::AnalysisService;
use boundary_guard::SessionState;
use boundary_guard_core::{Language, ManipulationCategory, Perspective, RiskBand};
use boundary_guard_llm::{GeminiProvider, LlmError, ProviderConfig};

use crate::mock::{report_payload, Gate, Script, ScriptedProvider};

fn service(provider: Arc<ScriptedProvider>) -> AnalysisService {
    AnalysisService::new(provider, AppConfig::default())
}

// ============================================================================
// Lifecycle Transitions
// ============================================================================

#[tokio::test]
async fn test_idle_to_loading_before_invocation_settles() {
    let gate = Gate::new();
    let provider = ScriptedProvider::new(vec![Script::gated(gate.clone(), Ok(report_payload(42)))]);
    let svc = service(provider);

    assert!(svc.state().await.is_idle());

    let worker = svc.clone();
    let handle = tokio::spawn(async move {
        worker
            .request_analysis("you never listen", Perspective::Received, Language::En)
            .await
    });

    // The invocation has started but not settled: state must be Loading.
    gate.started.notified().await;
    let state = svc.state().await;
    match &state {
        SessionState::Loading { request } => assert_eq!(request.text, "you never listen"),
        other => panic!("expected Loading, got {:?}", other),
    }

    gate.release.notify_one();
    let final_state = handle.await.unwrap();
    assert!(matches!(final_state, SessionState::Result { .. }));
}

#[tokio::test]
async fn test_empty_and_whitespace_requests_are_noops() {
    let provider = ScriptedProvider::single(Ok(report_payload(10)));
    let svc = service(provider.clone());

    let state = svc
        .request_analysis("", Perspective::Received, Language::En)
        .await;
    assert!(state.is_idle());

    let state = svc
        .request_analysis("   \n\t ", Perspective::Received, Language::En)
        .await;
    assert!(state.is_idle());

    // No invocation was ever attempted
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_noop_preserves_existing_result() {
    let provider = ScriptedProvider::single(Ok(report_payload(35)));
    let svc = service(provider);

    let result = svc
        .request_analysis("fine, whatever", Perspective::Received, Language::En)
        .await;
    assert!(matches!(result, SessionState::Result { .. }));

    // A whitespace-only request leaves the Result untouched
    let state = svc
        .request_analysis("   ", Perspective::Received, Language::En)
        .await;
    assert_eq!(state, result);
    assert_eq!(svc.state().await, result);
}

#[tokio::test]
async fn test_loading_rejects_overlapping_request() {
    let gate = Gate::new();
    let provider = ScriptedProvider::new(vec![Script::gated(gate.clone(), Ok(report_payload(42)))]);
    let svc = service(provider.clone());

    let worker = svc.clone();
    let handle = tokio::spawn(async move {
        worker
            .request_analysis("first message", Perspective::Received, Language::En)
            .await
    });
    gate.started.notified().await;

    // The second request is rejected while the first is in flight.
    let state = svc
        .request_analysis("second message", Perspective::Received, Language::En)
        .await;
    assert!(state.is_loading());
    assert_eq!(provider.call_count(), 1);

    gate.release.notify_one();
    let final_state = handle.await.unwrap();
    match final_state {
        SessionState::Result { request, .. } => assert_eq!(request.text, "first message"),
        other => panic!("expected Result, got {:?}", other),
    }
}

#[tokio::test]
async fn test_superseded_invocation_never_overwrites_later_state() {
    let gate = Gate::new();
    let provider = ScriptedProvider::new(vec![
        Script::gated(gate.clone(), Ok(report_payload(30))),
        Script::plain(Ok(report_payload(78))),
    ]);
    let svc = service(provider.clone());

    // Invocation A parks in flight.
    let worker = svc.clone();
    let handle = tokio::spawn(async move {
        worker
            .request_analysis("message a", Perspective::Received, Language::En)
            .await
    });
    gate.started.notified().await;

    // Supersede A, then run invocation B to completion.
    svc.clear().await;
    let state_b = svc
        .request_analysis("message b", Perspective::Received, Language::En)
        .await;
    match &state_b {
        SessionState::Result { report, .. } => assert_eq!(report.risk_score, 78),
        other => panic!("expected Result, got {:?}", other),
    }

    // Let A settle; its outcome must be discarded.
    gate.release.notify_one();
    handle.await.unwrap();

    match svc.state().await {
        SessionState::Result { report, request } => {
            assert_eq!(report.risk_score, 78);
            assert_eq!(request.text, "message b");
        }
        other => panic!("expected B's Result to survive, got {:?}", other),
    }
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_clear_from_result_and_failed_yields_idle() {
    let provider = ScriptedProvider::new(vec![
        Script::plain(Ok(report_payload(60))),
        Script::plain(Err(LlmError::EmptyResponse)),
    ]);
    let svc = service(provider);

    svc.request_analysis("text", Perspective::Received, Language::En)
        .await;
    assert!(matches!(svc.state().await, SessionState::Result { .. }));
    svc.clear().await;
    assert!(svc.state().await.is_idle());

    svc.request_analysis("text", Perspective::Received, Language::En)
        .await;
    assert!(matches!(svc.state().await, SessionState::Failed { .. }));
    svc.clear().await;
    assert!(svc.state().await.is_idle());
}

// ============================================================================
// Failure Classification
// ============================================================================

#[tokio::test]
async fn test_missing_credential_fails_without_outbound_call() {
    // Real provider, no credential, unroutable endpoint: if an outbound call
    // were attempted it would surface as a network error instead.
    let provider = GeminiProvider::new(ProviderConfig {
        api_key: None,
        base_url: Some("http://127.0.0.1:9".to_string()),
        ..ProviderConfig::default()
    });
    let svc = AnalysisService::new(Arc::new(provider), AppConfig::default());

    let state = svc
        .request_analysis("text", Perspective::Received, Language::En)
        .await;
    match state {
        SessionState::Failed { failure, .. } => {
            assert_eq!(failure.kind, FailureKind::Configuration);
            assert!(!failure.can_retry());
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_payload_missing_explanation_is_schema_violation() {
    let payload = serde_json::json!({
        "risk_score": 50,
        "manipulation_present": true,
        "categories": [],
        "evidence": [],
        "response_suggestions": [],
        "rewrite_suggestions": []
    })
    .to_string();
    let svc = service(ScriptedProvider::single(Ok(payload)));

    let state = svc
        .request_analysis("text", Perspective::Received, Language::En)
        .await;
    match state {
        SessionState::Failed { failure, request } => {
            assert_eq!(failure.kind, FailureKind::SchemaViolation);
            assert!(failure.can_retry());
            assert_eq!(request.text, "text");
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_output_is_malformed_not_a_fault() {
    let svc = service(ScriptedProvider::single(Ok(
        "Sorry, I cannot help with that.".to_string(),
    )));
    let state = svc
        .request_analysis("text", Perspective::Received, Language::En)
        .await;
    match state {
        SessionState::Failed { failure, .. } => {
            assert_eq!(failure.kind, FailureKind::MalformedOutput);
            // The raw provider text never reaches the user message
            assert!(!failure.message.contains("Sorry"));
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_failure_is_retryable() {
    let svc = service(ScriptedProvider::single(Err(LlmError::ServerError {
        message: "upstream overloaded".to_string(),
        status: Some(503),
    })));
    let state = svc
        .request_analysis("text", Perspective::Received, Language::En)
        .await;
    match state {
        SessionState::Failed { failure, .. } => {
            assert_eq!(failure.kind, FailureKind::Transport);
            assert!(failure.can_retry());
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[tokio::test]
async fn test_guilt_tripping_scenario_end_to_end() {
    // Provider omits rewrite_suggestions entirely; the validator tolerates it.
    let payload = serde_json::json!({
        "risk_score": 78,
        "manipulation_present": true,
        "categories": ["guilt_tripping", "emotional_blackmail"],
        "evidence": [{
            "quoted_text": "If you really loved me, you wouldn't go out with your friends.",
            "categories": ["guilt_tripping", "emotional_blackmail"],
            "reason": "Frames an ordinary choice as proof of not loving the speaker"
        }],
        "explanation": {
            "what_is_happening": "Affection is being made conditional on compliance",
            "why_harmful": "It pressures the receiver to give up autonomy to prove love",
            "contrast_example": "I miss you lately — could we plan a night together this week?"
        },
        "response_suggestions": [
            {"style": "assertive", "text": "I love you, and I'm still going to see my friends."},
            {"style": "soft boundary", "text": "I hear that you miss me. Let's find a time for us."}
        ]
    })
    .to_string();

    let svc = service(ScriptedProvider::single(Ok(payload)));
    let state = svc
        .request_analysis(
            "If you really loved me, you wouldn't go out with your friends.",
            Perspective::Received,
            Language::En,
        )
        .await;

    match state {
        SessionState::Result { report, request } => {
            assert_eq!(report.risk_score, 78);
            assert_eq!(report.band(), RiskBand::High);
            assert!(report.manipulation_present);
            assert_eq!(
                report.categories,
                vec![
                    ManipulationCategory::GuiltTripping,
                    ManipulationCategory::EmotionalBlackmail,
                ]
            );
            assert!(!report.response_suggestions.is_empty());
            assert!(report.rewrite_suggestions.is_empty());
            assert_eq!(request.perspective, Perspective::Received);
        }
        other => panic!("expected Result, got {:?}", other),
    }
}
