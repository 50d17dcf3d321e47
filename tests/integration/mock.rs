//! Scripted Completion Provider
//!
//! Deterministic stand-in for the external completion capability. Each
//! scripted response is consumed in order; a response can be gated so a
//! test can observe the Loading state and control when the invocation
//! settles.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use boundary_guard_llm::{CompletionProvider, CompletionRequest, LlmResult};

/// Two-way gate between a test and an in-flight scripted invocation.
pub struct Gate {
    /// Notified by the provider once the invocation has started.
    pub started: Notify,
    /// Notified by the test to let the invocation settle.
    pub release: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Notify::new(),
        })
    }
}

pub struct Script {
    pub gate: Option<Arc<Gate>>,
    pub result: LlmResult<String>,
}

impl Script {
    pub fn plain(result: LlmResult<String>) -> Self {
        Self { gate: None, result }
    }

    pub fn gated(gate: Arc<Gate>, result: LlmResult<String>) -> Self {
        Self {
            gate: Some(gate),
            result,
        }
    }
}

/// Provider that replays a fixed sequence of scripted responses.
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    pub calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn single(result: LlmResult<String>) -> Arc<Self> {
        Self::new(vec![Script::plain(result)])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> LlmResult<String> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &script.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        script.result
    }
}

/// A well-formed report payload with the given risk score.
pub fn report_payload(risk_score: i64) -> String {
    serde_json::json!({
        "risk_score": risk_score,
        "manipulation_present": risk_score > 20,
        "categories": ["guilt_tripping"],
        "evidence": [{
            "quoted_text": "If you really loved me",
            "categories": ["guilt_tripping"],
            "reason": "Conditions affection on compliance"
        }],
        "explanation": {
            "what_is_happening": "Affection is being made conditional",
            "why_harmful": "It pressures the receiver into compliance",
            "contrast_example": "I miss you — can we plan time together?"
        },
        "response_suggestions": [
            {"style": "assertive", "text": "I care about you, and I'm still going."}
        ],
        "rewrite_suggestions": []
    })
    .to_string()
}
