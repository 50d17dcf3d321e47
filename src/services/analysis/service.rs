//! Analysis Service
//!
//! Owns the session lifecycle: builds requests, drives the completion
//! invocation and validation in sequence, and exposes the current
//! `SessionState` to presentation. The service is the single writer of
//! session state; presentation reads cloned snapshots.
//!
//! Overlap policy: a new request is rejected while one is in flight. Every
//! invocation additionally carries a generation token captured at launch;
//! an outcome is applied only if the generation is unchanged when it
//! settles, so anything superseded mid-flight (a `clear()`, and any request
//! accepted after it) silently discards the stale outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use boundary_guard_core::{parse_report, AnalysisReport, AnalysisRequest, Language, Perspective};
use boundary_guard_llm::CompletionProvider;

use super::prompts::build_completion_request;
use crate::models::session::{AnalysisFailure, SessionState};
use crate::models::settings::AppConfig;
use crate::utils::error::AppResult;

/// Session state machine for message analysis.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct AnalysisService {
    provider: Arc<dyn CompletionProvider>,
    config: AppConfig,
    state: Arc<RwLock<SessionState>>,
    generation: Arc<AtomicU64>,
}

impl AnalysisService {
    /// Create a new service in the `Idle` state.
    pub fn new(provider: Arc<dyn CompletionProvider>, config: AppConfig) -> Self {
        Self {
            provider,
            config,
            state: Arc::new(RwLock::new(SessionState::Idle)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current session state for rendering.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Run one analysis and return the resulting state.
    ///
    /// No-op (returning the unchanged state) if the trimmed text is empty
    /// or an invocation is already in flight. The transition to `Loading`
    /// happens before the provider call is awaited; the final transition to
    /// `Result` or `Failed` happens when the invocation settles, unless it
    /// was superseded in the meantime.
    pub async fn request_analysis(
        &self,
        text: &str,
        perspective: Perspective,
        language: Language,
    ) -> SessionState {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!("ignoring analysis request for empty text");
            return self.state().await;
        }

        let request = AnalysisRequest::new(trimmed, perspective, language);

        // Decide and transition under one write lock so two racing requests
        // cannot both pass the Loading guard.
        let generation = {
            let mut state = self.state.write().await;
            if state.is_loading() {
                tracing::debug!("analysis already in flight, ignoring request");
                return state.clone();
            }
            *state = SessionState::Loading {
                request: request.clone(),
            };
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let outcome = self.run_invocation(&request).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding outcome of superseded invocation");
            return state.clone();
        }

        *state = match outcome {
            Ok(report) => SessionState::Result { report, request },
            Err(err) => {
                tracing::warn!(error = %err, "analysis invocation failed");
                SessionState::Failed {
                    failure: AnalysisFailure::from_error(&err),
                    request,
                }
            }
        };
        state.clone()
    }

    /// Reset to `Idle`, discarding any in-flight invocation's eventual
    /// outcome.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        *state = SessionState::Idle;
    }

    /// Invoke the provider and validate its output into a typed report.
    async fn run_invocation(&self, request: &AnalysisRequest) -> AppResult<AnalysisReport> {
        let completion = build_completion_request(request, &self.config);
        let raw = self.provider.complete(completion).await?;
        let report = parse_report(&raw)?;
        Ok(report)
    }
}
