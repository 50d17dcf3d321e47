//! Boundary Guard - Analysis Backend Library
//!
//! Analyzes a snippet of interpersonal text for manipulative communication
//! patterns by delegating classification to a schema-constrained completion
//! provider. This library provides:
//! - The request builder and session state machine services
//! - Storage layer (JSON config)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export the session surface consumed by presentation
pub use models::session::{AnalysisFailure, FailureKind, SessionState};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::analysis::AnalysisService;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
