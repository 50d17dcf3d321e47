//! Boundary Guard Core
//!
//! Foundational types for the Boundary Guard workspace: the manipulation
//! taxonomy, the analysis request/report contract, the response validator,
//! and proxy configuration data types. This crate has zero dependencies on
//! application-level code (HTTP client, LLM providers, CLI).
//!
//! ## Module Organization
//!
//! - `taxonomy` - Manipulation categories, risk bands, languages, perspectives
//! - `analysis` - `AnalysisRequest` and `AnalysisReport` contract types
//! - `validate` - Provider output validation/normalization (`parse_report`)
//! - `proxy` - Proxy configuration data types shared across workspace crates
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Value objects** - requests and reports are immutable once constructed
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod analysis;
pub mod proxy;
pub mod taxonomy;
pub mod validate;

// ── Taxonomy ───────────────────────────────────────────────────────────
pub use taxonomy::{Language, ManipulationCategory, Perspective, RiskBand};

// ── Analysis Contract ──────────────────────────────────────────────────
pub use analysis::{AnalysisReport, AnalysisRequest, EvidenceSpan, Explanation, Suggestion};

// ── Validation ─────────────────────────────────────────────────────────
pub use validate::{parse_report, ValidationError};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
