//! Services
//!
//! Business logic services for the application. The analysis service owns
//! the session lifecycle and is the only writer of session state.

pub mod analysis;

pub use analysis::AnalysisService;
