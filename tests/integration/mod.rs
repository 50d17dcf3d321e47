//! Integration Tests Module
//!
//! End-to-end tests for the analysis session lifecycle, driving the real
//! request builder, validator, and state machine with deterministic
//! completion providers injected through the `CompletionProvider` trait.

// Scripted provider used to stand in for the completion capability
mod mock;

// Session state machine lifecycle tests
mod session_test;
