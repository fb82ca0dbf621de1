//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Shortcut grammar and canonical form
//! - Manifest codec (decode, normalise, encode, import)
//! - Repository slot operations
//! - Conflict index and its invalidation discipline
//! - Key-event mapping in both capture modes
//! - Property tests for round-trip and idempotence

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod repository_tests;
