//! Editor module tests
//!
//! Contains test suites for the edit session controller:
//! - Assignment, duplicate and conflict handling
//! - Slot deletion and addition rules
//! - Row model and button availability

#[cfg(test)]
mod controller_tests;
