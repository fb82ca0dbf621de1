//! Config module tests
//!
//! Contains test suites for the persistence layer:
//! - Hotkey file acceptance checks
//! - Manifest store saves, backups and restore
//! - Structured JSON interchange
//! - Settings defaults and persistence
