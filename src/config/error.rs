use std::path::PathBuf;
use thiserror::Error;

use crate::core::codec::CodecError;

/// Errors that can occur while reading or writing manifest and settings files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// File failed the hotkey manifest acceptance checks.
    #[error("Not a hotkey file: {path}: {reason}")]
    NotAHotkeyFile { path: PathBuf, reason: String },
    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// Failed to create or restore a backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Manifest text was rejected by the codec.
    #[error("Import failed: {0}")]
    Import(#[from] CodecError),
    /// Structured (JSON) data could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
