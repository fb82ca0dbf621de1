//! Manifest and settings file management with atomic writes and backup support.
//!
//! This module is the persistence layer around the core. Key features:
//!
//! - **Acceptance gate**: only `.txt` files named `*hotkeys*` that start with
//!   the manifest header are imported
//! - **Atomic writes**: Uses temp-file-then-rename to prevent corruption
//! - **Automatic backups**: Every save creates a timestamped backup
//! - **Structured interchange**: JSON form of a manifest
//! - **Settings**: small JSON settings file with defaults
//!
//! # Example
//!
//! ```no_run
//! use hotkey_remapper::config::ManifestStore;
//!
//! let store = ManifestStore::new("/home/user/hotkeys.txt".into())?;
//! let manifest = store.load()?;
//!
//! // Backup first, then atomic write
//! let backup = store.save(&manifest)?;
//! println!("Previous version kept at {}", backup.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::Path};
use tracing::warn;

use crate::core::codec::MANIFEST_HEADER;
use crate::core::types::Manifest;

pub mod error;
pub mod settings;
pub mod store;

pub use error::ConfigError;
pub use settings::{Settings, SettingsStore};
pub use store::ManifestStore;

/// Substring every importable manifest file name must contain
pub const HOTKEY_FILE_MARKER: &str = "hotkeys";

/// Checks that `path` is an importable hotkey manifest.
///
/// The file must exist, have a `.txt` extension, contain `hotkeys` in its
/// name (both case-insensitive) and start with the manifest header.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist and
/// `ConfigError::NotAHotkeyFile` naming the first failed check otherwise.
pub fn validate_hotkey_file(path: &Path) -> Result<(), ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let reject = |reason: &str| {
        warn!(path = %path.display(), reason, "rejected hotkey file");
        Err(ConfigError::NotAHotkeyFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
    };

    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return reject("extension must be .txt");
    }

    let has_marker = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_lowercase().contains(HOTKEY_FILE_MARKER));
    if !has_marker {
        return reject("file name must contain 'hotkeys'");
    }

    let content = fs::read_to_string(path)?;
    let first_line = content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty());
    if first_line != Some(MANIFEST_HEADER) {
        return reject("first line must be '--- General ---'");
    }

    Ok(())
}

/// Atomically replaces the content of `path`.
///
/// The write goes to a temporary file that is renamed over `path` on
/// commit, so readers see either the old or the new content.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}

/// Reads a manifest from its structured JSON form.
///
/// Commands with an empty `shortcuts` list come back with one empty slot.
pub fn load_structured(path: &Path) -> Result<Manifest, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Writes a manifest in its structured JSON form (pretty-printed, atomic).
pub fn save_structured(path: &Path, manifest: &Manifest) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(manifest)?;
    write_atomic(path, &json)
}

#[cfg(test)]
mod tests;
