// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Linked manifest file with automatic backups
//!
//! Every save follows the same two steps:
//! 1. Copy the current file to `backups/<name>.<YYYY-MM-DD_HHMMSS>`
//! 2. Atomically write the encoded manifest over the original
//!
//! If step 2 fails the original is untouched and the backup is still there.

use chrono::Local;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::config::{validate_hotkey_file, write_atomic, ConfigError};
use crate::core::codec::{encode, import_manifest_with_diagnostics, Diagnostic};
use crate::core::types::Manifest;

/// Manages one linked hotkey manifest file with safe atomic saves.
#[derive(Debug)]
pub struct ManifestStore {
    /// Path to the linked manifest text file.
    manifest_path: PathBuf,
    backup_dir: PathBuf,
}

impl ManifestStore {
    /// Creates a new ManifestStore for the given manifest file.
    ///
    /// The backup directory (`backups/` beside the file) is created if it
    /// doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the manifest file doesn't exist.
    /// Returns `ConfigError::BackupDirNotWritable` if the backup directory
    /// cannot be created.
    pub fn new(manifest_path: PathBuf) -> Result<Self, ConfigError> {
        if !manifest_path.exists() {
            return Err(ConfigError::NotFound(manifest_path));
        }

        // e.g., ~/hotkeys.txt → ~/backups/
        let backup_dir = manifest_path
            .parent()
            .ok_or_else(|| ConfigError::BackupDirNotWritable(PathBuf::from("Manifest file has no parent directory")))?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir).map_err(|_| ConfigError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        Ok(Self {
            manifest_path,
            backup_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the current file content without any checks.
    pub fn read_text(&self) -> Result<String, ConfigError> {
        Ok(fs::read_to_string(&self.manifest_path)?)
    }

    /// Runs the acceptance checks, then imports the file.
    pub fn load(&self) -> Result<Manifest, ConfigError> {
        self.load_with_diagnostics().map(|(manifest, _)| manifest)
    }

    /// Like [`ManifestStore::load`], also returning the dropped tokens.
    pub fn load_with_diagnostics(&self) -> Result<(Manifest, Vec<Diagnostic>), ConfigError> {
        validate_hotkey_file(&self.manifest_path)?;
        let text = self.read_text()?;
        Ok(import_manifest_with_diagnostics(&text)?)
    }

    /// Backs up the current file, then atomically writes `manifest`.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the backup holding the previous content
    /// * `Err(ConfigError)` - Nothing written; a failed write keeps the backup
    pub fn save(&self, manifest: &Manifest) -> Result<PathBuf, ConfigError> {
        let backup_path = self.create_timestamped_backup()?;
        write_atomic(&self.manifest_path, &encode(manifest))?;

        info!(
            path = %self.manifest_path.display(),
            backup = %backup_path.display(),
            "saved manifest"
        );
        Ok(backup_path)
    }

    /// Copies the current file into the backup directory.
    fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = fs::read_to_string(&self.manifest_path)?;

        let original_name = self
            .manifest_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ConfigError::BackupFailed("Manifest file name is not valid UTF-8".to_string()))?;

        // YYYY-MM-DD_HHMMSS, with a counter when saving twice in one second
        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S").to_string();
        let mut backup_path = self.backup_dir.join(format!("{}.{}", original_name, timestamp));
        let mut counter = 1;
        while backup_path.exists() {
            backup_path = self
                .backup_dir
                .join(format!("{}.{}_{}", original_name, timestamp, counter));
            counter += 1;
        }

        fs::write(&backup_path, &content).map_err(|e| ConfigError::BackupFailed(e.to_string()))?;

        Ok(backup_path)
    }

    /// Backups of this manifest, oldest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let Some(original_name) = self.manifest_path.file_name().and_then(|name| name.to_str()) else {
            return Ok(Vec::new());
        };
        let prefix = format!("{}.", original_name);

        let mut backups: Vec<PathBuf> = fs::read_dir(&self.backup_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();
        backups.sort();

        Ok(backups)
    }

    /// Atomically restores the manifest file from `backup_path`.
    pub fn restore_backup(&self, backup_path: &Path) -> Result<(), ConfigError> {
        if !backup_path.exists() {
            return Err(ConfigError::BackupFailed(format!(
                "Backup not found: {}",
                backup_path.display()
            )));
        }

        let content = fs::read_to_string(backup_path)?;
        write_atomic(&self.manifest_path, &content)?;

        info!(backup = %backup_path.display(), "restored manifest from backup");
        Ok(())
    }
}
