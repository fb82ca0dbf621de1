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

//! src/core/repository.rs
//!
//! In-memory owner of the session's manifest
//!
//! Every mutation goes through [`ShortcutRepository`] and sets the modified
//! flag. The repository does not canonicalise or deduplicate what it is
//! given: callers validate with the grammar and check duplicates first.
//!
//! The repository never shrinks a command to zero slots. Removing the last
//! slot clears it instead.

use thiserror::Error;

use crate::core::types::{Command, CommandRef, Manifest};

/// Lookup failures for repository mutations
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RepositoryError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Command not found: {0}")]
    CommandNotFound(CommandRef),

    #[error("Slot {index} out of range for {command} ({len} slots)")]
    IndexOutOfRange {
        command: CommandRef,
        index: usize,
        len: usize,
    },
}

/// One non-empty slot, as seen by conflict detection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatShortcut {
    pub owner: CommandRef,
    pub text: String,
    pub index: usize,
}

/// Owns one manifest plus a modified flag.
#[derive(Clone, Debug, Default)]
pub struct ShortcutRepository {
    manifest: Manifest,
    modified: bool,
}

impl ShortcutRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut repository = Self::new();
        repository.adopt(manifest);
        repository
    }

    /// Replaces the whole manifest (e.g. after an import) and clears the
    /// modified flag.
    pub fn adopt(&mut self, mut manifest: Manifest) {
        for category in &mut manifest.categories {
            for command in &mut category.commands {
                command.ensure_slot();
            }
        }
        self.manifest = manifest;
        self.modified = false;
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    /// Category ids in manifest order
    pub fn categories(&self) -> Vec<&str> {
        self.manifest.categories().iter().map(|c| c.id()).collect()
    }

    /// Commands of a category in display order, `None` if it does not exist.
    pub fn commands_of(&self, category_id: &str) -> Option<&[Command]> {
        self.manifest.category(category_id).map(|c| c.commands())
    }

    pub fn command(&self, category_id: &str, command_id: &str) -> Option<&Command> {
        self.manifest.command(category_id, command_id)
    }

    fn command_mut(&mut self, category_id: &str, command_id: &str) -> Result<&mut Command, RepositoryError> {
        let category = self
            .manifest
            .category_mut(category_id)
            .ok_or_else(|| RepositoryError::CategoryNotFound(category_id.to_string()))?;

        category
            .command_mut(command_id)
            .ok_or_else(|| RepositoryError::CommandNotFound(CommandRef::new(category_id, command_id)))
    }

    /// Overwrites slot `index` with `value` as given.
    pub fn set_slot(
        &mut self,
        category_id: &str,
        command_id: &str,
        index: usize,
        value: &str,
    ) -> Result<(), RepositoryError> {
        let command = self.command_mut(category_id, command_id)?;
        let len = command.slots.len();
        let slot = command.slots.get_mut(index).ok_or_else(|| RepositoryError::IndexOutOfRange {
            command: CommandRef::new(category_id, command_id),
            index,
            len,
        })?;

        *slot = value.to_string();
        self.modified = true;
        Ok(())
    }

    /// Appends an empty slot and returns its index.
    pub fn append_empty_slot(&mut self, category_id: &str, command_id: &str) -> Result<usize, RepositoryError> {
        let command = self.command_mut(category_id, command_id)?;
        command.slots.push(String::new());
        let index = command.slots.len() - 1;

        self.modified = true;
        Ok(index)
    }

    /// Removes slot `index`; the only remaining slot is cleared instead.
    pub fn remove_slot_at(&mut self, category_id: &str, command_id: &str, index: usize) -> Result<(), RepositoryError> {
        let command = self.command_mut(category_id, command_id)?;
        let len = command.slots.len();
        if index >= len {
            return Err(RepositoryError::IndexOutOfRange {
                command: CommandRef::new(category_id, command_id),
                index,
                len,
            });
        }

        if len == 1 {
            command.slots[0].clear();
        } else {
            command.slots.remove(index);
        }

        self.modified = true;
        Ok(())
    }

    /// Replaces the first slot equal to `old_value` with `new_value`.
    ///
    /// If `old_value` is not present but is empty, a non-empty `new_value`
    /// is appended as a new slot. Returns false when neither applies or the
    /// command does not exist.
    pub fn replace_shortcut_everywhere(
        &mut self,
        category_id: &str,
        command_id: &str,
        old_value: &str,
        new_value: &str,
    ) -> bool {
        let Ok(command) = self.command_mut(category_id, command_id) else {
            return false;
        };

        if let Some(slot) = command.slots.iter_mut().find(|s| s.as_str() == old_value) {
            *slot = new_value.to_string();
        } else if old_value.is_empty() && !new_value.is_empty() {
            command.slots.push(new_value.to_string());
        } else {
            return false;
        }

        self.modified = true;
        true
    }

    /// Removes the first slot holding exactly `value`.
    ///
    /// Used to strip a shortcut from the other owners of a conflict. Empty
    /// values never match; a command's only slot is cleared, not removed.
    pub fn remove_shortcut_value(&mut self, category_id: &str, command_id: &str, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        let Ok(command) = self.command_mut(category_id, command_id) else {
            return false;
        };
        let Some(index) = command.slots.iter().position(|s| s == value) else {
            return false;
        };

        if command.slots.len() == 1 {
            command.slots[0].clear();
        } else {
            command.slots.remove(index);
        }

        self.modified = true;
        true
    }

    /// Every non-empty slot in category, command, slot order.
    pub fn flat_shortcuts(&self) -> Vec<FlatShortcut> {
        let mut flat = Vec::new();

        for category in self.manifest.categories() {
            for command in category.commands() {
                for (index, text) in command.slots().iter().enumerate() {
                    if text.is_empty() {
                        continue;
                    }
                    flat.push(FlatShortcut {
                        owner: CommandRef::new(category.id(), command.id()),
                        text: text.clone(),
                        index,
                    });
                }
            }
        }

        flat
    }

    /// Every slot currently holding exactly `text`, read live from the manifest.
    pub fn owners_of(&self, text: &str) -> Vec<FlatShortcut> {
        if text.is_empty() {
            return Vec::new();
        }

        self.flat_shortcuts()
            .into_iter()
            .filter(|flat| flat.text == text)
            .collect()
    }

    /// Number of non-empty slots in the manifest
    pub fn shortcut_count(&self) -> usize {
        self.manifest
            .categories()
            .iter()
            .flat_map(|c| c.commands())
            .map(|c| c.values().count())
            .sum()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn clear_modified(&mut self) {
        self.modified = false;
    }
}
