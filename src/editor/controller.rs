//! Edit session controller - Mediates between the Repository and a list view
//!
//! # Responsibilities
//!
//! - Import manifest text and adopt it into the repository
//! - Capture key presses in the current capture mode
//! - Validate and canonicalise new shortcuts before writing
//! - Reject duplicates within one command
//! - Resolve conflicts with other commands according to a policy
//! - Provide rows and button availability in a view-friendly format
//!
//! # Architecture
//!
//! The Controller owns the Model components but doesn't know about any
//! widgets. Every write goes through the repository and is followed by
//! invalidating the conflict index, so the index is never queried stale.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::codec::{encode, import_manifest_with_diagnostics, CodecError, Diagnostic};
use crate::core::conflict::{Conflict, ConflictIndex};
use crate::core::grammar::{canonicalize, ShortcutError};
use crate::core::mapper::{map_event, CaptureMode, KeyEvent};
use crate::core::repository::{RepositoryError, ShortcutRepository};
use crate::core::types::{CommandRef, Manifest};

/// Edit failures reported back to the view
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EditError {
    #[error("Shortcut '{shortcut}' is already assigned to {command}")]
    DuplicateShortcutInCommand { command: CommandRef, shortcut: String },

    #[error(transparent)]
    InvalidShortcut(#[from] ShortcutError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// One slot of one command
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SlotRef {
    pub command: CommandRef,
    pub index: usize,
}

impl SlotRef {
    pub fn new(category_id: impl Into<String>, command_id: impl Into<String>, index: usize) -> Self {
        Self {
            command: CommandRef::new(category_id, command_id),
            index,
        }
    }
}

/// What to do when a new shortcut is already bound to other commands
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ConflictPolicy {
    /// Write nothing and report the other owners
    #[default]
    Ask,
    /// Remove the shortcut from the other owners, then write
    StripOthers,
    /// Write anyway and leave the conflict in place
    Keep,
}

/// Outcome of [`Controller::assign`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Assignment {
    /// The slot now holds `shortcut`; `stripped` lost it in the process.
    Assigned {
        shortcut: String,
        stripped: Vec<CommandRef>,
    },
    /// The slot already held this shortcut.
    Unchanged,
    /// Empty input: the slot was deleted (or cleared).
    Deleted,
    /// Nothing written; these commands already use the shortcut.
    Conflicts(Vec<CommandRef>),
}

/// Which slot actions are available
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SlotActions {
    pub can_edit: bool,
    pub can_add: bool,
    pub can_delete: bool,
}

/// One row of the category list view
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotRow {
    pub slot: SlotRef,
    pub shortcut: String,
    /// Only the first row of a command shows its name.
    pub first_of_command: bool,
    pub conflicting: bool,
}

/// Edit session over one manifest
///
/// Holds the repository, the conflict index and the capture mode toggle,
/// and exposes the edit flows a view needs.
#[derive(Debug, Default)]
pub struct Controller {
    /// Session manifest
    repository: RefCell<ShortcutRepository>,
    /// Derived conflict view (invalidated after every write)
    conflicts: RefCell<ConflictIndex>,
    /// Capture mode for the next key press
    mode: Cell<CaptureMode>,
}

impl Controller {
    /// Creates a Controller with an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a Controller editing `manifest`
    pub fn with_manifest(manifest: Manifest) -> Self {
        let controller = Self::new();
        controller.load_manifest(manifest);
        controller
    }

    /// Imports manifest text, replacing the session content
    ///
    /// # Returns
    ///
    /// * `Ok(diagnostics)` - Imported; one diagnostic per dropped token
    /// * `Err(CodecError)` - Header check failed, nothing changed
    pub fn import_text(&self, text: &str) -> Result<Vec<Diagnostic>, CodecError> {
        let (manifest, diagnostics) = import_manifest_with_diagnostics(text)?;
        self.load_manifest(manifest);
        Ok(diagnostics)
    }

    /// Replaces the session content with `manifest`
    pub fn load_manifest(&self, manifest: Manifest) {
        self.repository.borrow_mut().adopt(manifest);
        self.conflicts.borrow_mut().invalidate();
    }

    /// Snapshot of the current manifest
    pub fn manifest(&self) -> Manifest {
        self.repository.borrow().manifest().clone()
    }

    /// Category ids in manifest order
    pub fn categories(&self) -> Vec<String> {
        self.repository
            .borrow()
            .categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode.get()
    }

    /// Switches between normal and character capture, returning the new mode
    pub fn toggle_mode(&self) -> CaptureMode {
        let mode = self.mode.get().toggled();
        self.mode.set(mode);
        mode
    }

    /// Maps a key press with the current mode to canonical shortcut text
    pub fn capture(&self, event: &KeyEvent) -> Option<String> {
        map_event(event, self.mode.get()).map(|shortcut| shortcut.to_string())
    }

    /// Slots of the command `slot` points at, checked against the index.
    fn slots_of(&self, slot: &SlotRef) -> Result<Vec<String>, EditError> {
        let repository = self.repository.borrow();
        let CommandRef {
            category_id,
            command_id,
        } = &slot.command;

        if repository.commands_of(category_id).is_none() {
            return Err(RepositoryError::CategoryNotFound(category_id.clone()).into());
        }
        let command = repository
            .command(category_id, command_id)
            .ok_or_else(|| RepositoryError::CommandNotFound(slot.command.clone()))?;

        let slots = command.slots().to_vec();
        if slot.index >= slots.len() {
            return Err(RepositoryError::IndexOutOfRange {
                command: slot.command.clone(),
                index: slot.index,
                len: slots.len(),
            }
            .into());
        }

        Ok(slots)
    }

    /// Current text of a slot, `None` if it does not exist
    pub fn slot_text(&self, slot: &SlotRef) -> Option<String> {
        self.slots_of(slot).ok().map(|mut slots| slots.swap_remove(slot.index))
    }

    /// Other commands currently bound to `shortcut`, read live.
    fn other_owners(&self, shortcut: &str, command: &CommandRef) -> Vec<CommandRef> {
        let owners: BTreeSet<CommandRef> = self
            .repository
            .borrow()
            .owners_of(shortcut)
            .into_iter()
            .map(|flat| flat.owner)
            .filter(|owner| owner != command)
            .collect();

        owners.into_iter().collect()
    }

    /// Writes `new_text` into `slot`
    ///
    /// Empty text deletes the slot. Anything else must parse and is stored
    /// canonicalised. A shortcut already held by another slot of the same
    /// command is rejected; one held by other commands is handled per
    /// `policy`.
    ///
    /// # Example
    ///
    /// ```
    /// use hotkey_remapper::editor::{Assignment, ConflictPolicy, Controller, SlotRef};
    ///
    /// let controller = Controller::new();
    /// controller.import_text("--- General ---\nundo: \n")?;
    ///
    /// let slot = SlotRef::new("General", "undo", 0);
    /// let outcome = controller.assign(&slot, "Z + CTRL", ConflictPolicy::Ask);
    /// assert!(outcome.is_err());
    ///
    /// let outcome = controller.assign(&slot, "CTRL + Z", ConflictPolicy::Ask)?;
    /// assert!(matches!(outcome, Assignment::Assigned { .. }));
    /// assert_eq!(controller.export_text(), "--- General ---\nundo: ctrl + Z");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn assign(&self, slot: &SlotRef, new_text: &str, policy: ConflictPolicy) -> Result<Assignment, EditError> {
        let slots = self.slots_of(slot)?;
        let new_text = new_text.trim();

        if new_text.is_empty() {
            self.delete(slot)?;
            return Ok(Assignment::Deleted);
        }

        let shortcut = canonicalize(new_text)?;
        let old = slots[slot.index].as_str();
        if old == shortcut {
            return Ok(Assignment::Unchanged);
        }

        let duplicate = slots
            .iter()
            .enumerate()
            .any(|(i, s)| i != slot.index && *s == shortcut);
        if duplicate {
            return Err(EditError::DuplicateShortcutInCommand {
                command: slot.command.clone(),
                shortcut,
            });
        }

        let others = self.other_owners(&shortcut, &slot.command);
        let stripped = match (policy, others.is_empty()) {
            (_, true) | (ConflictPolicy::Keep, false) => Vec::new(),
            (ConflictPolicy::Ask, false) => return Ok(Assignment::Conflicts(others)),
            (ConflictPolicy::StripOthers, false) => {
                let mut repository = self.repository.borrow_mut();
                for owner in &others {
                    while repository.remove_shortcut_value(&owner.category_id, &owner.command_id, &shortcut) {
                        debug!(%owner, %shortcut, "stripped conflicting shortcut");
                    }
                }
                others
            }
        };

        {
            let mut repository = self.repository.borrow_mut();
            let CommandRef {
                category_id,
                command_id,
            } = &slot.command;

            if old.is_empty() {
                repository.set_slot(category_id, command_id, slot.index, &shortcut)?;
            } else {
                repository.replace_shortcut_everywhere(category_id, command_id, old, &shortcut);
            }
        }
        self.conflicts.borrow_mut().invalidate();

        info!(command = %slot.command, slot = slot.index, %shortcut, "assigned shortcut");
        Ok(Assignment::Assigned { shortcut, stripped })
    }

    /// Deletes a slot: the only slot is cleared, otherwise it is removed
    pub fn delete(&self, slot: &SlotRef) -> Result<(), EditError> {
        self.repository.borrow_mut().remove_slot_at(
            &slot.command.category_id,
            &slot.command.command_id,
            slot.index,
        )?;
        self.conflicts.borrow_mut().invalidate();
        Ok(())
    }

    /// Appends an empty slot to `command` and returns it
    pub fn add_slot(&self, command: &CommandRef) -> Result<SlotRef, EditError> {
        let index = self
            .repository
            .borrow_mut()
            .append_empty_slot(&command.category_id, &command.command_id)?;

        Ok(SlotRef {
            command: command.clone(),
            index,
        })
    }

    /// Button availability for a selected slot
    ///
    /// Adding needs a filled slot and no empty slot in the command; deleting
    /// needs a filled slot or a command with several slots.
    pub fn actions_for(&self, slot: &SlotRef) -> SlotActions {
        let Ok(slots) = self.slots_of(slot) else {
            return SlotActions::default();
        };

        let has_shortcut = !slots[slot.index].is_empty();
        let has_empty = slots.iter().any(String::is_empty);

        SlotActions {
            can_edit: true,
            can_add: has_shortcut && !has_empty,
            can_delete: has_shortcut || slots.len() > 1,
        }
    }

    /// One row per slot of every command in `category_id`
    pub fn rows(&self, category_id: &str) -> Vec<SlotRow> {
        let repository = self.repository.borrow();
        let Some(commands) = repository.commands_of(category_id) else {
            return Vec::new();
        };
        let conflicting = self.conflicts.borrow_mut().all_conflicting_texts(&repository);

        let mut rows = Vec::new();
        for command in commands {
            for (index, shortcut) in command.slots().iter().enumerate() {
                rows.push(SlotRow {
                    slot: SlotRef::new(category_id, command.id(), index),
                    shortcut: shortcut.clone(),
                    first_of_command: index == 0,
                    conflicting: conflicting.contains(shortcut),
                });
            }
        }

        rows
    }

    /// Other commands sharing the shortcut held by `slot`
    pub fn conflicts_with(&self, slot: &SlotRef) -> Vec<CommandRef> {
        let Some(shortcut) = self.slot_text(slot) else {
            return Vec::new();
        };

        let repository = self.repository.borrow();
        self.conflicts
            .borrow_mut()
            .conflicts_for(&repository, &shortcut, Some(&slot.command))
            .into_iter()
            .collect()
    }

    /// Returns all detected conflicts, sorted by shortcut
    pub fn conflict_groups(&self) -> Vec<Conflict> {
        let repository = self.repository.borrow();
        self.conflicts.borrow_mut().conflict_groups(&repository)
    }

    /// Returns count of detected conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflict_groups().len()
    }

    /// Returns count of assigned shortcuts
    pub fn shortcut_count(&self) -> usize {
        self.repository.borrow().shortcut_count()
    }

    /// Current manifest as manifest text
    pub fn export_text(&self) -> String {
        encode(self.repository.borrow().manifest())
    }

    pub fn is_modified(&self) -> bool {
        self.repository.borrow().is_modified()
    }

    /// Call after the manifest has been persisted
    pub fn mark_saved(&self) {
        self.repository.borrow_mut().clear_modified();
    }
}
