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

//! Controller tests
//!
//! Tests for the edit session flows

use crate::core::codec::CodecError;
use crate::core::grammar::SyntaxIssue;
use crate::core::mapper::{CaptureMode, KeyEvent, ModifierFlags, RawKey};
use crate::core::repository::RepositoryError;
use crate::core::types::CommandRef;
use crate::editor::{Assignment, ConflictPolicy, Controller, EditError, SlotActions, SlotRef};

const MANIFEST: &str = "--- General ---
undo: ctrl + Z
undo: 'u'
redo:
save: ctrl + S

--- Edit ---
cut: ctrl + X
copy: ctrl + C
paste: ctrl + V";

/// Helper: Creates a controller with known content
fn create_test_controller() -> Controller {
    let controller = Controller::new();
    let diagnostics = controller.import_text(MANIFEST).unwrap();
    assert!(diagnostics.is_empty());
    controller
}

#[test]
fn test_import_text() {
    let controller = create_test_controller();

    assert_eq!(controller.categories(), vec!["General", "Edit"]);
    assert_eq!(controller.shortcut_count(), 6);
    assert_eq!(controller.conflict_count(), 0);
    assert!(!controller.is_modified());
}

#[test]
fn test_import_rejects_non_manifest() {
    let controller = create_test_controller();

    let result = controller.import_text("--- Edit ---\ncut: ctrl + X");
    assert!(matches!(result, Err(CodecError::NotAHotkeyManifest { .. })));

    // Previous content untouched
    assert_eq!(controller.categories(), vec!["General", "Edit"]);
}

#[test]
fn test_import_reports_dropped_tokens() {
    let controller = Controller::new();
    let diagnostics = controller
        .import_text("--- General ---\nundo: ctrl + 'z'\nredo: ctrl + Y")
        .unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].command, CommandRef::new("General", "undo"));
}

#[test]
fn test_assign_into_empty_slot() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "redo", 0);

    let outcome = controller.assign(&slot, "Shift + Ctrl + Z", ConflictPolicy::Ask).unwrap();
    assert_eq!(
        outcome,
        Assignment::Assigned {
            shortcut: "ctrl + shift + Z".to_string(),
            stripped: Vec::new(),
        }
    );
    assert_eq!(controller.slot_text(&slot), Some("ctrl + shift + Z".to_string()));
    assert!(controller.is_modified());
}

#[test]
fn test_assign_replaces_existing_value() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "undo", 1);

    controller.assign(&slot, "alt + 'u'", ConflictPolicy::Ask).unwrap();

    let manifest = controller.manifest();
    let undo = manifest.command("General", "undo").unwrap();
    assert_eq!(undo.slots(), &["ctrl + Z".to_string(), "alt + 'u'".to_string()]);
}

#[test]
fn test_assign_same_value_is_unchanged() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "undo", 0);

    let outcome = controller.assign(&slot, "CTRL + Z", ConflictPolicy::Ask).unwrap();
    assert_eq!(outcome, Assignment::Unchanged);
    assert!(!controller.is_modified());
}

#[test]
fn test_assign_rejects_invalid_shortcut() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "redo", 0);

    let err = controller.assign(&slot, "ctrl + 'y'", ConflictPolicy::Ask).unwrap_err();
    match err {
        EditError::InvalidShortcut(e) => assert_eq!(e.issue(), &SyntaxIssue::LiteralWithCtrlOrShift),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!controller.is_modified());
}

#[test]
fn test_assign_rejects_duplicate_in_command() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "undo", 1);

    let err = controller.assign(&slot, "ctrl + Z", ConflictPolicy::Keep).unwrap_err();
    assert_eq!(
        err,
        EditError::DuplicateShortcutInCommand {
            command: CommandRef::new("General", "undo"),
            shortcut: "ctrl + Z".to_string(),
        }
    );
}

#[test]
fn test_assign_unknown_slot() {
    let controller = create_test_controller();

    let err = controller
        .assign(&SlotRef::new("General", "nope", 0), "F1", ConflictPolicy::Ask)
        .unwrap_err();
    assert!(matches!(err, EditError::Repository(RepositoryError::CommandNotFound(_))));

    let err = controller
        .assign(&SlotRef::new("General", "save", 3), "F1", ConflictPolicy::Ask)
        .unwrap_err();
    assert!(matches!(
        err,
        EditError::Repository(RepositoryError::IndexOutOfRange { index: 3, len: 1, .. })
    ));
}

#[test]
fn test_assign_conflict_ask_writes_nothing() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "redo", 0);

    let outcome = controller.assign(&slot, "ctrl + X", ConflictPolicy::Ask).unwrap();
    assert_eq!(outcome, Assignment::Conflicts(vec![CommandRef::new("Edit", "cut")]));
    assert_eq!(controller.slot_text(&slot), Some(String::new()));
    assert!(!controller.is_modified());
}

#[test]
fn test_assign_conflict_strip_others() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "redo", 0);

    let outcome = controller.assign(&slot, "ctrl + X", ConflictPolicy::StripOthers).unwrap();
    assert_eq!(
        outcome,
        Assignment::Assigned {
            shortcut: "ctrl + X".to_string(),
            stripped: vec![CommandRef::new("Edit", "cut")],
        }
    );

    assert_eq!(controller.slot_text(&SlotRef::new("Edit", "cut", 0)), Some(String::new()));
    assert_eq!(controller.conflict_count(), 0);
}

#[test]
fn test_assign_conflict_keep() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "redo", 0);

    controller.assign(&slot, "ctrl + X", ConflictPolicy::Keep).unwrap();

    assert_eq!(controller.conflict_count(), 1);
    assert_eq!(controller.conflicts_with(&slot), vec![CommandRef::new("Edit", "cut")]);
    assert_eq!(
        controller.conflicts_with(&SlotRef::new("Edit", "cut", 0)),
        vec![CommandRef::new("General", "redo")]
    );
}

#[test]
fn test_assign_empty_text_deletes() {
    let controller = create_test_controller();

    let outcome = controller
        .assign(&SlotRef::new("General", "undo", 0), "  ", ConflictPolicy::Ask)
        .unwrap();
    assert_eq!(outcome, Assignment::Deleted);

    let manifest = controller.manifest();
    assert_eq!(manifest.command("General", "undo").unwrap().slots(), &["'u'".to_string()]);
}

#[test]
fn test_delete_last_slot_clears() {
    let controller = create_test_controller();
    let slot = SlotRef::new("General", "save", 0);

    controller.delete(&slot).unwrap();
    assert_eq!(controller.slot_text(&slot), Some(String::new()));
}

#[test]
fn test_add_slot() {
    let controller = create_test_controller();
    let command = CommandRef::new("General", "save");

    let slot = controller.add_slot(&command).unwrap();
    assert_eq!(slot, SlotRef::new("General", "save", 1));
    assert_eq!(controller.slot_text(&slot), Some(String::new()));
    assert!(controller.is_modified());
}

#[test]
fn test_actions_for() {
    let controller = create_test_controller();

    // Filled slot, no empty sibling
    assert_eq!(
        controller.actions_for(&SlotRef::new("General", "save", 0)),
        SlotActions {
            can_edit: true,
            can_add: true,
            can_delete: true,
        }
    );

    // Lone empty slot
    assert_eq!(
        controller.actions_for(&SlotRef::new("General", "redo", 0)),
        SlotActions {
            can_edit: true,
            can_add: false,
            can_delete: false,
        }
    );

    // Empty slot next to a filled one
    let slot = controller.add_slot(&CommandRef::new("General", "save")).unwrap();
    assert_eq!(
        controller.actions_for(&slot),
        SlotActions {
            can_edit: true,
            can_add: false,
            can_delete: true,
        }
    );
    assert!(!controller.actions_for(&SlotRef::new("General", "save", 0)).can_add);

    // Missing slot
    assert_eq!(
        controller.actions_for(&SlotRef::new("General", "save", 9)),
        SlotActions::default()
    );
}

#[test]
fn test_rows_mark_conflicts() {
    let controller = create_test_controller();
    controller
        .assign(&SlotRef::new("General", "redo", 0), "ctrl + C", ConflictPolicy::Keep)
        .unwrap();

    let rows = controller.rows("General");
    assert_eq!(rows.len(), 4);

    let flags: Vec<(&str, bool, bool)> = rows
        .iter()
        .map(|r| (r.shortcut.as_str(), r.first_of_command, r.conflicting))
        .collect();
    assert_eq!(
        flags,
        vec![
            ("ctrl + Z", true, false),
            ("'u'", false, false),
            ("ctrl + C", true, true),
            ("ctrl + S", true, false),
        ]
    );

    assert!(controller.rows("Missing").is_empty());
}

#[test]
fn test_capture_uses_current_mode() {
    let controller = Controller::new();
    let event = KeyEvent::new(RawKey::Digit(1), ModifierFlags::SHIFT).with_text("!");

    assert_eq!(controller.mode(), CaptureMode::Normal);
    assert_eq!(controller.capture(&event), Some("shift + NUM_1".to_string()));

    assert_eq!(controller.toggle_mode(), CaptureMode::Character);
    assert_eq!(controller.capture(&event), Some("'!'".to_string()));
}

#[test]
fn test_export_and_mark_saved() {
    let controller = create_test_controller();
    controller
        .assign(&SlotRef::new("General", "redo", 0), "ctrl + Y", ConflictPolicy::Ask)
        .unwrap();

    let text = controller.export_text();
    assert!(text.starts_with("--- General ---\nundo: ctrl + Z\nundo: 'u'\nredo: ctrl + Y\n"));
    assert!(text.ends_with("paste: ctrl + V"));

    assert!(controller.is_modified());
    controller.mark_saved();
    assert!(!controller.is_modified());
}
