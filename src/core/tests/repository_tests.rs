//! Repository tests
//!
//! Tests for slot-level mutations, lookup failures and the modified flag.

use crate::core::repository::{FlatShortcut, RepositoryError, ShortcutRepository};
use crate::core::types::{Category, Command, CommandRef, Manifest};

fn sample() -> ShortcutRepository {
    ShortcutRepository::from_manifest(Manifest::new(vec![
        Category::new("General")
            .with_command(Command::with_slots("undo", ["ctrl + Z", "'u'"]))
            .with_command(Command::new("redo")),
        Category::new("Edit").with_command(Command::with_slots("cut", ["ctrl + X"])),
    ]))
}

#[test]
fn test_fresh_repository_is_unmodified() {
    let repo = sample();
    assert!(!repo.is_modified());
    assert_eq!(repo.categories(), vec!["General", "Edit"]);
    assert_eq!(repo.commands_of("General").unwrap().len(), 2);
    assert!(repo.commands_of("Missing").is_none());
}

#[test]
fn test_set_slot() {
    let mut repo = sample();
    repo.set_slot("General", "redo", 0, "ctrl + Y").unwrap();

    assert_eq!(repo.command("General", "redo").unwrap().slot(0), Some("ctrl + Y"));
    assert!(repo.is_modified());
}

#[test]
fn test_set_slot_lookup_failures() {
    let mut repo = sample();

    assert_eq!(
        repo.set_slot("Nope", "undo", 0, "F1"),
        Err(RepositoryError::CategoryNotFound("Nope".to_string()))
    );
    assert_eq!(
        repo.set_slot("General", "nope", 0, "F1"),
        Err(RepositoryError::CommandNotFound(CommandRef::new("General", "nope")))
    );
    assert_eq!(
        repo.set_slot("General", "undo", 2, "F1"),
        Err(RepositoryError::IndexOutOfRange {
            command: CommandRef::new("General", "undo"),
            index: 2,
            len: 2,
        })
    );

    // Failed mutations leave everything untouched
    assert!(!repo.is_modified());
    assert_eq!(repo.command("General", "undo").unwrap().slots().len(), 2);
}

#[test]
fn test_append_empty_slot_adds_exactly_one() {
    let mut repo = sample();
    let before = repo.command("General", "undo").unwrap().slots().len();

    let index = repo.append_empty_slot("General", "undo").unwrap();

    let undo = repo.command("General", "undo").unwrap();
    assert_eq!(undo.slots().len(), before + 1);
    assert_eq!(index, before);
    assert_eq!(undo.slot(index), Some(""));
}

#[test]
fn test_remove_last_slot_clears_it() {
    let mut repo = sample();
    repo.remove_slot_at("Edit", "cut", 0).unwrap();

    let cut = repo.command("Edit", "cut").unwrap();
    assert_eq!(cut.slots(), &[String::new()]);
}

#[test]
fn test_remove_slot_with_siblings() {
    let mut repo = sample();
    repo.remove_slot_at("General", "undo", 0).unwrap();

    assert_eq!(repo.command("General", "undo").unwrap().slots(), &["'u'".to_string()]);
    assert!(matches!(
        repo.remove_slot_at("General", "undo", 5),
        Err(RepositoryError::IndexOutOfRange { index: 5, len: 1, .. })
    ));
}

#[test]
fn test_replace_existing_value() {
    let mut repo = sample();
    assert!(repo.replace_shortcut_everywhere("General", "undo", "'u'", "alt + 'u'"));

    let undo = repo.command("General", "undo").unwrap();
    assert_eq!(undo.slots(), &["ctrl + Z".to_string(), "alt + 'u'".to_string()]);
}

#[test]
fn test_replace_empty_fills_empty_slot() {
    let mut repo = sample();
    assert!(repo.replace_shortcut_everywhere("General", "redo", "", "ctrl + Y"));
    assert_eq!(repo.command("General", "redo").unwrap().slots(), &["ctrl + Y".to_string()]);
}

#[test]
fn test_replace_empty_appends_when_no_empty_slot() {
    let mut repo = sample();
    assert!(repo.replace_shortcut_everywhere("Edit", "cut", "", "shift + DELETE"));
    assert_eq!(
        repo.command("Edit", "cut").unwrap().slots(),
        &["ctrl + X".to_string(), "shift + DELETE".to_string()]
    );
}

#[test]
fn test_replace_missing_value_fails() {
    let mut repo = sample();
    assert!(!repo.replace_shortcut_everywhere("Edit", "cut", "F9", "F10"));
    assert!(!repo.replace_shortcut_everywhere("Edit", "nope", "", "F10"));
    assert!(!repo.is_modified());
}

#[test]
fn test_remove_shortcut_value() {
    let mut repo = sample();

    assert!(repo.remove_shortcut_value("General", "undo", "ctrl + Z"));
    assert_eq!(repo.command("General", "undo").unwrap().slots(), &["'u'".to_string()]);

    assert!(repo.remove_shortcut_value("Edit", "cut", "ctrl + X"));
    assert_eq!(repo.command("Edit", "cut").unwrap().slots(), &[String::new()]);

    assert!(!repo.remove_shortcut_value("Edit", "cut", ""));
    assert!(!repo.remove_shortcut_value("Edit", "cut", "F1"));
}

#[test]
fn test_flat_shortcuts_skip_empty_slots() {
    let repo = sample();
    let flat = repo.flat_shortcuts();

    assert_eq!(flat.len(), 3);
    assert_eq!(
        flat[1],
        FlatShortcut {
            owner: CommandRef::new("General", "undo"),
            text: "'u'".to_string(),
            index: 1,
        }
    );
    assert_eq!(repo.shortcut_count(), 3);
}

#[test]
fn test_owners_of_reads_live_state() {
    let mut repo = sample();
    assert!(repo.owners_of("ctrl + X").iter().all(|f| f.owner.is("Edit", "cut")));

    repo.set_slot("General", "redo", 0, "ctrl + X").unwrap();
    let owners: Vec<CommandRef> = repo.owners_of("ctrl + X").into_iter().map(|f| f.owner).collect();
    assert_eq!(
        owners,
        vec![CommandRef::new("General", "redo"), CommandRef::new("Edit", "cut")]
    );

    assert!(repo.owners_of("").is_empty());
}

#[test]
fn test_adopt_replaces_content_and_clears_flag() {
    let mut repo = sample();
    repo.set_slot("General", "redo", 0, "F1").unwrap();
    assert!(repo.is_modified());

    repo.adopt(Manifest::new(vec![Category::new("Only")]));
    assert!(!repo.is_modified());
    assert_eq!(repo.categories(), vec!["Only"]);
    assert_eq!(repo.shortcut_count(), 0);
}

#[test]
fn test_clear_modified() {
    let mut repo = sample();
    repo.append_empty_slot("General", "redo").unwrap();
    repo.clear_modified();
    assert!(!repo.is_modified());

    let manifest = repo.into_manifest();
    assert_eq!(manifest.command("General", "redo").unwrap().slots().len(), 2);
}
