//! src/core/types.rs
//!
//! Core type definitions for shortcut manifests
//!
//! This module defines the fundamental types used throughout the application:
//! - `Modifier`: The three modifier keys a shortcut may carry (ctrl, shift, alt)
//! - `ShortcutKey`: Either a named key from the vocabulary or a quoted literal
//! - `CanonicalShortcut`: A validated, normalised modifier set plus key
//! - `Manifest` / `Category` / `Command`: The ordered hierarchy that is
//!   round-tripped to and from manifest text
//!
//! The hierarchy types serialise to the structured interchange format
//! (`[{categoryId, items: [{commandId, shortcuts}]}]`) used for storage.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum::{Display, EnumString};

use crate::core::keys::NamedKey;

/// Keyboard modifier keys
///
/// Variant order is the canonical order used when formatting shortcuts.
#[derive(
    Clone, Copy, Debug, Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Alt key
    Alt,
}

/// The non-modifier part of a shortcut
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ShortcutKey {
    /// A key from the closed vocabulary, e.g. `F5`, `PAGE_UP`
    Named(NamedKey),
    /// A single printable character, written quoted: `'x'`
    Literal(char),
}

impl fmt::Display for ShortcutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcutKey::Named(key) => write!(f, "{}", key.name()),
            ShortcutKey::Literal(c) => write!(f, "'{}'", c),
        }
    }
}

/// A validated shortcut in canonical form
///
/// Modifiers are kept sorted in `ctrl, shift, alt` order with no duplicates,
/// so two shortcuts that differ only in how they were written compare equal.
/// A literal key only ever carries `alt`: the character already encodes
/// whatever shift produced it.
///
/// `Display` produces the canonical text (`ctrl + shift + F5`, `alt + 'x'`);
/// `FromStr` runs the shortcut grammar.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CanonicalShortcut {
    modifiers: Vec<Modifier>,
    key: ShortcutKey,
}

impl CanonicalShortcut {
    /// Shortcut on a named key with any modifiers (sorted, deduplicated).
    pub fn named(modifiers: impl IntoIterator<Item = Modifier>, key: NamedKey) -> Self {
        let mut modifiers: Vec<Modifier> = modifiers.into_iter().collect();
        modifiers.sort();
        modifiers.dedup();

        Self {
            modifiers,
            key: ShortcutKey::Named(key),
        }
    }

    /// Shortcut on a literal character, optionally with `alt`.
    pub fn literal(c: char, alt: bool) -> Self {
        Self {
            modifiers: if alt { vec![Modifier::Alt] } else { Vec::new() },
            key: ShortcutKey::Literal(c),
        }
    }

    /// Modifiers in canonical order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn key(&self) -> ShortcutKey {
        self.key
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

impl fmt::Display for CanonicalShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{} + ", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Identifies one command inside a manifest.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CommandRef {
    pub category_id: String,
    pub command_id: String,
}

impl CommandRef {
    pub fn new(category_id: impl Into<String>, command_id: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            command_id: command_id.into(),
        }
    }

    /// True if this ref names `command_id` inside `category_id`.
    pub fn is(&self, category_id: &str, command_id: &str) -> bool {
        self.category_id == category_id && self.command_id == command_id
    }
}

impl fmt::Display for CommandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category_id, self.command_id)
    }
}

/// One command and its ordered shortcut slots
///
/// A command always owns at least one slot. An unassigned slot holds the
/// empty string; slot positions are significant to edit-by-index callers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Command {
    #[serde(rename = "commandId")]
    pub(crate) id: String,

    #[serde(
        rename = "shortcuts",
        default = "unassigned_slots",
        deserialize_with = "deserialize_slots"
    )]
    pub(crate) slots: Vec<String>,
}

impl Command {
    /// Creates a command with a single empty slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slots: vec![String::new()],
        }
    }

    /// Creates a command from slot values; an empty list becomes one empty slot.
    pub fn with_slots<I, S>(id: impl Into<String>, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = Self {
            id: id.into(),
            slots: slots.into_iter().map(Into::into).collect(),
        };
        command.ensure_slot();
        command
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Non-empty slot values in slot order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// True if any slot holds exactly `value`.
    pub fn contains(&self, value: &str) -> bool {
        self.slots.iter().any(|s| s == value)
    }

    /// True if every slot is empty.
    pub fn is_unassigned(&self) -> bool {
        self.slots.iter().all(String::is_empty)
    }

    pub(crate) fn ensure_slot(&mut self) {
        if self.slots.is_empty() {
            self.slots.push(String::new());
        }
    }
}

fn unassigned_slots() -> Vec<String> {
    vec![String::new()]
}

/// Structured data may carry an empty shortcut list; such commands still get a slot.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut slots = Vec::<String>::deserialize(deserializer)?;
    if slots.is_empty() {
        slots.push(String::new());
    }
    Ok(slots)
}

/// An ordered group of commands, one manifest section
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub(crate) id: String,

    #[serde(rename = "items", default)]
    pub(crate) commands: Vec<Command>,
}

impl Category {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            commands: Vec::new(),
        }
    }

    /// Builder-style helper, mostly useful in tests and fixtures
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn command(&self, command_id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == command_id)
    }

    pub(crate) fn command_mut(&mut self, command_id: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.id == command_id)
    }

    pub(crate) fn push(&mut self, command: Command) {
        self.commands.push(command);
    }
}

/// The full ordered set of categories for one hotkey configuration
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    pub(crate) categories: Vec<Category>,
}

impl Manifest {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub(crate) fn category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == category_id)
    }

    pub fn command(&self, category_id: &str, command_id: &str) -> Option<&Command> {
        self.category(category_id)?.command(command_id)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of commands across every category
    pub fn command_count(&self) -> usize {
        self.categories.iter().map(|c| c.commands.len()).sum()
    }
}
