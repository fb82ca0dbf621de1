//! Cached shortcut conflict detection
//!
//! A conflict is one canonical shortcut text bound to two or more distinct
//! commands. The index groups the repository's flat shortcut list by text in
//! a single pass and caches the groups that conflict.
//!
//! # Cache discipline
//! The index holds no reference to the repository. After any mutation that
//! changes slot contents the caller must call [`ConflictIndex::invalidate`]
//! before querying again; answers from a stale cache are unspecified.
//! Queries rebuild lazily when the cache is invalid.
//!
//! # Performance
//! - Rebuild: O(n) where n = number of non-empty slots
//! - Query on a valid cache: O(1) average case
//!
//! Manifests hold hundreds of shortcuts, so a full rebuild on demand is
//! preferred over per-text reference counting.

use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::core::repository::ShortcutRepository;
use crate::core::types::CommandRef;

/// Derived view: which shortcut texts are bound to several commands.
#[derive(Debug, Default)]
pub struct ConflictIndex {
    /// Conflicting text → distinct owners (always 2 or more)
    groups: HashMap<String, BTreeSet<CommandRef>>,
    valid: bool,
}

/// One conflicting shortcut and every command bound to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conflict {
    pub shortcut: String,
    pub owners: BTreeSet<CommandRef>,
}

impl ConflictIndex {
    /// Creates an empty, invalid index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Regroups every non-empty slot of `repository` and marks the cache valid.
    pub fn rebuild(&mut self, repository: &ShortcutRepository) {
        let mut owners_by_text: HashMap<String, BTreeSet<CommandRef>> = HashMap::new();

        for flat in repository.flat_shortcuts() {
            owners_by_text.entry(flat.text).or_default().insert(flat.owner);
        }

        owners_by_text.retain(|_, owners| owners.len() > 1);
        debug!(conflicts = owners_by_text.len(), "rebuilt conflict index");

        self.groups = owners_by_text;
        self.valid = true;
    }

    /// Drops the cache; the next query rebuilds.
    pub fn invalidate(&mut self) {
        self.groups.clear();
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn ensure_valid(&mut self, repository: &ShortcutRepository) {
        if !self.valid {
            self.rebuild(repository);
        }
    }

    /// Commands bound to `text` as part of a conflict, minus `exclude`.
    pub fn conflicts_for(
        &mut self,
        repository: &ShortcutRepository,
        text: &str,
        exclude: Option<&CommandRef>,
    ) -> BTreeSet<CommandRef> {
        self.ensure_valid(repository);

        self.groups
            .get(text)
            .map(|owners| {
                owners
                    .iter()
                    .filter(|owner| Some(*owner) != exclude)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True if `conflicts_for` would return anything.
    pub fn has_conflict(
        &mut self,
        repository: &ShortcutRepository,
        text: &str,
        exclude: Option<&CommandRef>,
    ) -> bool {
        !self.conflicts_for(repository, text, exclude).is_empty()
    }

    /// Every shortcut text currently in conflict
    pub fn all_conflicting_texts(&mut self, repository: &ShortcutRepository) -> BTreeSet<String> {
        self.ensure_valid(repository);
        self.groups.keys().cloned().collect()
    }

    /// All conflicts, sorted by shortcut text.
    pub fn conflict_groups(&mut self, repository: &ShortcutRepository) -> Vec<Conflict> {
        self.ensure_valid(repository);

        let mut conflicts: Vec<Conflict> = self
            .groups
            .iter()
            .map(|(shortcut, owners)| Conflict {
                shortcut: shortcut.clone(),
                owners: owners.clone(),
            })
            .collect();
        conflicts.sort_by(|a, b| a.shortcut.cmp(&b.shortcut));

        conflicts
    }
}
