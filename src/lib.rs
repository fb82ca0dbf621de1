// Copyright 2025 bakri (tidynest@proton.me)
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

//! Hotkey Remapper
//!
//! Editor core for a per-application hotkey manifest: a plain-text file that
//! maps named commands, grouped into categories, to keyboard shortcuts.
//!
//! # Features
//!
//! - **Canonical Grammar:** One textual form per shortcut (`ctrl + shift + Z`, `alt + '+'`)
//! - **Lossless Codec:** Decode, normalise and re-encode manifest text
//! - **Conflict Detection:** Cached index of shortcuts bound to several commands
//! - **Key Capture:** Map raw key events to canonical shortcuts, in two modes
//! - **Automatic Backups:** Timestamped backups before every save
//! - **Atomic Operations:** Safe file writes, never a half-written manifest
//!
//! # Architecture
//!
//! - **`core`:** Business logic (keys, types, grammar, codec, repository, conflicts, mapper)
//! - **`editor`:** Edit session controller driving the core for a front-end
//! - **`config`:** File operations (acceptance checks, backups, JSON interchange, settings)
//!
//! # Examples
//!
//! ## Canonicalising a shortcut
//!
//! ```
//! use hotkey_remapper::canonicalize;
//!
//! assert_eq!(canonicalize("Shift + Ctrl + Z").unwrap(), "ctrl + shift + Z");
//! assert_eq!(canonicalize("alt + 'NUM_5'").unwrap(), "alt + '5'");
//! assert!(canonicalize("ctrl + 'a'").is_err());
//! ```
//!
//! ## Importing a manifest and detecting conflicts
//!
//! ```
//! use hotkey_remapper::{import_manifest, ConflictIndex, ShortcutRepository};
//!
//! let text = "--- General ---\nundo: ctrl + Z\n--- Edit ---\nrevert: CTRL+Z";
//! let manifest = import_manifest(text)?;
//!
//! let repository = ShortcutRepository::from_manifest(manifest);
//! let mut conflicts = ConflictIndex::new();
//!
//! let groups = conflicts.conflict_groups(&repository);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].shortcut, "ctrl + Z");
//! # Ok::<(), hotkey_remapper::CodecError>(())
//! ```
//!
//! ## Saving through the file store
//!
//! ```no_run
//! use hotkey_remapper::config::ManifestStore;
//! use std::path::PathBuf;
//!
//! let store = ManifestStore::new(PathBuf::from("/tmp/app_hotkeys.txt"))?;
//! let manifest = store.load()?;
//! let backup = store.save(&manifest)?;
//! println!("Previous content kept at {}", backup.display());
//! # Ok::<(), hotkey_remapper::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;
pub mod editor;

// Re-export commonly used types for convenience
pub use core::{
    canonicalize, import_manifest, parse_shortcut, CanonicalShortcut, CodecError, ConflictIndex, Manifest,
    Modifier, ShortcutError, ShortcutRepository,
};
