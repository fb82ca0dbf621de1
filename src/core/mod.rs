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

//! src/core/mod.rs
//!
//! Core hotkey logic
//!
//! This module contains the data model and algorithms of the editor:
//! - Key vocabulary and manifest types
//! - Shortcut grammar and canonical form
//! - Manifest text codec (decode, normalise, encode)
//! - In-memory repository with slot operations
//! - Cached conflict detection
//! - Key-event to shortcut mapping
//!
//! Nothing in here touches the filesystem or a display server, so all of it
//! is unit tested directly.

pub mod codec;
pub mod conflict;
pub mod grammar;
pub mod keys;
pub mod mapper;
pub mod repository;
pub mod types;

pub use codec::{decode, encode, import_manifest, normalize_shortcuts, CodecError, Diagnostic};
pub use conflict::{Conflict, ConflictIndex};
pub use grammar::{canonicalize, is_valid_shortcut, parse_shortcut, ShortcutError, SyntaxIssue};
pub use keys::NamedKey;
pub use mapper::{map_event, CaptureMode, KeyEvent, ModifierFlags, RawKey};
pub use repository::{FlatShortcut, RepositoryError, ShortcutRepository};
pub use types::*;

#[cfg(test)]
mod tests;
