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

//! src/core/codec.rs
//!
//! Manifest text codec
//!
//! Converts the line-oriented manifest format into a [`Manifest`] and back:
//!
//! ```text
//! --- General ---
//! undo: ctrl + Z
//! undo: 'u'
//! redo:
//!
//! --- Edit ---
//! refresh: F5
//! ```
//!
//! # Pipeline
//! 1. `decode`: group lines into categories and commands, raw text kept
//! 2. `normalize_shortcuts`: run the grammar on every slot, drop what fails
//! 3. `encode`: emit canonical text again
//!
//! `import_manifest` runs the header check plus steps 1 and 2. Nothing here
//! touches the filesystem.

use nom::{
    bytes::complete::{tag, take_until},
    character::complete::char,
    combinator::rest,
    sequence::{preceded, separated_pair},
    IResult, Parser,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::grammar::{canonicalize, ShortcutError};
use crate::core::types::{Category, Command, CommandRef, Manifest};

/// First content line every importable manifest starts with
pub const MANIFEST_HEADER: &str = "--- General ---";

/// Codec errors
#[derive(Debug, Error, Eq, PartialEq)]
pub enum CodecError {
    #[error("Not a hotkey manifest: first line must be '{MANIFEST_HEADER}', found {found:?}")]
    NotAHotkeyManifest { found: Option<String> },
}

/// A shortcut dropped during normalisation, with its owner
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub command: CommandRef,
    pub error: ShortcutError,
}

/// Matches `--- <name> ---` and returns the trimmed name.
pub fn parse_header_line(line: &str) -> Option<&str> {
    let parsed: IResult<&str, &str> = preceded(tag("---"), rest).parse(line);
    let (_, inner) = parsed.ok()?;
    let name = inner.strip_suffix("---")?.trim();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Matches `<commandId>: <shortcut>`, splitting on the first colon.
pub fn parse_entry_line(line: &str) -> IResult<&str, (&str, &str)> {
    let (input, (command_id, shortcut)) =
        separated_pair(take_until(":"), char(':'), rest).parse(line)?;

    Ok((input, (command_id.trim(), shortcut.trim())))
}

/// Key used to detect repeated shortcuts while decoding: canonical text
/// when the token parses, the raw text otherwise.
fn dedup_key(raw: &str) -> String {
    canonicalize(raw).unwrap_or_else(|_| raw.to_string())
}

/// Appends a raw shortcut to a command unless an equivalent one is present.
fn push_raw_unique(command: &mut Command, raw: &str) {
    let key = dedup_key(raw);
    if command.values().any(|existing| dedup_key(existing) == key) {
        debug!(command = command.id(), shortcut = raw, "dropping repeated shortcut");
        return;
    }

    if command.is_unassigned() {
        command.slots = vec![raw.to_string()];
    } else {
        command.slots.push(raw.to_string());
    }
}

/// Decodes manifest text into a manifest with raw (unvalidated) shortcuts.
///
/// A leading byte-order mark is skipped. Lines before the first header are
/// ignored, as are non-blank lines without a colon. A header naming a
/// category already seen reopens it.
pub fn decode(text: &str) -> Manifest {
    let mut manifest = Manifest::default();
    let mut current: Option<usize> = None;

    for line in text.trim_start_matches('\u{feff}').lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = parse_header_line(line) {
            let index = match manifest.categories.iter().position(|c| c.id == name) {
                Some(index) => index,
                None => {
                    manifest.categories.push(Category::new(name));
                    manifest.categories.len() - 1
                }
            };
            current = Some(index);
            continue;
        }

        let Some(index) = current else {
            continue;
        };

        let Ok((_, (command_id, raw))) = parse_entry_line(line) else {
            continue;
        };

        if command_id.is_empty() {
            debug!(line, "skipping entry without a command id");
            continue;
        }

        let category = &mut manifest.categories[index];
        match category.command_mut(command_id) {
            Some(command) => {
                if !raw.is_empty() {
                    push_raw_unique(command, raw);
                }
            }
            None => {
                let command = if raw.is_empty() {
                    Command::new(command_id)
                } else {
                    Command::with_slots(command_id, [raw])
                };
                category.push(command);
            }
        }
    }

    manifest
}

/// Canonicalises every slot, silently dropping tokens that fail the grammar.
pub fn normalize_shortcuts(manifest: Manifest) -> Manifest {
    normalize_shortcuts_with_diagnostics(manifest).0
}

/// Canonicalises every slot and reports each dropped token.
///
/// Per command the surviving canonical strings are deduplicated in
/// first-seen order; a command left without shortcuts gets one empty slot.
pub fn normalize_shortcuts_with_diagnostics(mut manifest: Manifest) -> (Manifest, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    for category in &mut manifest.categories {
        for command in &mut category.commands {
            let mut canonical: Vec<String> = Vec::with_capacity(command.slots.len());

            for raw in command.values() {
                match canonicalize(raw) {
                    Ok(text) => {
                        if !canonical.contains(&text) {
                            canonical.push(text);
                        }
                    }
                    Err(error) => {
                        debug!(category = %category.id, command = command.id(), %error, "dropping shortcut");
                        diagnostics.push(Diagnostic {
                            command: CommandRef::new(category.id.clone(), command.id.clone()),
                            error,
                        });
                    }
                }
            }

            command.slots = canonical;
            command.ensure_slot();
        }
    }

    (manifest, diagnostics)
}

/// Encodes a manifest as manifest text.
///
/// One line per non-empty slot; an unassigned command still gets one
/// `<id>: ` line. Categories are separated by a single blank line and there
/// is no trailing newline.
pub fn encode(manifest: &Manifest) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (i, category) in manifest.categories().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("--- {} ---", category.id()));

        for command in category.commands() {
            let before = lines.len();
            for value in command.values() {
                lines.push(format!("{}: {}", command.id(), value));
            }
            if lines.len() == before {
                lines.push(format!("{}: ", command.id()));
            }
        }
    }

    lines.join("\n")
}

/// First non-blank line, trimmed, with any byte-order mark removed.
fn first_content_line(text: &str) -> Option<&str> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
}

/// Checks the manifest header, then decodes and normalises.
pub fn import_manifest(text: &str) -> Result<Manifest, CodecError> {
    import_manifest_with_diagnostics(text).map(|(manifest, _)| manifest)
}

/// Like [`import_manifest`], also returning the dropped tokens.
pub fn import_manifest_with_diagnostics(text: &str) -> Result<(Manifest, Vec<Diagnostic>), CodecError> {
    match first_content_line(text) {
        Some(MANIFEST_HEADER) => {}
        found => {
            return Err(CodecError::NotAHotkeyManifest {
                found: found.map(str::to_string),
            })
        }
    }

    let (manifest, diagnostics) = normalize_shortcuts_with_diagnostics(decode(text));
    info!(
        categories = manifest.categories().len(),
        commands = manifest.command_count(),
        dropped = diagnostics.len(),
        "imported manifest"
    );

    Ok((manifest, diagnostics))
}
