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

//! src/core/grammar.rs
//!
//! Shortcut token grammar and canonicaliser
//!
//! A shortcut token is a `+`-delimited list of segments. Every segment but
//! the last is a modifier (`ctrl`, `shift`, `alt`, any case); the last is the
//! key, either a name from the vocabulary (`F5`, `PAGE_UP`, bare digits
//! alias to `NUM_n`) or a single quoted character (`'x'`).
//!
//! A `+` inside a quoted literal is not a delimiter, so `alt + '+'` is two
//! segments. The splitter is a two-state machine, see [`tokenize`].
//!
//! # Canonical form
//! Modifiers are emitted in `ctrl, shift, alt` order joined by `" + "`,
//! followed by the key. Parsing canonical text yields the same value again.

use std::str::FromStr;
use thiserror::Error;

use crate::core::keys::{symbol_alias, NamedKey};
use crate::core::types::{CanonicalShortcut, Modifier, ShortcutKey};

/// Errors produced by the shortcut grammar
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ShortcutError {
    #[error("Invalid shortcut syntax '{token}': {issue}")]
    InvalidShortcutSyntax { token: String, issue: SyntaxIssue },
}

impl ShortcutError {
    /// The raw token that failed to parse
    pub fn token(&self) -> &str {
        match self {
            ShortcutError::InvalidShortcutSyntax { token, .. } => token,
        }
    }

    pub fn issue(&self) -> &SyntaxIssue {
        match self {
            ShortcutError::InvalidShortcutSyntax { issue, .. } => issue,
        }
    }
}

/// Which grammar rule a token broke
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SyntaxIssue {
    #[error("empty segment")]
    EmptySegment,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("modifier '{0}' given twice")]
    DuplicateModifier(Modifier),

    #[error("a modifier cannot be used as the key")]
    ModifierAsKey,

    #[error("stray quote in key '{0}'")]
    StrayQuote(String),

    #[error("unknown key name '{0}'")]
    UnknownKey(String),

    #[error("literal '{0}' must be exactly one character")]
    LiteralNotSingleChar(String),

    #[error("literal character {0:?} is not printable")]
    UnprintableLiteral(char),

    #[error("a quoted literal only combines with alt")]
    LiteralWithCtrlOrShift,
}

/// Quote tracking state for the segment splitter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum QuoteState {
    Outside,
    Inside,
}

impl QuoteState {
    fn toggled(self) -> Self {
        match self {
            QuoteState::Outside => QuoteState::Inside,
            QuoteState::Inside => QuoteState::Outside,
        }
    }
}

/// Splits a token on `+`, ignoring any `+` between single quotes.
///
/// Segments are returned untrimmed and quotes are kept; there is always at
/// least one segment. An unterminated quote swallows the rest of the token.
pub fn tokenize(token: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut state = QuoteState::Outside;
    let mut start = 0;

    for (pos, c) in token.char_indices() {
        match (state, c) {
            (_, '\'') => state = state.toggled(),
            (QuoteState::Outside, '+') => {
                segments.push(&token[start..pos]);
                start = pos + c.len_utf8();
            }
            _ => {}
        }
    }
    segments.push(&token[start..]);

    segments
}

/// Parses one raw shortcut token into its canonical value.
///
/// # Example
/// ```
/// use hotkey_remapper::core::grammar::parse_shortcut;
///
/// let shortcut = parse_shortcut("Alt + CTRL + F5").unwrap();
/// assert_eq!(shortcut.to_string(), "ctrl + alt + F5");
/// ```
pub fn parse_shortcut(token: &str) -> Result<CanonicalShortcut, ShortcutError> {
    let invalid = |issue| ShortcutError::InvalidShortcutSyntax {
        token: token.to_string(),
        issue,
    };

    let segments: Vec<&str> = tokenize(token).into_iter().map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid(SyntaxIssue::EmptySegment));
    }

    let (key_segment, modifier_segments) = match segments.split_last() {
        Some(split) => split,
        None => return Err(invalid(SyntaxIssue::EmptySegment)),
    };

    let mut modifiers = Vec::with_capacity(modifier_segments.len());
    for segment in modifier_segments {
        let modifier = Modifier::from_str(segment)
            .map_err(|_| invalid(SyntaxIssue::UnknownModifier(segment.to_string())))?;
        if modifiers.contains(&modifier) {
            return Err(invalid(SyntaxIssue::DuplicateModifier(modifier)));
        }
        modifiers.push(modifier);
    }

    match parse_key_segment(key_segment).map_err(invalid)? {
        ShortcutKey::Named(key) => Ok(CanonicalShortcut::named(modifiers, key)),
        ShortcutKey::Literal(c) => {
            if modifiers.iter().any(|m| *m != Modifier::Alt) {
                return Err(invalid(SyntaxIssue::LiteralWithCtrlOrShift));
            }
            Ok(CanonicalShortcut::literal(c, !modifiers.is_empty()))
        }
    }
}

/// Parses the trimmed key segment (the last one).
fn parse_key_segment(segment: &str) -> Result<ShortcutKey, SyntaxIssue> {
    if let Some(body) = quoted_body(segment) {
        return parse_literal_body(body).map(ShortcutKey::Literal);
    }

    if let Some(key) = NamedKey::from_digit_alias(segment) {
        return Ok(ShortcutKey::Named(key));
    }

    if Modifier::from_str(segment).is_ok() {
        return Err(SyntaxIssue::ModifierAsKey);
    }

    if segment.contains('\'') || segment.contains('"') {
        return Err(SyntaxIssue::StrayQuote(segment.to_string()));
    }

    NamedKey::from_name(segment)
        .map(ShortcutKey::Named)
        .ok_or_else(|| SyntaxIssue::UnknownKey(segment.to_string()))
}

/// Body of `'...'`, if the segment is quoted at both ends.
fn quoted_body(segment: &str) -> Option<&str> {
    if segment.len() >= 2 && segment.starts_with('\'') && segment.ends_with('\'') {
        Some(&segment[1..segment.len() - 1])
    } else {
        None
    }
}

/// A literal body is one character, or a key name standing for its glyph
/// (`'NUM_5'` is `'5'`, `'SPACE'` is `' '`).
fn parse_literal_body(body: &str) -> Result<char, SyntaxIssue> {
    let c = match symbol_alias(body) {
        Some(c) => c,
        None => {
            let mut chars = body.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(SyntaxIssue::LiteralNotSingleChar(body.to_string())),
            }
        }
    };

    if c.is_control() {
        return Err(SyntaxIssue::UnprintableLiteral(c));
    }

    Ok(c)
}

/// Parses `token` and returns its canonical text.
pub fn canonicalize(token: &str) -> Result<String, ShortcutError> {
    parse_shortcut(token).map(|shortcut| shortcut.to_string())
}

/// True if `token` is a valid shortcut.
pub fn is_valid_shortcut(token: &str) -> bool {
    parse_shortcut(token).is_ok()
}

impl FromStr for CanonicalShortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_shortcut(s)
    }
}
