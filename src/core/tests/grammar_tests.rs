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

//! Grammar tests
//!
//! Tests for the shortcut token grammar:
//! - Quote-aware segment splitting
//! - Modifier parsing and canonical order
//! - Named keys, digit aliases and quoted literals
//! - Every rejection rule

use crate::core::grammar::*;
use crate::core::keys::NamedKey;
use crate::core::types::{CanonicalShortcut, Modifier, ShortcutKey};

fn issue_of(token: &str) -> SyntaxIssue {
    parse_shortcut(token).unwrap_err().issue().clone()
}

#[test]
fn test_tokenize_splits_on_plus() {
    assert_eq!(tokenize("ctrl + A"), vec!["ctrl ", " A"]);
    assert_eq!(tokenize("F5"), vec!["F5"]);
    assert_eq!(tokenize(""), vec![""]);
}

#[test]
fn test_tokenize_ignores_plus_inside_quotes() {
    assert_eq!(tokenize("alt + '+'"), vec!["alt ", " '+'"]);
    assert_eq!(tokenize("'+'"), vec!["'+'"]);
}

#[test]
fn test_tokenize_unterminated_quote_swallows_rest() {
    assert_eq!(tokenize("'a + b"), vec!["'a + b"]);
}

#[test]
fn test_parse_named_key() {
    let shortcut = parse_shortcut("ctrl + Z").unwrap();
    assert_eq!(shortcut.modifiers(), &[Modifier::Ctrl]);
    assert_eq!(shortcut.key(), ShortcutKey::Named(NamedKey::Z));
    assert_eq!(shortcut.to_string(), "ctrl + Z");
}

#[test]
fn test_modifier_canonical_order() {
    let a = parse_shortcut("alt + ctrl + shift + F5").unwrap();
    let b = parse_shortcut("ctrl + shift + alt + F5").unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_string(), "ctrl + shift + alt + F5");
    assert_eq!(b.to_string(), "ctrl + shift + alt + F5");
}

#[test]
fn test_modifiers_ignore_case_and_spacing() {
    assert_eq!(canonicalize("CTRL+Shift+PAGE_UP").unwrap(), "ctrl + shift + PAGE_UP");
    assert_eq!(canonicalize("  Alt  +   F12 ").unwrap(), "alt + F12");
}

#[test]
fn test_key_names_are_case_sensitive() {
    assert_eq!(issue_of("ctrl + f5"), SyntaxIssue::UnknownKey("f5".to_string()));
    assert_eq!(issue_of("page_up"), SyntaxIssue::UnknownKey("page_up".to_string()));
}

#[test]
fn test_literal_with_ctrl_or_shift_rejected() {
    assert_eq!(issue_of("ctrl + 'x'"), SyntaxIssue::LiteralWithCtrlOrShift);
    assert_eq!(issue_of("shift + 'x'"), SyntaxIssue::LiteralWithCtrlOrShift);
    assert_eq!(issue_of("ctrl + alt + 'x'"), SyntaxIssue::LiteralWithCtrlOrShift);

    assert_eq!(canonicalize("alt + 'x'").unwrap(), "alt + 'x'");
    assert_eq!(canonicalize("'x'").unwrap(), "'x'");
}

#[test]
fn test_quoted_plus_literal() {
    let shortcut = parse_shortcut("alt + '+'").unwrap();
    assert_eq!(shortcut.key(), ShortcutKey::Literal('+'));
    assert_eq!(shortcut.to_string(), "alt + '+'");
}

#[test]
fn test_digit_aliasing() {
    // Quoted digit and its key-name alias type the same glyph
    assert_eq!(canonicalize("'5'").unwrap(), "'5'");
    assert_eq!(canonicalize("'NUM_5'").unwrap(), "'5'");
    assert_eq!(parse_shortcut("'5'").unwrap(), parse_shortcut("'NUM_5'").unwrap());

    // Bare digit is the top-row key
    assert_eq!(canonicalize("5").unwrap(), "NUM_5");
    assert_eq!(canonicalize("ctrl + 5").unwrap(), canonicalize("ctrl + NUM_5").unwrap());
}

#[test]
fn test_symbol_name_inside_quotes() {
    assert_eq!(canonicalize("'SPACE'").unwrap(), "' '");
    assert_eq!(canonicalize("alt + 'SLASH'").unwrap(), "alt + '/'");
}

#[test]
fn test_empty_segments_rejected() {
    assert_eq!(issue_of(""), SyntaxIssue::EmptySegment);
    assert_eq!(issue_of("ctrl +"), SyntaxIssue::EmptySegment);
    assert_eq!(issue_of("ctrl + + A"), SyntaxIssue::EmptySegment);
    assert_eq!(issue_of("+ A"), SyntaxIssue::EmptySegment);
}

#[test]
fn test_unknown_and_duplicate_modifiers() {
    assert_eq!(issue_of("super + A"), SyntaxIssue::UnknownModifier("super".to_string()));
    assert_eq!(issue_of("ctrl + CTRL + A"), SyntaxIssue::DuplicateModifier(Modifier::Ctrl));
}

#[test]
fn test_modifier_cannot_be_the_key() {
    assert_eq!(issue_of("ctrl + shift"), SyntaxIssue::ModifierAsKey);
    assert_eq!(issue_of("Alt"), SyntaxIssue::ModifierAsKey);
}

#[test]
fn test_stray_quotes_rejected() {
    assert_eq!(issue_of("ctrl + 'A"), SyntaxIssue::StrayQuote("'A".to_string()));
    assert_eq!(issue_of("\"A\""), SyntaxIssue::StrayQuote("\"A\"".to_string()));
}

#[test]
fn test_literal_must_be_one_printable_char() {
    assert_eq!(issue_of("'ab'"), SyntaxIssue::LiteralNotSingleChar("ab".to_string()));
    assert_eq!(issue_of("''"), SyntaxIssue::LiteralNotSingleChar(String::new()));
    assert_eq!(issue_of("'\t'"), SyntaxIssue::UnprintableLiteral('\t'));
}

#[test]
fn test_non_ascii_literal_accepted() {
    assert_eq!(canonicalize("'é'").unwrap(), "'é'");
}

#[test]
fn test_error_carries_token() {
    let err = parse_shortcut("ctrl + 'x'").unwrap_err();
    assert_eq!(err.token(), "ctrl + 'x'");
    assert!(err.to_string().contains("ctrl + 'x'"));
}

#[test]
fn test_from_str_and_validity() {
    let shortcut: CanonicalShortcut = "shift + ctrl + DELETE".parse().unwrap();
    assert_eq!(shortcut.to_string(), "ctrl + shift + DELETE");

    assert!(is_valid_shortcut("F24"));
    assert!(!is_valid_shortcut("F25"));
}
