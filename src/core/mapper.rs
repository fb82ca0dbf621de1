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

//! src/core/mapper.rs
//!
//! Key-event to canonical shortcut mapping
//!
//! Turns one already-captured key press into a [`CanonicalShortcut`]. There
//! are two capture modes:
//! - **Normal**: physical key plus ctrl/shift/alt, e.g. `ctrl + shift + A`
//! - **Character**: the typed character as a literal, e.g. `'!'`, with at
//!   most `alt` attached
//!
//! The mapper is a pure function of the event and the mode passed in; it
//! keeps no state between calls.

use bitflags::bitflags;
use strum::Display;

use crate::core::keys::NamedKey;
use crate::core::types::{CanonicalShortcut, Modifier};

bitflags! {
    /// Modifier state reported with a key press
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct ModifierFlags: u8 {
        const CTRL = 1 << 0;
        const SHIFT = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Physical key reported by the windowing toolkit
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RawKey {
    /// Letter key, either case
    Letter(char),
    /// Top-row (or keypad) digit 0-9
    Digit(u8),
    /// Function key F1-F24
    Function(u8),
    Up,
    Down,
    Left,
    Right,
    Escape,
    Tab,
    Backspace,
    /// Main enter key
    Return,
    /// Keypad enter key
    Enter,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    Print,
    QuoteLeft,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,
    Plus,
    Asterisk,
    At,
    NumberSign,
    Colon,
    ParenLeft,
    ParenRight,
    Control,
    Shift,
    Alt,
    AltGr,
    Meta,
    CapsLock,
    NumLock,
    ScrollLock,
    /// Any key without an entry in the table; carries the toolkit's code
    Other(u32),
}

impl RawKey {
    /// Modifier and lock keys never produce a shortcut on their own.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            RawKey::Control
                | RawKey::Shift
                | RawKey::Alt
                | RawKey::AltGr
                | RawKey::Meta
                | RawKey::CapsLock
                | RawKey::NumLock
                | RawKey::ScrollLock
        )
    }
}

/// One captured key press
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: RawKey,
    pub modifiers: ModifierFlags,
    /// Text the press produced, if any
    pub text: String,
    /// The press came from the numeric keypad
    pub keypad: bool,
}

impl Default for RawKey {
    fn default() -> Self {
        RawKey::Other(0)
    }
}

impl KeyEvent {
    pub fn new(key: RawKey, modifiers: ModifierFlags) -> Self {
        Self {
            key,
            modifiers,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn from_keypad(mut self) -> Self {
        self.keypad = true;
        self
    }
}

/// How a key press is turned into a shortcut
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum CaptureMode {
    /// Named key plus modifiers
    #[default]
    Normal,
    /// Typed character as a quoted literal
    Character,
}

impl CaptureMode {
    pub fn toggled(self) -> Self {
        match self {
            CaptureMode::Normal => CaptureMode::Character,
            CaptureMode::Character => CaptureMode::Normal,
        }
    }
}

/// Keypad-only names; other keypad keys share the main table.
fn keypad_key(key: RawKey) -> Option<NamedKey> {
    match key {
        RawKey::Digit(d) => NamedKey::keypad_digit(d),
        RawKey::Minus => Some(NamedKey::NumpadMinus),
        RawKey::Plus => Some(NamedKey::NumpadPlus),
        RawKey::Asterisk => Some(NamedKey::NumpadMultiply),
        RawKey::Slash => Some(NamedKey::NumpadDivide),
        RawKey::Period => Some(NamedKey::NumpadDot),
        RawKey::Equal => Some(NamedKey::NumpadEquals),
        RawKey::ParenLeft => Some(NamedKey::NumpadLeftParen),
        RawKey::ParenRight => Some(NamedKey::NumpadRightParen),
        _ => None,
    }
}

/// Hardware key table
pub fn named_key(key: RawKey, keypad: bool) -> Option<NamedKey> {
    if keypad {
        if let Some(named) = keypad_key(key) {
            return Some(named);
        }
    }

    let named = match key {
        RawKey::Letter(c) => return NamedKey::letter(c),
        RawKey::Digit(d) => return NamedKey::digit(d),
        RawKey::Function(n) => return NamedKey::function(n),
        RawKey::Up => NamedKey::Up,
        RawKey::Down => NamedKey::Down,
        RawKey::Left => NamedKey::Left,
        RawKey::Right => NamedKey::Right,
        RawKey::Escape => NamedKey::Escape,
        RawKey::Tab => NamedKey::Tab,
        RawKey::Backspace => NamedKey::Backspace,
        RawKey::Return => NamedKey::Enter,
        RawKey::Enter => NamedKey::NumpadEnter,
        RawKey::Insert => NamedKey::Insert,
        RawKey::Delete => NamedKey::Delete,
        RawKey::Home => NamedKey::Home,
        RawKey::End => NamedKey::End,
        RawKey::PageUp => NamedKey::PageUp,
        RawKey::PageDown => NamedKey::PageDown,
        RawKey::Space => NamedKey::Space,
        RawKey::Print => NamedKey::PrintScreen,
        RawKey::ScrollLock => NamedKey::ScrollLock,
        RawKey::NumLock => NamedKey::NumLock,
        RawKey::QuoteLeft => NamedKey::Grave,
        RawKey::Minus => NamedKey::Minus,
        RawKey::Equal => NamedKey::Equals,
        RawKey::BracketLeft => NamedKey::LeftBracket,
        RawKey::BracketRight => NamedKey::RightBracket,
        RawKey::Backslash => NamedKey::Backslash,
        RawKey::Semicolon => NamedKey::Semicolon,
        RawKey::Apostrophe => NamedKey::Apostrophe,
        RawKey::Comma => NamedKey::Comma,
        RawKey::Period => NamedKey::Period,
        RawKey::Slash => NamedKey::Slash,
        RawKey::Plus => NamedKey::Plus,
        RawKey::Asterisk => NamedKey::Star,
        RawKey::At => NamedKey::At,
        RawKey::NumberSign => NamedKey::Pound,
        RawKey::Colon => NamedKey::Colon,
        RawKey::ParenLeft
        | RawKey::ParenRight
        | RawKey::Control
        | RawKey::Shift
        | RawKey::Alt
        | RawKey::AltGr
        | RawKey::Meta
        | RawKey::CapsLock
        | RawKey::Other(_) => return None,
    };

    Some(named)
}

/// The single printable character of `text`, if that is all it holds.
fn single_printable(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Some(c),
        _ => None,
    }
}

/// Maps one key press to a shortcut in the given mode.
///
/// Returns `None` for modifier-only presses and for keys the mode cannot
/// express.
///
/// # Example
/// ```
/// use hotkey_remapper::core::mapper::{map_event, CaptureMode, KeyEvent, ModifierFlags, RawKey};
///
/// let event = KeyEvent::new(RawKey::Letter('A'), ModifierFlags::CTRL);
/// let shortcut = map_event(&event, CaptureMode::Normal).unwrap();
/// assert_eq!(shortcut.to_string(), "ctrl + A");
/// ```
pub fn map_event(event: &KeyEvent, mode: CaptureMode) -> Option<CanonicalShortcut> {
    if event.key.is_modifier() {
        return None;
    }

    match mode {
        CaptureMode::Normal => map_normal(event),
        CaptureMode::Character => map_character(event),
    }
}

fn map_normal(event: &KeyEvent) -> Option<CanonicalShortcut> {
    let key = named_key(event.key, event.keypad).or_else(|| {
        let upper = single_printable(&event.text.to_uppercase())?;
        if upper.is_alphabetic() {
            NamedKey::from_name(&upper.to_string())
        } else {
            None
        }
    })?;

    let flags = event.modifiers;
    let modifiers = [
        (ModifierFlags::CTRL, Modifier::Ctrl),
        (ModifierFlags::SHIFT, Modifier::Shift),
        (ModifierFlags::ALT, Modifier::Alt),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .map(|(_, modifier)| modifier);

    Some(CanonicalShortcut::named(modifiers, key))
}

fn map_character(event: &KeyEvent) -> Option<CanonicalShortcut> {
    if event.keypad {
        return None;
    }

    let key = named_key(event.key, false);
    if key.is_some_and(NamedKey::is_numpad) {
        return None;
    }

    let shift = event.modifiers.contains(ModifierFlags::SHIFT);
    let c = single_printable(&event.text).or_else(|| {
        let key = key?;
        if shift {
            if let Some(c) = key.shifted_symbol() {
                return Some(c);
            }
        }
        if let Some(c) = key.symbol() {
            return Some(c);
        }
        let mut name = key.name().chars();
        match (name.next(), name.next()) {
            (Some(c), None) if shift => Some(c.to_ascii_uppercase()),
            (Some(c), None) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    })?;

    Some(CanonicalShortcut::literal(
        c,
        event.modifiers.contains(ModifierFlags::ALT),
    ))
}
