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

//! src/core/keys.rs
//!
//! Closed key-name vocabulary and its alias tables
//!
//! Every named key a manifest may reference is a `NamedKey` variant. The
//! textual name (`"A"`, `"NUM_5"`, `"PAGE_UP"`, ...) is the exact spelling
//! used in manifests; lookups are case-sensitive.
//!
//! Three alias tables hang off the vocabulary:
//! - **symbol**: the glyph a punctuation or top-row digit key types unshifted
//! - **shifted symbol**: the glyph typed with shift held (US layout)
//! - **digit alias**: bare `"0"`..`"9"` in a manifest means `NUM_0`..`NUM_9`

use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A symbolic key name from the fixed manifest vocabulary.
#[derive(
    Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, IntoStaticStr, Ord, PartialEq, PartialOrd,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NamedKey {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Top-row digits
    #[strum(serialize = "NUM_0")]
    Num0,
    #[strum(serialize = "NUM_1")]
    Num1,
    #[strum(serialize = "NUM_2")]
    Num2,
    #[strum(serialize = "NUM_3")]
    Num3,
    #[strum(serialize = "NUM_4")]
    Num4,
    #[strum(serialize = "NUM_5")]
    Num5,
    #[strum(serialize = "NUM_6")]
    Num6,
    #[strum(serialize = "NUM_7")]
    Num7,
    #[strum(serialize = "NUM_8")]
    Num8,
    #[strum(serialize = "NUM_9")]
    Num9,

    // Numeric keypad
    #[strum(serialize = "NUMPAD_0")]
    Numpad0,
    #[strum(serialize = "NUMPAD_1")]
    Numpad1,
    #[strum(serialize = "NUMPAD_2")]
    Numpad2,
    #[strum(serialize = "NUMPAD_3")]
    Numpad3,
    #[strum(serialize = "NUMPAD_4")]
    Numpad4,
    #[strum(serialize = "NUMPAD_5")]
    Numpad5,
    #[strum(serialize = "NUMPAD_6")]
    Numpad6,
    #[strum(serialize = "NUMPAD_7")]
    Numpad7,
    #[strum(serialize = "NUMPAD_8")]
    Numpad8,
    #[strum(serialize = "NUMPAD_9")]
    Numpad9,
    NumpadDivide,
    NumpadDot,
    NumpadEnter,
    NumpadEquals,
    NumpadMinus,
    NumpadMultiply,
    NumpadPlus,
    NumpadLeftParen,
    NumpadRightParen,

    // Punctuation, editing and lock keys
    Apostrophe,
    At,
    Backslash,
    Backspace,
    Colon,
    Comma,
    Delete,
    End,
    Enter,
    Equals,
    Escape,
    Grave,
    Home,
    Insert,
    LeftBracket,
    Minus,
    NumLock,
    PageUp,
    PageDown,
    Period,
    Plus,
    Pound,
    PrintScreen,
    RightBracket,
    ScrollLock,
    Semicolon,
    Slash,
    Space,
    Star,
    Tab,

    // Arrows
    Down,
    Left,
    Right,
    Up,

    // Function keys
    #[strum(serialize = "F1")]
    F1,
    #[strum(serialize = "F2")]
    F2,
    #[strum(serialize = "F3")]
    F3,
    #[strum(serialize = "F4")]
    F4,
    #[strum(serialize = "F5")]
    F5,
    #[strum(serialize = "F6")]
    F6,
    #[strum(serialize = "F7")]
    F7,
    #[strum(serialize = "F8")]
    F8,
    #[strum(serialize = "F9")]
    F9,
    #[strum(serialize = "F10")]
    F10,
    #[strum(serialize = "F11")]
    F11,
    #[strum(serialize = "F12")]
    F12,
    #[strum(serialize = "F13")]
    F13,
    #[strum(serialize = "F14")]
    F14,
    #[strum(serialize = "F15")]
    F15,
    #[strum(serialize = "F16")]
    F16,
    #[strum(serialize = "F17")]
    F17,
    #[strum(serialize = "F18")]
    F18,
    #[strum(serialize = "F19")]
    F19,
    #[strum(serialize = "F20")]
    F20,
    #[strum(serialize = "F21")]
    F21,
    #[strum(serialize = "F22")]
    F22,
    #[strum(serialize = "F23")]
    F23,
    #[strum(serialize = "F24")]
    F24,
}

impl NamedKey {
    /// Exact manifest spelling of this key.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Looks up a key by its exact manifest spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    /// Letter key for an ASCII letter, either case.
    pub fn letter(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        Self::from_name(&c.to_ascii_uppercase().to_string())
    }

    /// Top-row digit key (`NUM_0`..`NUM_9`).
    pub fn digit(d: u8) -> Option<Self> {
        if d > 9 {
            return None;
        }
        Self::from_name(&format!("NUM_{d}"))
    }

    /// Keypad digit key (`NUMPAD_0`..`NUMPAD_9`).
    pub fn keypad_digit(d: u8) -> Option<Self> {
        if d > 9 {
            return None;
        }
        Self::from_name(&format!("NUMPAD_{d}"))
    }

    /// Function key `F1`..`F24`.
    pub fn function(n: u8) -> Option<Self> {
        if !(1..=24).contains(&n) {
            return None;
        }
        Self::from_name(&format!("F{n}"))
    }

    /// Bare-digit alias used in manifests: `"5"` means `NUM_5`.
    pub fn from_digit_alias(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let d = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        Self::digit(d as u8)
    }

    /// True for every `NUMPAD_*` key.
    pub fn is_numpad(self) -> bool {
        self.name().starts_with("NUMPAD_")
    }

    /// Glyph this key types without shift, if it is a symbol or top-row digit.
    pub fn symbol(self) -> Option<char> {
        use NamedKey::*;
        let c = match self {
            Grave => '`',
            At => '@',
            Pound => '#',
            Minus => '-',
            Plus => '+',
            Equals => '=',
            LeftBracket => '[',
            RightBracket => ']',
            Backslash => '\\',
            Semicolon => ';',
            Apostrophe => '\'',
            Colon => ':',
            Comma => ',',
            Period => '.',
            Slash => '/',
            Space => ' ',
            Star => '*',
            Num0 => '0',
            Num1 => '1',
            Num2 => '2',
            Num3 => '3',
            Num4 => '4',
            Num5 => '5',
            Num6 => '6',
            Num7 => '7',
            Num8 => '8',
            Num9 => '9',
            _ => return None,
        };
        Some(c)
    }

    /// Glyph this key types with shift held (US layout).
    pub fn shifted_symbol(self) -> Option<char> {
        use NamedKey::*;
        let c = match self {
            Grave => '~',
            Num1 => '!',
            Num2 => '@',
            Num3 => '#',
            Num4 => '$',
            Num5 => '%',
            Num6 => '^',
            Num7 => '&',
            Num8 => '*',
            Num9 => '(',
            Num0 => ')',
            Minus => '_',
            Equals => '+',
            LeftBracket => '{',
            RightBracket => '}',
            Backslash => '|',
            Semicolon => ':',
            Apostrophe => '"',
            Comma => '<',
            Period => '>',
            Slash => '?',
            _ => return None,
        };
        Some(c)
    }
}

/// Resolves a quoted-literal body written as a key name (`'NUM_5'`,
/// `'SPACE'`) to the glyph that key types.
pub fn symbol_alias(body: &str) -> Option<char> {
    NamedKey::from_name(body).and_then(NamedKey::symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_are_exact_manifest_spellings() {
        assert_eq!(NamedKey::Num5.name(), "NUM_5");
        assert_eq!(NamedKey::Numpad0.name(), "NUMPAD_0");
        assert_eq!(NamedKey::NumpadLeftParen.name(), "NUMPAD_LEFT_PAREN");
        assert_eq!(NamedKey::PageUp.name(), "PAGE_UP");
        assert_eq!(NamedKey::PrintScreen.name(), "PRINT_SCREEN");
        assert_eq!(NamedKey::F13.name(), "F13");
        assert_eq!(NamedKey::A.name(), "A");
    }

    #[test]
    fn test_every_name_round_trips() {
        for key in NamedKey::iter() {
            assert_eq!(NamedKey::from_name(key.name()), Some(key), "{key:?}");
        }
        assert_eq!(NamedKey::iter().count(), 113);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(NamedKey::from_name("f5"), None);
        assert_eq!(NamedKey::from_name("page_up"), None);
        assert_eq!(NamedKey::from_name("F5"), Some(NamedKey::F5));
    }

    #[test]
    fn test_digit_alias() {
        assert_eq!(NamedKey::from_digit_alias("7"), Some(NamedKey::Num7));
        assert_eq!(NamedKey::from_digit_alias("10"), None);
        assert_eq!(NamedKey::from_digit_alias("x"), None);
    }

    #[test]
    fn test_symbol_tables() {
        assert_eq!(symbol_alias("NUM_5"), Some('5'));
        assert_eq!(symbol_alias("SPACE"), Some(' '));
        assert_eq!(symbol_alias("F5"), None);
        assert_eq!(NamedKey::Num1.shifted_symbol(), Some('!'));
        assert_eq!(NamedKey::A.shifted_symbol(), None);
    }

    #[test]
    fn test_numpad_membership() {
        let numpad = NamedKey::iter().filter(|k| k.is_numpad()).count();
        assert_eq!(numpad, 19);
        assert!(!NamedKey::NumLock.is_numpad());
    }
}
