// src/controls.rs

use crate::clipping::{ClipType, FillType};

/// Everything the keyboard and mouse can ask of the demo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetClipType(ClipType),
    NoClipping,
    SetFill(FillType),
    Digit(u8),
    Regenerate,
    ToggleHelp,
    Quit,
}

pub fn command_for_char(c: char) -> Option<Command> {
    let command = match c.to_ascii_lowercase() {
        'i' => Command::SetClipType(ClipType::Intersection),
        'u' => Command::SetClipType(ClipType::Union),
        'd' => Command::SetClipType(ClipType::Difference),
        'x' => Command::SetClipType(ClipType::Xor),
        'q' => Command::NoClipping,
        'e' => Command::SetFill(FillType::EvenOdd),
        'z' => Command::SetFill(FillType::NonZero),
        'p' => Command::SetFill(FillType::Positive),
        'n' => Command::SetFill(FillType::Negative),
        ' ' | '\r' | '\n' => Command::Regenerate,
        '\u{1b}' => Command::Quit,
        d if d.is_ascii_digit() => Command::Digit(d as u8 - b'0'),
        _ => return None,
    };
    Some(command)
}

/// Keys that don't produce characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialKey {
    Enter,
    Space,
    Escape,
    F1,
}

pub fn command_for_special_key(key: SpecialKey) -> Command {
    match key {
        SpecialKey::Enter | SpecialKey::Space => Command::Regenerate,
        SpecialKey::Escape => Command::Quit,
        SpecialKey::F1 => Command::ToggleHelp,
    }
}

/// Key bindings as shown in the help window.
pub const HELP_LINES: &[&str] = &[
    "I - for Intersection operations.",
    "U - for Union operations.",
    "D - for Difference operations.",
    "X - for XOR operations.",
    "Q - for no clipping.",
    "------------------------------",
    "E - for EvenOdd fills.",
    "Z - for NonZero fills.",
    "P - for Positive fills.",
    "N - for Negative fills.",
    "------------------------------",
    "nn<ENTER> - number of vertices (3..50).",
    "------------------------------",
    "SPACE, ENTER or click to refresh.",
    "F1 - to see this help dialog again.",
    "Esc - to quit.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        for (c, expected) in [
            ('i', Command::SetClipType(ClipType::Intersection)),
            ('U', Command::SetClipType(ClipType::Union)),
            ('d', Command::SetClipType(ClipType::Difference)),
            ('X', Command::SetClipType(ClipType::Xor)),
            ('Q', Command::NoClipping),
            ('e', Command::SetFill(FillType::EvenOdd)),
            ('Z', Command::SetFill(FillType::NonZero)),
            ('p', Command::SetFill(FillType::Positive)),
            ('N', Command::SetFill(FillType::Negative)),
        ] {
            assert_eq!(command_for_char(c), Some(expected), "key {:?}", c);
        }
    }

    #[test]
    fn digits_and_unbound_keys() {
        assert_eq!(command_for_char('0'), Some(Command::Digit(0)));
        assert_eq!(command_for_char('7'), Some(Command::Digit(7)));
        assert_eq!(command_for_char(' '), Some(Command::Regenerate));
        assert_eq!(command_for_char('k'), None);
        assert_eq!(command_for_char('%'), None);
    }

    #[test]
    fn special_keys() {
        assert_eq!(command_for_special_key(SpecialKey::Enter), Command::Regenerate);
        assert_eq!(command_for_special_key(SpecialKey::Escape), Command::Quit);
        assert_eq!(command_for_special_key(SpecialKey::F1), Command::ToggleHelp);
    }
}
