//! Human-readable names for macOS virtual key codes and mouse button ids.
//!
//! Only used for diagnostics; the engine itself works on raw numbers.

use std::borrow::Cow;

/// Name of a macOS virtual key code, if it is a well-known key.
pub fn key_name(code: u16) -> Option<&'static str> {
    let name = match code {
        // Letters (ANSI layout positions)
        0x00 => "A",
        0x01 => "S",
        0x02 => "D",
        0x03 => "F",
        0x04 => "H",
        0x05 => "G",
        0x06 => "Z",
        0x07 => "X",
        0x08 => "C",
        0x09 => "V",
        0x0B => "B",
        0x0C => "Q",
        0x0D => "W",
        0x0E => "E",
        0x0F => "R",
        0x10 => "Y",
        0x11 => "T",
        0x1F => "O",
        0x20 => "U",
        0x22 => "I",
        0x23 => "P",
        0x25 => "L",
        0x26 => "J",
        0x28 => "K",
        0x2D => "N",
        0x2E => "M",

        // Numbers
        0x12 => "1",
        0x13 => "2",
        0x14 => "3",
        0x15 => "4",
        0x17 => "5",
        0x16 => "6",
        0x1A => "7",
        0x1C => "8",
        0x19 => "9",
        0x1D => "0",

        // Punctuation
        0x18 => "=",
        0x1B => "-",
        0x1E => "]",
        0x21 => "[",
        0x27 => "'",
        0x29 => ";",
        0x2A => "\\",
        0x2B => ",",
        0x2C => "/",
        0x2F => ".",
        0x32 => "`",

        // Editing and whitespace
        0x24 => "Return",
        0x30 => "Tab",
        0x31 => "Space",
        0x33 => "Delete",
        0x35 => "Escape",
        0x75 => "Forward Delete",

        // Function keys
        0x7A => "F1",
        0x78 => "F2",
        0x63 => "F3",
        0x76 => "F4",
        0x60 => "F5",
        0x61 => "F6",
        0x62 => "F7",
        0x64 => "F8",
        0x65 => "F9",
        0x6D => "F10",
        0x67 => "F11",
        0x6F => "F12",

        // Navigation
        0x73 => "Home",
        0x77 => "End",
        0x74 => "Page Up",
        0x79 => "Page Down",
        0x7B => "Left Arrow",
        0x7C => "Right Arrow",
        0x7D => "Down Arrow",
        0x7E => "Up Arrow",

        _ => return None,
    };
    Some(name)
}

/// Display name for a key code, falling back to `Key <code>`.
pub fn key_label(code: u16) -> Cow<'static, str> {
    match key_name(code) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("Key {}", code)),
    }
}

/// Display name for a mouse button id (0 = left).
pub fn button_label(button: u32) -> Cow<'static, str> {
    match button {
        0 => Cow::Borrowed("Left (0)"),
        1 => Cow::Borrowed("Right (1)"),
        2 => Cow::Borrowed("Middle (2)"),
        3 => Cow::Borrowed("Back (3)"),
        4 => Cow::Borrowed("Forward (4)"),
        n => Cow::Owned(format!("Button {}", n)),
    }
}
