//! Keyboard modifier flags for synthesized key combos.
//!
//! Bit values follow the host's event flag layout so a [`ModifierSet`] can be
//! stamped onto a synthesized event without translation.

use std::fmt;

/// Set of keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u64);

impl ModifierSet {
    /// No modifiers.
    pub const EMPTY: Self = Self(0);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 17);
    /// Control key.
    pub const CONTROL: Self = Self(1 << 18);
    /// Option/Alt key.
    pub const OPTION: Self = Self(1 << 19);
    /// Command key.
    pub const COMMAND: Self = Self(1 << 20);
    /// Secondary function (fn) bit. Never parsed from config, only derived
    /// by [`ModifierSet::for_delivery`].
    pub const SECONDARY_FN: Self = Self(1 << 23);

    /// Raw flag bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Build a set from raw flag bits, keeping only known modifier bits.
    pub const fn from_bits_truncate(bits: u64) -> Self {
        let known = Self::SHIFT.0
            | Self::CONTROL.0
            | Self::OPTION.0
            | Self::COMMAND.0
            | Self::SECONDARY_FN.0;
        Self(bits & known)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Parse a single modifier name (case-insensitive).
    ///
    /// Accepts `control`/`ctrl`, `shift`, `command`/`cmd` and `option`/`alt`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "control" | "ctrl" => Some(Self::CONTROL),
            "shift" => Some(Self::SHIFT),
            "command" | "cmd" => Some(Self::COMMAND),
            "option" | "alt" => Some(Self::OPTION),
            _ => None,
        }
    }

    /// Parse a list of names. Unknown names are returned separately and do
    /// not affect the resulting set.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> (Self, Vec<String>) {
        let mut set = Self::EMPTY;
        let mut unknown = Vec::new();
        for name in names {
            match Self::parse(name.as_ref()) {
                Some(m) => set.insert(m),
                None => unknown.push(name.as_ref().to_string()),
            }
        }
        (set, unknown)
    }

    /// Flags to stamp on the synthesized key events.
    ///
    /// Control chords only reach every application when the secondary fn
    /// bit rides along, so it is added whenever Control is present. This is a
    /// host compatibility quirk, not a general composition rule.
    pub const fn for_delivery(self) -> Self {
        if self.contains(Self::CONTROL) {
            self.union(Self::SECONDARY_FN)
        } else {
            self
        }
    }
}

impl fmt::Display for ModifierSet {
    /// `Ctrl+Shift+Option+Cmd` ordering; empty sets render as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::CONTROL, "Ctrl"),
            (Self::SHIFT, "Shift"),
            (Self::OPTION, "Option"),
            (Self::COMMAND, "Cmd"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
