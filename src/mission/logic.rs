//! Three-valued logic.
//!
//! Values are ordered `False < Unknown < True`; `and` is the minimum and
//! `or` the maximum under that order. `Unknown` means the answer depends on
//! information the viewer cannot see.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Logic {
    False,
    Unknown,
    True,
}

impl Logic {
    pub const fn from_bool(b: bool) -> Self {
        if b {
            Logic::True
        } else {
            Logic::False
        }
    }

    pub const fn not(self) -> Self {
        match self {
            Logic::False => Logic::True,
            Logic::Unknown => Logic::Unknown,
            Logic::True => Logic::False,
        }
    }

    pub fn and(self, other: Self) -> Self {
        self.min(other)
    }

    pub fn or(self, other: Self) -> Self {
        self.max(other)
    }

    /// Material implication, `!a | b`.
    pub fn implies(self, other: Self) -> Self {
        self.not().or(other)
    }

    /// The agreed value when both sides are certain and equal, else `Unknown`.
    pub fn maybe(self, other: Self) -> Self {
        if self == other {
            self
        } else {
            Logic::Unknown
        }
    }

    pub fn xor(self, other: Self) -> Self {
        self.or(other).and(self.and(other).not())
    }

    pub fn equivalence(self, other: Self) -> Self {
        self.xor(other).not()
    }

    pub fn nand(self, other: Self) -> Self {
        self.and(other).not()
    }

    pub fn nor(self, other: Self) -> Self {
        self.or(other).not()
    }

    /// Not known to be false.
    pub const fn possible(self) -> bool {
        !matches!(self, Logic::False)
    }

    pub const fn impossible(self) -> bool {
        matches!(self, Logic::False)
    }

    /// Known either way.
    pub const fn certain(self) -> bool {
        !matches!(self, Logic::Unknown)
    }

    pub const fn uncertain(self) -> bool {
        matches!(self, Logic::Unknown)
    }

    /// Known to be true.
    pub const fn valid(self) -> bool {
        matches!(self, Logic::True)
    }

    /// Not known to be true.
    pub const fn falsifiable(self) -> bool {
        !matches!(self, Logic::True)
    }
}

impl From<bool> for Logic {
    fn from(b: bool) -> Self {
        Logic::from_bool(b)
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Logic::False => "false",
            Logic::Unknown => "unknown",
            Logic::True => "true",
        };
        write!(f, "{}", s)
    }
}
