//! Territory cards and card selections.

use std::fmt;

use super::territory::TerritoryId;

/// The category printed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardKind {
    /// One of the `k` ordinary categories, numbered `1..=k`.
    Type(u8),
    /// A joker; matches any category, at most one per traded set.
    Joker,
    /// An opaque placeholder for a card the viewer cannot see.
    /// Matches any category and carries no territory.
    Wildcard,
}

/// A single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card {
    pub kind: CardKind,
    /// The territory pictured on the card; `None` for jokers and wildcards.
    pub territory: Option<TerritoryId>,
}

impl Card {
    /// A territory card of the given category.
    pub const fn territory(kind: u8, territory: TerritoryId) -> Self {
        Card {
            kind: CardKind::Type(kind),
            territory: Some(territory),
        }
    }

    pub const fn joker() -> Self {
        Card {
            kind: CardKind::Joker,
            territory: None,
        }
    }

    pub const fn wildcard() -> Self {
        Card {
            kind: CardKind::Wildcard,
            territory: None,
        }
    }
}

/// A subset of hand slots, encoded as a bitmask over slot indices.
///
/// Hands never exceed 64 cards (enforced by configuration validation), so a
/// `u64` is enough and keeps `Action` `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CardSelection(pub u64);

impl CardSelection {
    /// Builds a selection from slot indices. Indices of 64 or more are ignored.
    pub fn from_slots(slots: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = 0u64;
        for slot in slots {
            if slot < 64 {
                bits |= 1 << slot;
            }
        }
        CardSelection(bits)
    }

    /// Number of selected slots.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, slot: usize) -> bool {
        slot < 64 && self.0 & (1 << slot) != 0
    }

    /// Selected slot indices in ascending order.
    pub fn slots(self) -> impl Iterator<Item = usize> {
        (0..64).filter(move |&i| self.contains(i))
    }

    /// Returns true if every selected slot is below `hand_len`.
    pub fn fits(self, hand_len: usize) -> bool {
        hand_len >= 64 || self.0 >> hand_len == 0
    }
}

impl fmt::Display for CardSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for slot in self.slots() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", slot)?;
            first = false;
        }
        Ok(())
    }
}
