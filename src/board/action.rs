//! The action vocabulary.
//!
//! Every move a seat or the dice can make is one `Action`. The data model
//! maps one-to-one onto the text notation in `protocol::notation`.

use super::card::CardSelection;
use super::territory::TerritoryId;

/// A single step a driver can apply to a `BoardState`.
///
/// Each variant carries exactly the data needed to validate and apply it;
/// the acting seat is implied by the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Claim an unowned territory during initial selection: `S 4`
    Select(TerritoryId),

    /// Place troops from the reinforcement pool: `R 4 3`
    Reinforce { territory: TerritoryId, troops: u32 },

    /// Commit troops from `from` against the neighbour `to`: `A 4 5 3`
    Attack {
        from: TerritoryId,
        to: TerritoryId,
        troops: u32,
    },

    /// Dice outcome of the pending attack, chance actor only: `X 0 2`
    Casualties { attacker: u32, defender: u32 },

    /// Move troops into a freshly conquered territory: `O 2`
    Occupy(u32),

    /// Move troops between two owned territories: `F 4 7 2`
    Fortify {
        from: TerritoryId,
        to: TerritoryId,
        troops: u32,
    },

    /// Trade the selected hand slots for reinforcements: `C 0 1 3`
    PlayCards(CardSelection),

    /// Finish the current attack or fortify phase: `E`
    EndPhase,
}

impl Action {
    /// Shorthand for `Action::Reinforce`.
    pub const fn reinforce(territory: u16, troops: u32) -> Self {
        Action::Reinforce {
            territory: TerritoryId(territory),
            troops,
        }
    }

    /// Shorthand for `Action::Attack`.
    pub const fn attack(from: u16, to: u16, troops: u32) -> Self {
        Action::Attack {
            from: TerritoryId(from),
            to: TerritoryId(to),
            troops,
        }
    }

    /// Shorthand for `Action::Fortify`.
    pub const fn fortify(from: u16, to: u16, troops: u32) -> Self {
        Action::Fortify {
            from: TerritoryId(from),
            to: TerritoryId(to),
            troops,
        }
    }

    /// Shorthand for `Action::Casualties`.
    pub const fn casualties(attacker: u32, defender: u32) -> Self {
        Action::Casualties { attacker, defender }
    }

    /// Short lowercase name of the action kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::Select(_) => "select",
            Action::Reinforce { .. } => "reinforce",
            Action::Attack { .. } => "attack",
            Action::Casualties { .. } => "casualties",
            Action::Occupy(_) => "occupy",
            Action::Fortify { .. } => "fortify",
            Action::PlayCards(_) => "play cards",
            Action::EndPhase => "end phase",
        }
    }
}
