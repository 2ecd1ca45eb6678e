//! Actions: what a player asks to do, and how the validator classified it.
//!
//! An [`Action`] is a card plus a target: a cell, or the discard pile for a
//! dead card. The engine classifies it into an [`ActionKind`]; the pair is a
//! [`LegalAction`].

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::CellIndex;
use crate::cards::Card;

/// Where a played card is aimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Cell(CellIndex),
    /// Discard a dead card instead of targeting a cell.
    Discard,
}

/// A requested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub card: Card,
    pub target: Target,
}

impl Action {
    /// Play `card` on `cell`.
    #[must_use]
    pub const fn play(card: Card, cell: CellIndex) -> Self {
        Self {
            card,
            target: Target::Cell(cell),
        }
    }

    /// Discard a dead `card`.
    #[must_use]
    pub const fn discard(card: Card) -> Self {
        Self {
            card,
            target: Target::Discard,
        }
    }

    /// Target cell, if any.
    #[must_use]
    pub const fn cell(&self) -> Option<CellIndex> {
        match self.target {
            Target::Cell(cell) => Some(cell),
            Target::Discard => None,
        }
    }

    /// Ordering key for deterministic tie-breaks: cell index (discards
    /// last), then card.
    #[must_use]
    pub fn tie_break_key(&self) -> (u16, Card) {
        let cell = self.cell().map_or(u16::MAX, |c| u16::from(c.0));
        (cell, self.card)
    }
}

/// What an accepted action does to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PlaceChip,
    RemoveChip,
    DiscardDead,
}

/// An action the validator accepted, with its classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalAction {
    pub action: Action,
    pub kind: ActionKind,
}

/// An applied action, kept in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub kind: ActionKind,
    pub turn: u32,
}
