//! Typed errors surfaced by the engine.
//!
//! Every variant is a local, recoverable condition. None of them leave game
//! state partially mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("cell index is outside the 10x10 board")]
    OutOfRange,
    #[error("card does not match the cell")]
    CardMismatch,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("no opponent chip to remove at that cell")]
    NoRemovableChip,
    #[error("chip is part of a completed sequence")]
    SequenceProtected,
    #[error("card still has an open cell and cannot be discarded")]
    NotDead,
    #[error("card is not in the player's hand")]
    CardNotInHand,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("no such player in this game")]
    UnknownPlayer,
    #[error("game is not in progress")]
    GameNotInProgress,
}

/// Deck-level failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck and discard pile are both empty")]
    EmptySupply,
}

/// Rejected game setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player count {0} is outside the supported range 2..=12")]
    InvalidPlayerCount(usize),
    #[error("team count {0} is not supported")]
    InvalidTeamCount(usize),
    #[error("{players} players cannot be split evenly into {teams} teams")]
    UnevenTeams { players: usize, teams: usize },
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
    #[error("scenario setup failed: {0}")]
    Scenario(String),
}

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot format version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("snapshot decodes but describes an inconsistent game")]
    Corrupt,
}
