//! # fiva-engine
//!
//! Rules engine and computer opponents for FIVA, a card-and-board game:
//! players play cards from a 104-card double deck to claim cells of a
//! 10x10 board, and a team wins by lining up five chips.
//!
//! ## Design Principles
//!
//! 1. **One writer**: a [`Game`] owns the board, the deck and every hand.
//!    [`Game::apply_action`] is the only mutation entry point and is
//!    all-or-nothing.
//!
//! 2. **Conservation**: every one of the 104 physical cards is in exactly
//!    one of deck, discard pile, board or a hand at all times.
//!
//! 3. **Determinism**: all randomness flows from a seeded `GameRng`, and AI
//!    move choice is a pure function of the game.
//!
//! 4. **Layout injection**: the `cell -> card` table is supplied at setup;
//!    nothing here assumes a particular printed board.
//!
//! ## Modules
//!
//! - `core`: players, teams, RNG, configuration, actions, public state
//! - `cards`: card identities, physical instances, deck tracking
//! - `board`: grid, layout, chip occupancy, sequence detection
//! - `rules`: move validation and the turn engine
//! - `ai`: move scoring, difficulty tiers, cancellable auto-play
//! - `snapshot`: binary snapshots of a game in progress
//! - `error`: typed errors

pub mod ai;
pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod rules;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, GameConfig, GamePhase, GameRng, GameRngState, GameState, LegalAction,
    PlayerId, PlayerMap, Target, TeamId, TeamMap,
};

pub use crate::cards::{Card, CardCatalog, CardClass, CardId, CardLocation, DeckTracker, Rank, Suit};

pub use crate::board::{Board, BoardLayout, CellIndex, CellSet, CompletedSequence, SequenceDetector};

pub use crate::rules::{Game, MoveValidator, TurnOutcome};

pub use crate::ai::{AiAgent, AiConfig, AutoPlay, CancelToken, Difficulty, ThinkDelay};

pub use crate::error::{DeckError, RejectReason, SetupError, SnapshotError};

pub use crate::snapshot::GameSnapshot;
