//! Core types: players and teams, RNG, configuration, actions, state.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord, LegalAction, Target};
pub use config::{hand_size_for, GameConfig, PLAYER_RANGE, TEAM_RANGE};
pub use player::{PlayerId, PlayerMap, TeamId, TeamMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GamePhase, GameState};
