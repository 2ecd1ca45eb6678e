//! Move validation and the turn engine.
//!
//! `MoveValidator` answers "is this legal, and what kind of move is it?"
//! without touching state. `Game` owns the state and applies moves.

pub mod engine;
pub mod validator;

pub use engine::{Game, TurnOutcome};
pub use validator::MoveValidator;
