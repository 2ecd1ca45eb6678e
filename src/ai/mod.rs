//! Computer players.
//!
//! - `config`: difficulty tiers and scoring weights
//! - `eval`: per-move scoring (offense, defense, jack cost, win/block flags)
//! - `agent`: tier-specific move choice
//! - `autoplay`: cancellable runs of consecutive AI turns

pub mod agent;
pub mod autoplay;
pub mod config;
pub mod eval;

pub use agent::AiAgent;
pub use autoplay::{AutoPlay, AutoPlayReport, CancelToken, FixedDelay, NoDelay, StopReason, ThinkDelay};
pub use config::{AiConfig, Difficulty, ScoreWeights};
pub use eval::{Evaluator, MoveScore, WIN_SCORE};
