//! Running consecutive AI turns.
//!
//! [`AutoPlay`] keeps asking the active seat's agent for a move and applying
//! it until the game ends, a human seat comes up, a turn limit is hit or the
//! [`CancelToken`] is set. The token is only read between turns, so a
//! cancelled run always leaves a fully applied turn behind.
//!
//! The pause between choosing and applying a move is a [`ThinkDelay`]
//! strategy; tests use [`NoDelay`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{PlayerId, PlayerMap};
use crate::error::RejectReason;
use crate::rules::{Game, TurnOutcome};

use super::agent::AiAgent;
use super::config::AiConfig;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Pause applied after an AI picks a move and before it is applied.
pub trait ThinkDelay: Send + Sync {
    fn pause(&self, player: PlayerId);
}

/// No pause.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl ThinkDelay for NoDelay {
    fn pause(&self, _player: PlayerId) {}
}

/// Sleep the current thread for a fixed time.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl ThinkDelay for FixedDelay {
    fn pause(&self, _player: PlayerId) {
        std::thread::sleep(self.0);
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    GameOver,
    /// The active seat is not AI-controlled.
    HumanTurn(PlayerId),
    TurnLimit,
    /// The active AI seat had no legal move.
    NoMove(PlayerId),
    /// The engine refused the AI's move.
    Rejected(PlayerId, RejectReason),
}

/// Summary of one [`AutoPlay::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoPlayReport {
    pub turns_played: u32,
    pub reason: StopReason,
}

/// Drives AI seats until something stops it.
pub struct AutoPlay<D: ThinkDelay = NoDelay> {
    /// `None` marks a human seat.
    seats: PlayerMap<Option<AiAgent>>,
    delay: D,
    cancel: CancelToken,
    max_turns: Option<u32>,
}

impl AutoPlay<NoDelay> {
    /// Auto-play with one optional AI configuration per seat.
    #[must_use]
    pub fn new(seats: PlayerMap<Option<AiConfig>>) -> Self {
        let player_count = seats.player_count();
        let agents = PlayerMap::new(player_count, |p| seats[p].clone().map(AiAgent::new));
        Self {
            seats: agents,
            delay: NoDelay,
            cancel: CancelToken::new(),
            max_turns: None,
        }
    }

    /// Every seat played by the same AI configuration.
    #[must_use]
    pub fn all_ai(player_count: usize, config: AiConfig) -> Self {
        Self::new(PlayerMap::with_value(player_count, Some(config)))
    }
}

impl<D: ThinkDelay> AutoPlay<D> {
    /// Replace the think delay.
    pub fn with_delay<E: ThinkDelay>(self, delay: E) -> AutoPlay<E> {
        AutoPlay {
            seats: self.seats,
            delay,
            cancel: self.cancel,
            max_turns: self.max_turns,
        }
    }

    /// Share an existing token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Stop after this many applied turns.
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// A handle that cancels this run from anywhere.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn agent_for(&self, player: PlayerId) -> Option<&AiAgent> {
        if self.seats.contains(player) {
            self.seats[player].as_ref()
        } else {
            None
        }
    }

    /// Play one AI turn.
    pub fn step(&self, game: &mut Game) -> Result<TurnOutcome, StopReason> {
        if game.state().is_over() {
            return Err(StopReason::GameOver);
        }
        let player = game.active_player();
        let agent = self.agent_for(player).ok_or(StopReason::HumanTurn(player))?;
        let choice = agent.choose_action(game, player).ok_or(StopReason::NoMove(player))?;

        self.delay.pause(player);

        game.apply_action(player, choice.action).map_err(|reason| {
            warn!(player = player.0, ?reason, "ai move rejected");
            StopReason::Rejected(player, reason)
        })
    }

    /// Play AI turns until a stop condition. Cancellation and the turn
    /// limit are checked before each turn only.
    pub fn run(&self, game: &mut Game) -> AutoPlayReport {
        let mut turns_played = 0;
        let reason = loop {
            if game.state().is_over() {
                break StopReason::GameOver;
            }
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if self.max_turns.is_some_and(|max| turns_played >= max) {
                break StopReason::TurnLimit;
            }
            match self.step(game) {
                Ok(_) => turns_played += 1,
                Err(reason) => break reason,
            }
        };

        debug!(turns = turns_played, ?reason, "auto-play stopped");
        AutoPlayReport { turns_played, reason }
    }
}
