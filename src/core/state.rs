//! Turn and scoring state.
//!
//! `GameState` is the public progression of a game: phase, whose turn it
//! is, sequences per team, the winner, and the action history. Cards and
//! chips live in the deck tracker and board; the game aggregate in
//! `rules::engine` owns all of them together.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, TeamId, TeamMap};

/// Game phase. `GameOver` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

/// Public progression of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,

    /// Whose turn it is.
    pub active_player: PlayerId,

    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Counted sequences per team. Never decreases.
    pub sequences: TeamMap<u32>,

    pub win_threshold: u32,

    /// Set on the transition to `GameOver`; `None` there means a draw.
    pub winner: Option<TeamId>,

    /// Every applied action, oldest first.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// State for a game that has not been dealt yet.
    #[must_use]
    pub fn new(team_count: usize, win_threshold: u32) -> Self {
        Self {
            phase: GamePhase::Setup,
            active_player: PlayerId::new(0),
            turn_number: 1,
            sequences: TeamMap::with_value(team_count, 0),
            win_threshold,
            winner: None,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the game. `winner` is `None` for a draw.
    pub fn finish(&mut self, winner: Option<TeamId>) {
        self.phase = GamePhase::GameOver;
        self.winner = winner;
    }

    /// Record an applied action.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellIndex;
    use crate::cards::{Card, Rank, Suit};
    use crate::core::{Action, ActionKind};

    #[test]
    fn test_new_state() {
        let state = GameState::new(3, 1);
        assert_eq!(state.phase, GamePhase::Setup);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.sequences.team_count(), 3);
        assert!(!state.is_playing());
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_finish() {
        let mut state = GameState::new(2, 1);
        state.phase = GamePhase::Playing;
        state.finish(Some(TeamId::new(1)));

        assert!(state.is_over());
        assert_eq!(state.winner, Some(TeamId::new(1)));
    }

    #[test]
    fn test_history_clone_is_independent() {
        let mut state = GameState::new(2, 1);
        state.record_action(ActionRecord {
            player: PlayerId::new(0),
            action: Action::play(Card::new(Rank::Two, Suit::Hearts), CellIndex(13)),
            kind: ActionKind::PlaceChip,
            turn: 1,
        });

        let snapshot = state.clone();
        state.record_action(ActionRecord {
            player: PlayerId::new(1),
            action: Action::discard(Card::new(Rank::Two, Suit::Hearts)),
            kind: ActionKind::DiscardDead,
            turn: 2,
        });

        assert_eq!(snapshot.history.len(), 1);
        assert_eq!(state.history.len(), 2);
    }
}
