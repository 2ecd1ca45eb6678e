//! Game configuration.
//!
//! A `GameConfig` fixes the table at setup: seats, teams, hand size, win
//! threshold, the anti-double-count tolerance and the RNG seed. Hand size and
//! threshold are derived from the seat/team counts unless overridden.

use serde::{Deserialize, Serialize};

use crate::board::win_threshold;
use crate::error::SetupError;

/// Supported seat counts.
pub const PLAYER_RANGE: std::ops::RangeInclusive<usize> = 2..=12;

/// Team counts accepted by [`GameConfig::new`].
pub const TEAM_RANGE: std::ops::RangeInclusive<usize> = 2..=3;

/// Cards per hand for a given seat count.
#[must_use]
pub const fn hand_size_for(player_count: usize) -> usize {
    match player_count {
        0..=2 => 7,
        3..=4 => 6,
        5..=6 => 5,
        7..=9 => 4,
        _ => 3,
    }
}

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_count: usize,
    pub team_count: usize,
    pub hand_size: usize,
    /// Completed sequences needed to win.
    pub win_threshold: u32,
    /// Cells a new sequence may share with the team's earlier sequences.
    pub max_shared_cells: usize,
    pub seed: u64,
}

impl GameConfig {
    /// Validate seat/team counts and derive hand size and win threshold.
    ///
    /// ```
    /// use fiva_engine::core::GameConfig;
    ///
    /// let config = GameConfig::new(4, 2).unwrap();
    /// assert_eq!(config.hand_size, 6);
    /// assert_eq!(config.win_threshold, 1);
    ///
    /// assert!(GameConfig::new(5, 2).is_err()); // uneven teams
    /// assert!(GameConfig::new(13, 2).is_err());
    /// ```
    pub fn new(player_count: usize, team_count: usize) -> Result<Self, SetupError> {
        if !PLAYER_RANGE.contains(&player_count) {
            return Err(SetupError::InvalidPlayerCount(player_count));
        }
        if !TEAM_RANGE.contains(&team_count) {
            return Err(SetupError::InvalidTeamCount(team_count));
        }
        if player_count % team_count != 0 {
            return Err(SetupError::UnevenTeams {
                players: player_count,
                teams: team_count,
            });
        }

        Ok(Self {
            player_count,
            team_count,
            hand_size: hand_size_for(player_count),
            win_threshold: win_threshold(team_count),
            max_shared_cells: 1,
            seed: 42,
        })
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the hand size.
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Override the number of sequences needed to win.
    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold.max(1);
        self
    }

    /// Override how many cells a new sequence may share with earlier ones.
    pub fn with_max_shared_cells(mut self, cells: usize) -> Self {
        self.max_shared_cells = cells;
        self
    }

    /// Players per team.
    #[must_use]
    pub fn team_size(&self) -> usize {
        self.player_count / self.team_count
    }
}
