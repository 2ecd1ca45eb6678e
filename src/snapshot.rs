//! Opaque binary snapshots of a game in progress.
//!
//! A snapshot is a `bincode` encoding of a format version followed by the
//! whole [`Game`]: config, layout, board, deck, hands, state and the RNG
//! position. Restoring a snapshot resumes the exact same game, including
//! future draws.
//!
//! ```
//! use fiva_engine::board::BoardLayout;
//! use fiva_engine::rules::Game;
//! use fiva_engine::snapshot::GameSnapshot;
//!
//! let game = Game::new_game(2, 2, BoardLayout::sequential(), 3).unwrap();
//! let bytes = GameSnapshot::capture(&game).to_bytes().unwrap();
//! let restored = GameSnapshot::from_bytes(&bytes).unwrap().restore();
//! assert_eq!(restored, game);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::rules::Game;

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A captured game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    version: u32,
    game: Game,
}

impl GameSnapshot {
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            game: game.clone(),
        }
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Take the game back out.
    #[must_use]
    pub fn restore(self) -> Game {
        self.game
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode, checking the version before the body and the game's
    /// structure after it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let found: u32 = bincode::deserialize(bytes)?;
        if found != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found,
                expected: SNAPSHOT_VERSION,
            });
        }
        let snapshot: Self = bincode::deserialize(bytes)?;
        if !snapshot.game.is_well_formed() {
            return Err(SnapshotError::Corrupt);
        }
        Ok(snapshot)
    }
}

impl Game {
    /// Encode this game as snapshot bytes.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        GameSnapshot::capture(self).to_bytes()
    }

    /// Decode a game from snapshot bytes.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, SnapshotError> {
        GameSnapshot::from_bytes(bytes).map(GameSnapshot::restore)
    }
}
