//! Line-of-five detection, locking and the win threshold.
//!
//! Only the four lines through the changed cell are rescanned. A run of five
//! or more counting cells (the team's chips plus wild corners) yields
//! candidate windows of exactly five cells that contain the changed cell.
//! A window counts as a new sequence when it shares at most
//! `max_shared_cells` cells with the team's already-counted sequences;
//! accepted windows are locked immediately so a later window in the same
//! scan is checked against them too.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::grid::{Board, CellIndex, CellSet, BOARD_SIDE};
use crate::core::{TeamId, TeamMap};

/// Cells in a sequence.
pub const SEQUENCE_LENGTH: usize = 5;

/// One of the four lines through a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right.
    DiagonalUp,
    /// Top-left to bottom-right.
    DiagonalDown,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// (row, column) step in the forward direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalUp => (-1, 1),
            Axis::DiagonalDown => (1, 1),
        }
    }
}

/// A newly counted sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSequence {
    pub team: TeamId,
    pub axis: Axis,
    pub cells: CellSet,
}

/// The maximal run along `axis` through `cell` of cells that count for
/// `team`, in forward order. `cell` itself is always included, as if the
/// team held it.
#[must_use]
pub fn line_run(board: &Board, cell: CellIndex, team: TeamId, axis: Axis) -> SmallVec<[CellIndex; BOARD_SIDE]> {
    let (dr, dc) = axis.delta();
    let mut run: SmallVec<[CellIndex; BOARD_SIDE]> = SmallVec::new();

    let mut cursor = cell.offset(-dr, -dc);
    while let Some(c) = cursor.filter(|&c| board.counts_for(c, team)) {
        run.push(c);
        cursor = c.offset(-dr, -dc);
    }
    run.reverse();
    run.push(cell);

    let mut cursor = cell.offset(dr, dc);
    while let Some(c) = cursor.filter(|&c| board.counts_for(c, team)) {
        run.push(c);
        cursor = c.offset(dr, dc);
    }
    run
}

/// Length of [`line_run`], capped at [`SEQUENCE_LENGTH`].
#[must_use]
pub fn run_length(board: &Board, cell: CellIndex, team: TeamId, axis: Axis) -> usize {
    line_run(board, cell, team, axis).len().min(SEQUENCE_LENGTH)
}

/// Sequences needed to win: 1 with up to three teams, 2 with four or more.
#[must_use]
pub const fn win_threshold(team_count: usize) -> u32 {
    if team_count <= 3 {
        1
    } else {
        2
    }
}

/// Result of scanning after a move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceOutcome {
    pub sequences: SmallVec<[CompletedSequence; 2]>,
    /// Set when the acting team reached the win threshold.
    pub winner: Option<TeamId>,
}

/// Finds and locks new sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDetector {
    max_shared_cells: usize,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self { max_shared_cells: 1 }
    }
}

impl SequenceDetector {
    #[must_use]
    pub fn new(max_shared_cells: usize) -> Self {
        Self { max_shared_cells }
    }

    #[must_use]
    pub fn max_shared_cells(&self) -> usize {
        self.max_shared_cells
    }

    /// New sequences through `cell` for `team`, without mutating the board.
    #[must_use]
    pub fn find_new(&self, board: &Board, cell: CellIndex, team: TeamId) -> SmallVec<[CompletedSequence; 2]> {
        let mut found = SmallVec::new();
        if !cell.is_valid() || !board.counts_for(cell, team) {
            return found;
        }

        let mut claimed = board.team_locked(team);
        for axis in Axis::ALL {
            let run = line_run(board, cell, team, axis);
            if run.len() < SEQUENCE_LENGTH {
                continue;
            }
            let Some(pos) = run.iter().position(|&c| c == cell) else {
                continue;
            };

            let first = pos.saturating_sub(SEQUENCE_LENGTH - 1);
            let last = pos.min(run.len() - SEQUENCE_LENGTH);
            for start in first..=last {
                let window: CellSet = run[start..start + SEQUENCE_LENGTH].iter().copied().collect();
                if window.overlap(claimed) <= self.max_shared_cells {
                    claimed = claimed.union(window);
                    found.push(CompletedSequence { team, axis, cells: window });
                }
            }
        }
        found
    }

    /// Find new sequences through `cell`, lock them, bump the team's count
    /// and report a winner if the count reaches `threshold`.
    ///
    /// Counts only ever go up; nothing here unlocks a cell.
    pub fn apply(
        &self,
        board: &mut Board,
        counts: &mut TeamMap<u32>,
        threshold: u32,
        cell: CellIndex,
        team: TeamId,
    ) -> SequenceOutcome {
        let sequences = self.find_new(board, cell, team);
        for seq in &sequences {
            board.lock(seq.cells, team);
            counts[team] += 1;
            info!(
                team = team.0,
                axis = ?seq.axis,
                total = counts[team],
                "sequence completed"
            );
        }

        let winner = (!sequences.is_empty() && counts[team] >= threshold).then_some(team);
        SequenceOutcome { sequences, winner }
    }
}
