//! The 10×10 grid: cell indices, bit sets of cells, and chip occupancy.

use serde::{Deserialize, Serialize};

use super::layout::BoardLayout;
use crate::cards::Card;
use crate::core::TeamId;

/// Board side length.
pub const BOARD_SIDE: usize = 10;

/// Number of cells.
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

/// Row-major cell index. Valid values are `0..100`; larger values are
/// representable so callers can pass raw input that the validator rejects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex(pub u8);

impl CellIndex {
    /// The four wild corners.
    pub const CORNERS: [CellIndex; 4] = [CellIndex(0), CellIndex(9), CellIndex(90), CellIndex(99)];

    /// Checked constructor.
    #[must_use]
    pub fn new(raw: usize) -> Option<Self> {
        (raw < CELL_COUNT).then_some(Self(raw as u8))
    }

    #[must_use]
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIDE && col < BOARD_SIDE {
            Some(Self((row * BOARD_SIDE + col) as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < CELL_COUNT
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / BOARD_SIDE
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.0 as usize % BOARD_SIDE
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self.0, 0 | 9 | 90 | 99)
    }

    /// Step by a row/column delta, staying on the board.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row() as isize + d_row;
        let col = self.col() as isize + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Self::from_row_col(row as usize, col as usize)
    }

    /// All valid cells in index order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8).map(CellIndex)
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}", self.row(), self.col())
    }
}

/// A set of cells as a 128-bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellSet(u128);

impl CellSet {
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, cell: CellIndex) {
        if cell.is_valid() {
            self.0 |= 1u128 << cell.0;
        }
    }

    #[must_use]
    pub const fn contains(self, cell: CellIndex) -> bool {
        cell.0 < 128 && self.0 & (1u128 << cell.0) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn union(self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    /// Number of cells in both sets.
    #[must_use]
    pub const fn overlap(self, other: CellSet) -> usize {
        (self.0 & other.0).count_ones() as usize
    }

    /// Cells in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT as u8)
            .filter(move |&i| self.0 & (1u128 << i) != 0)
            .map(CellIndex)
    }
}

impl FromIterator<CellIndex> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        let mut set = CellSet::empty();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

/// Read-only view of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    /// `None` for the wild corners.
    pub underlying_card: Option<Card>,
    pub occupant: Option<TeamId>,
    /// Part of a counted sequence; the chip can never be removed.
    pub locked: bool,
}

/// Chip occupancy and sequence locks over a fixed layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    layout: BoardLayout,
    occupants: Vec<Option<TeamId>>,
    locked: CellSet,
    /// Cells of each team's counted sequences, corners included.
    team_locked: Vec<CellSet>,
}

impl Board {
    /// An empty board for `team_count` teams.
    #[must_use]
    pub fn new(layout: BoardLayout, team_count: usize) -> Self {
        Self {
            layout,
            occupants: vec![None; CELL_COUNT],
            locked: CellSet::empty(),
            team_locked: vec![CellSet::empty(); team_count],
        }
    }

    #[must_use]
    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Per-cell and per-team tables match `team_count`, and no corner holds
    /// a chip.
    #[must_use]
    pub fn is_well_formed(&self, team_count: usize) -> bool {
        self.occupants.len() == CELL_COUNT
            && self.team_locked.len() == team_count
            && CellIndex::all().all(|cell| match self.occupant(cell) {
                Some(team) => !cell.is_corner() && team.index() < team_count,
                None => true,
            })
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.team_locked.len()
    }

    /// View of a cell, or `None` if out of range.
    #[must_use]
    pub fn cell(&self, index: CellIndex) -> Option<Cell> {
        if !index.is_valid() {
            return None;
        }
        Some(Cell {
            index,
            underlying_card: self.layout.card_at(index),
            occupant: self.occupants[index.index()],
            locked: self.locked.contains(index),
        })
    }

    #[must_use]
    pub fn occupant(&self, index: CellIndex) -> Option<TeamId> {
        self.occupants.get(index.index()).copied().flatten()
    }

    #[must_use]
    pub fn is_locked(&self, index: CellIndex) -> bool {
        self.locked.contains(index)
    }

    /// A cell a chip can be placed on: on the board, not a corner, empty.
    #[must_use]
    pub fn is_open(&self, index: CellIndex) -> bool {
        index.is_valid() && !index.is_corner() && self.occupant(index).is_none()
    }

    /// Whether the cell counts toward `team`'s lines: a corner, or a chip
    /// of that team.
    #[must_use]
    pub fn counts_for(&self, index: CellIndex, team: TeamId) -> bool {
        index.is_corner() || self.occupant(index) == Some(team)
    }

    /// Cells whose underlying card is `card` (empty for jacks).
    #[must_use]
    pub fn cells_for(&self, card: Card) -> &[CellIndex] {
        self.layout.cells_for(card)
    }

    /// Put a chip down. Returns `false` if the cell is not open.
    pub fn place_chip(&mut self, index: CellIndex, team: TeamId) -> bool {
        if !self.is_open(index) {
            return false;
        }
        self.occupants[index.index()] = Some(team);
        true
    }

    /// Take a chip off. Locked chips never come off.
    pub fn remove_chip(&mut self, index: CellIndex) -> Option<TeamId> {
        if !index.is_valid() || self.is_locked(index) {
            return None;
        }
        self.occupants[index.index()].take()
    }

    /// Lock cells as part of a counted sequence for `team`.
    pub fn lock(&mut self, cells: CellSet, team: TeamId) {
        self.locked = self.locked.union(cells);
        self.team_locked[team.index()] = self.team_locked[team.index()].union(cells);
    }

    /// All locked cells.
    #[must_use]
    pub fn locked_cells(&self) -> CellSet {
        self.locked
    }

    /// Cells of `team`'s counted sequences.
    #[must_use]
    pub fn team_locked(&self, team: TeamId) -> CellSet {
        self.team_locked[team.index()]
    }

    /// Cells a chip can be placed on.
    pub fn open_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        CellIndex::all().filter(move |&c| self.is_open(c))
    }

    /// Number of chips on the board.
    #[must_use]
    pub fn chip_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }
}
