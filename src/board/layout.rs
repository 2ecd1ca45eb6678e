//! Injectable mapping from cell to underlying card.
//!
//! The engine never assumes a particular visual arrangement. Callers hand a
//! layout in at game creation; it is validated once and then fixed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{CellIndex, CELL_COUNT};
use crate::cards::Card;
use crate::error::SetupError;

/// Validated cell → card mapping.
///
/// Invariants: 100 entries; the four corners are `None`; every other cell
/// holds a non-jack card; every non-jack card appears on exactly two cells.
///
/// Serializes as its plain cell list and re-validates on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Card>>", into = "Vec<Option<Card>>")]
pub struct BoardLayout {
    cells: Vec<Option<Card>>,
    /// Indexed by `Card::ordinal()`.
    positions: Vec<SmallVec<[CellIndex; 2]>>,
}

impl BoardLayout {
    /// Validate a caller-supplied layout.
    pub fn new(cells: Vec<Option<Card>>) -> Result<Self, SetupError> {
        if cells.len() != CELL_COUNT {
            return Err(SetupError::InvalidLayout(format!(
                "expected {CELL_COUNT} cells, got {}",
                cells.len()
            )));
        }

        for (i, entry) in cells.iter().enumerate() {
            let cell = CellIndex(i as u8);
            match (cell.is_corner(), entry) {
                (true, Some(card)) => {
                    return Err(SetupError::InvalidLayout(format!(
                        "corner {cell} must be wild, found {card}"
                    )));
                }
                (false, None) => {
                    return Err(SetupError::InvalidLayout(format!("cell {cell} has no card")));
                }
                (false, Some(card)) if card.is_jack() => {
                    return Err(SetupError::InvalidLayout(format!(
                        "jacks cannot be printed on the board ({card} at {cell})"
                    )));
                }
                _ => {}
            }
        }

        let positions = Self::index(&cells);
        if let Some(card) = Card::board_cards().find(|c| positions[c.ordinal()].len() != 2) {
            return Err(SetupError::InvalidLayout(format!(
                "{card} appears {} times, expected 2",
                positions[card.ordinal()].len()
            )));
        }

        Ok(Self { cells, positions })
    }

    /// A deterministic generated layout: the 48 board cards in ordinal order
    /// fill the non-corner cells row by row, twice over.
    ///
    /// Meant for tests, simulations and benchmarks; it is not a printed
    /// board design.
    #[must_use]
    pub fn sequential() -> Self {
        let board_cards: Vec<Card> = Card::board_cards().collect();
        let mut cells = Vec::with_capacity(CELL_COUNT);
        let mut k = 0;
        for i in 0..CELL_COUNT {
            if CellIndex(i as u8).is_corner() {
                cells.push(None);
            } else {
                cells.push(Some(board_cards[k % board_cards.len()]));
                k += 1;
            }
        }
        let positions = Self::index(&cells);
        Self { cells, positions }
    }

    fn index(cells: &[Option<Card>]) -> Vec<SmallVec<[CellIndex; 2]>> {
        let mut positions = vec![SmallVec::new(); Card::DISTINCT];
        for (i, entry) in cells.iter().enumerate() {
            if let Some(card) = entry {
                positions[card.ordinal()].push(CellIndex(i as u8));
            }
        }
        positions
    }

    /// Underlying card of a cell (`None` for corners and out-of-range).
    #[must_use]
    pub fn card_at(&self, cell: CellIndex) -> Option<Card> {
        self.cells.get(cell.index()).copied().flatten()
    }

    /// The cells printed with `card`, ascending.
    #[must_use]
    pub fn cells_for(&self, card: Card) -> &[CellIndex] {
        &self.positions[card.ordinal()]
    }

    /// The raw cell list.
    #[must_use]
    pub fn cells(&self) -> &[Option<Card>] {
        &self.cells
    }
}

impl TryFrom<Vec<Option<Card>>> for BoardLayout {
    type Error = SetupError;

    fn try_from(cells: Vec<Option<Card>>) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

impl From<BoardLayout> for Vec<Option<Card>> {
    fn from(layout: BoardLayout) -> Self {
        layout.cells
    }
}
