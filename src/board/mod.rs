//! The 100-cell board: layout, chip occupancy, locks, and sequence detection.

mod grid;
mod layout;
mod sequence;

pub use grid::{Board, Cell, CellIndex, CellSet, BOARD_SIDE, CELL_COUNT};
pub use layout::BoardLayout;
pub use sequence::{
    line_run, run_length, win_threshold, Axis, CompletedSequence, SequenceDetector, SequenceOutcome,
    SEQUENCE_LENGTH,
};
