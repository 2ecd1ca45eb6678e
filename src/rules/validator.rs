//! Move legality and classification.
//!
//! Checks run in a fixed priority order so every (card, cell) pair gets
//! exactly one answer:
//!
//! 1. cell out of range → `OutOfRange`
//! 2. two-eyed jack → `PlaceChip` on an open cell, else `CellOccupied`
//! 3. one-eyed jack → `RemoveChip` on an opponent's unlocked chip, else
//!    `SequenceProtected` (locked) or `NoRemovableChip`
//! 4. standard card → `PlaceChip` on its own open cell, else `CardMismatch`
//!    or `CellOccupied`
//!
//! Corners count as permanently occupied by the wild marker.

use crate::board::{Board, CellIndex};
use crate::cards::{Card, CardClass};
use crate::core::{Action, ActionKind, Target, TeamId};
use crate::error::RejectReason;

/// Stateless rules check over a board.
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveValidator;

impl MoveValidator {
    /// Classify playing `card` on `cell` for `team`.
    pub fn classify(board: &Board, card: Card, cell: CellIndex, team: TeamId) -> Result<ActionKind, RejectReason> {
        if !cell.is_valid() {
            return Err(RejectReason::OutOfRange);
        }

        match card.class() {
            CardClass::TwoEyedJack => {
                if board.is_open(cell) {
                    Ok(ActionKind::PlaceChip)
                } else {
                    Err(RejectReason::CellOccupied)
                }
            }
            CardClass::OneEyedJack => match board.occupant(cell) {
                Some(owner) if owner != team => {
                    if board.is_locked(cell) {
                        Err(RejectReason::SequenceProtected)
                    } else {
                        Ok(ActionKind::RemoveChip)
                    }
                }
                _ => Err(RejectReason::NoRemovableChip),
            },
            CardClass::Standard => {
                if board.layout().card_at(cell) != Some(card) {
                    Err(RejectReason::CardMismatch)
                } else if !board.is_open(cell) {
                    Err(RejectReason::CellOccupied)
                } else {
                    Ok(ActionKind::PlaceChip)
                }
            }
        }
    }

    /// A standard card whose every printed cell is occupied.
    #[must_use]
    pub fn is_dead(board: &Board, card: Card) -> bool {
        card.class() == CardClass::Standard
            && board.cells_for(card).iter().all(|&c| board.occupant(c).is_some())
    }

    /// Classify a full action, including dead-card discards.
    pub fn validate(board: &Board, action: &Action, team: TeamId) -> Result<ActionKind, RejectReason> {
        match action.target {
            Target::Cell(cell) => Self::classify(board, action.card, cell, team),
            Target::Discard => {
                if Self::is_dead(board, action.card) {
                    Ok(ActionKind::DiscardDead)
                } else {
                    Err(RejectReason::NotDead)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;
    use crate::cards::{Rank, Suit};

    const US: TeamId = TeamId(0);
    const THEM: TeamId = TeamId(1);

    fn board() -> Board {
        Board::new(BoardLayout::sequential(), 2)
    }

    fn two_diamonds() -> Card {
        Card::new(Rank::Two, Suit::Diamonds)
    }

    #[test]
    fn test_out_of_range_first() {
        let b = board();
        let jack = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(100), US), Err(RejectReason::OutOfRange));
        assert_eq!(
            MoveValidator::classify(&b, two_diamonds(), CellIndex(255), US),
            Err(RejectReason::OutOfRange)
        );
    }

    #[test]
    fn test_standard_card() {
        let mut b = board();
        // 2♦ is printed on cells 1 and 50 in the sequential layout.
        assert_eq!(MoveValidator::classify(&b, two_diamonds(), CellIndex(1), US), Ok(ActionKind::PlaceChip));
        assert_eq!(MoveValidator::classify(&b, two_diamonds(), CellIndex(2), US), Err(RejectReason::CardMismatch));
        assert_eq!(MoveValidator::classify(&b, two_diamonds(), CellIndex(0), US), Err(RejectReason::CardMismatch));

        b.place_chip(CellIndex(1), THEM);
        assert_eq!(MoveValidator::classify(&b, two_diamonds(), CellIndex(1), US), Err(RejectReason::CellOccupied));
    }

    #[test]
    fn test_two_eyed_jack() {
        let mut b = board();
        let jack = Card::new(Rank::Jack, Suit::Diamonds);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(55), US), Ok(ActionKind::PlaceChip));
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(99), US), Err(RejectReason::CellOccupied));

        b.place_chip(CellIndex(55), US);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(55), US), Err(RejectReason::CellOccupied));
    }

    #[test]
    fn test_one_eyed_jack() {
        let mut b = board();
        let jack = Card::new(Rank::Jack, Suit::Hearts);

        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(20), US), Err(RejectReason::NoRemovableChip));
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(0), US), Err(RejectReason::NoRemovableChip));

        b.place_chip(CellIndex(20), US);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(20), US), Err(RejectReason::NoRemovableChip));

        b.place_chip(CellIndex(21), THEM);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(21), US), Ok(ActionKind::RemoveChip));

        b.lock([CellIndex(21)].into_iter().collect(), THEM);
        assert_eq!(MoveValidator::classify(&b, jack, CellIndex(21), US), Err(RejectReason::SequenceProtected));
    }

    #[test]
    fn test_dead_card() {
        let mut b = board();
        let card = two_diamonds();
        assert!(!MoveValidator::is_dead(&b, card));
        assert_eq!(
            MoveValidator::validate(&b, &Action::discard(card), US),
            Err(RejectReason::NotDead)
        );

        b.place_chip(CellIndex(1), US);
        assert!(!MoveValidator::is_dead(&b, card));

        b.place_chip(CellIndex(50), THEM);
        assert!(MoveValidator::is_dead(&b, card));
        assert_eq!(
            MoveValidator::validate(&b, &Action::discard(card), US),
            Ok(ActionKind::DiscardDead)
        );
    }

    #[test]
    fn test_jacks_are_never_dead() {
        let b = board();
        for suit in Suit::ALL {
            assert!(!MoveValidator::is_dead(&b, Card::new(Rank::Jack, suit)));
        }
    }

    #[test]
    fn test_every_pair_gets_one_answer_and_no_mutation() {
        let mut b = board();
        b.place_chip(CellIndex(33), THEM);
        b.place_chip(CellIndex(34), US);
        let before = b.clone();

        for card in Card::all() {
            for raw in 0..=110u8 {
                let _ = MoveValidator::classify(&b, card, CellIndex(raw), US);
            }
        }
        assert_eq!(b, before);
    }
}
