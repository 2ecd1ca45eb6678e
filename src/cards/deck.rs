//! Draw pile, discard pile and in-play bookkeeping for the 104 instances.
//!
//! The tracker owns every card that is not in a hand. Hands live in the
//! game aggregate, so [`DeckTracker::verify_integrity`] takes the number of
//! cards held there.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::{CardCatalog, CardId};
use crate::core::GameRng;
use crate::error::DeckError;

/// Where a physical card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardLocation {
    InDeck,
    InDiscard,
    InHand(crate::core::PlayerId),
    OnBoard(crate::board::CellIndex),
}

/// Shuffled draw pile (top = end of vec), discard pile and in-play set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckTracker {
    deck: Vec<CardId>,
    discard: Vec<CardId>,
    in_play: OrdSet<CardId>,
}

impl DeckTracker {
    /// An empty tracker; call [`shuffle_new_game`](Self::shuffle_new_game)
    /// before drawing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to all 104 cards in the deck, shuffled. Clears discard and
    /// in-play.
    pub fn shuffle_new_game(&mut self, rng: &mut GameRng) {
        self.deck = CardCatalog::all_ids().collect();
        rng.shuffle(&mut self.deck);
        self.discard.clear();
        self.in_play = OrdSet::new();
    }

    /// Draw the top card, reshuffling the discard pile into the deck first
    /// if the deck is empty.
    pub fn draw_card(&mut self, rng: &mut GameRng) -> Result<CardId, DeckError> {
        if self.deck.is_empty() {
            self.reshuffle_discards(rng);
        }
        self.deck.pop().ok_or(DeckError::EmptySupply)
    }

    /// Draw up to `n` cards. Returns fewer if the supply runs out.
    pub fn draw_cards(&mut self, n: usize, rng: &mut GameRng) -> Vec<CardId> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw_card(rng) {
                Ok(card) => drawn.push(card),
                Err(DeckError::EmptySupply) => break,
            }
        }
        drawn
    }

    /// Move a card into the discard pile from wherever the tracker has it.
    /// Clears its in-play marker.
    pub fn discard(&mut self, card: CardId) {
        self.deck.retain(|&c| c != card);
        self.in_play.remove(&card);
        if !self.discard.contains(&card) {
            self.discard.push(card);
        }
    }

    /// Mark a card as backing a chip on the board.
    ///
    /// Returns `false` if it was already marked.
    pub fn place_on_board(&mut self, card: CardId) -> bool {
        self.in_play.insert(card).is_none()
    }

    /// Clear a card's in-play marker.
    ///
    /// Returns `false` if it was not marked.
    pub fn remove_from_board(&mut self, card: CardId) -> bool {
        self.in_play.remove(&card).is_some()
    }

    /// Move every discarded card into the deck and shuffle.
    ///
    /// No-op unless the deck is empty and the discard pile is not.
    /// Returns whether a reshuffle happened.
    pub fn reshuffle_discards(&mut self, rng: &mut GameRng) -> bool {
        if !self.deck.is_empty() || self.discard.is_empty() {
            return false;
        }
        self.deck = std::mem::take(&mut self.discard);
        rng.shuffle(&mut self.deck);
        debug!(cards = self.deck.len(), "reshuffled discard pile into deck");
        true
    }

    /// Remove a specific card from the deck or discard pile.
    ///
    /// Used when setting up scenarios. Returns `false` if the card is in
    /// neither pile.
    pub fn take_from_supply(&mut self, card: CardId) -> bool {
        if let Some(pos) = self.deck.iter().position(|&c| c == card) {
            self.deck.remove(pos);
            true
        } else if let Some(pos) = self.discard.iter().position(|&c| c == card) {
            self.discard.remove(pos);
            true
        } else {
            false
        }
    }

    /// Put a card back on top of the deck.
    pub fn return_to_deck(&mut self, card: CardId) {
        self.deck.push(card);
    }

    /// Check that deck + discard + in-play + `held_externally` accounts for
    /// exactly 104 cards with no card in two piles at once.
    #[must_use]
    pub fn verify_integrity(&self, held_externally: usize) -> bool {
        let mut seen = [false; CardCatalog::TOTAL];
        let tracked = self
            .deck
            .iter()
            .chain(self.discard.iter())
            .chain(self.in_play.iter());
        for card in tracked {
            let Some(slot) = seen.get_mut(card.index()) else {
                return false;
            };
            if *slot {
                return false;
            }
            *slot = true;
        }
        self.tracked_count() + held_externally == CardCatalog::TOTAL
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    #[must_use]
    pub fn in_play_count(&self) -> usize {
        self.in_play.len()
    }

    /// Cards in deck, discard and in-play combined.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.in_play.len()
    }

    #[must_use]
    pub fn is_in_deck(&self, card: CardId) -> bool {
        self.deck.contains(&card)
    }

    #[must_use]
    pub fn is_in_discard(&self, card: CardId) -> bool {
        self.discard.contains(&card)
    }

    #[must_use]
    pub fn is_in_play(&self, card: CardId) -> bool {
        self.in_play.contains(&card)
    }

    /// Top of the discard pile, if any.
    #[must_use]
    pub fn last_discard(&self) -> Option<CardId> {
        self.discard.last().copied()
    }
}
