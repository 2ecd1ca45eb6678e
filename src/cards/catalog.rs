//! The fixed catalog of 104 physical card instances.
//!
//! Instance ids are stable: `CardId(i)` is copy `i / 52` of
//! `Card::from_ordinal(i % 52)`. Instances are never created or destroyed
//! after a game starts; they only move between locations.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// One physical card instance (`0..104`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

/// Lookup between physical instances and card identities.
///
/// ```
/// use fiva_engine::cards::{Card, CardCatalog, Rank, Suit};
///
/// let queen = Card::new(Rank::Queen, Suit::Hearts);
/// let [a, b] = CardCatalog::instances_of(queen);
/// assert_ne!(a, b);
/// assert_eq!(CardCatalog::card(a), queen);
/// assert_eq!(CardCatalog::card(b), queen);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CardCatalog;

impl CardCatalog {
    /// Copies of each card identity.
    pub const COPIES: usize = 2;

    /// Total physical cards.
    pub const TOTAL: usize = Card::DISTINCT * Self::COPIES;

    /// Identity of a physical instance.
    ///
    /// Panics if `id` is outside `0..104`; ids are only minted by this catalog.
    #[must_use]
    pub fn card(id: CardId) -> Card {
        assert!(id.index() < Self::TOTAL, "{id} is outside the catalog");
        match Card::from_ordinal(id.index() % Card::DISTINCT) {
            Some(card) => card,
            None => unreachable!("ordinal below 52 always maps to a card"),
        }
    }

    /// Both physical instances of a card identity.
    #[must_use]
    pub fn instances_of(card: Card) -> [CardId; 2] {
        let base = card.ordinal() as u8;
        [CardId(base), CardId(base + Card::DISTINCT as u8)]
    }

    /// All instance ids in catalog order.
    pub fn all_ids() -> impl Iterator<Item = CardId> {
        (0..Self::TOTAL as u8).map(CardId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_exactly_two_instances_per_identity() {
        let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
        for id in CardCatalog::all_ids() {
            *counts.entry(CardCatalog::card(id)).or_default() += 1;
        }

        assert_eq!(CardCatalog::all_ids().count(), 104);
        assert_eq!(counts.len(), 52);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_instances_of_is_inverse() {
        for card in Card::all() {
            for id in CardCatalog::instances_of(card) {
                assert_eq!(CardCatalog::card(id), card);
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside the catalog")]
    fn test_card_out_of_range_panics() {
        let _ = CardCatalog::card(CardId(104));
    }
}
