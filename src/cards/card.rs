//! Card identity and classification.
//!
//! A `Card` is a value (rank × suit). Two physical copies of every card
//! exist in play; those are tracked separately as [`CardId`](super::CardId).

use serde::{Deserialize, Serialize};

/// Card rank. Ordered from Two (lowest) to Ace (highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// 0-based position within [`Rank::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize - 2
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Hearts,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

/// How a card behaves when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    /// Places a chip on one of its two matching cells.
    Standard,
    /// Jack of diamonds or clubs: places a chip on any open cell.
    TwoEyedJack,
    /// Jack of hearts or spades: removes an unlocked opponent chip.
    OneEyedJack,
}

/// Card identity. Orders by rank, then suit.
///
/// ```
/// use fiva_engine::cards::{Card, CardClass, Rank, Suit};
///
/// assert_eq!(Card::new(Rank::Jack, Suit::Clubs).class(), CardClass::TwoEyedJack);
/// assert_eq!(Card::new(Rank::Jack, Suit::Spades).class(), CardClass::OneEyedJack);
/// assert_eq!(Card::new(Rank::Queen, Suit::Spades).class(), CardClass::Standard);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Number of distinct card identities.
    pub const DISTINCT: usize = 52;

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index in `0..52`, suit-major.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self.suit.ordinal() * 13 + self.rank.ordinal()
    }

    /// Inverse of [`Card::ordinal`].
    #[must_use]
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        let suit = *Suit::ALL.get(ordinal / 13)?;
        let rank = Rank::ALL[ordinal % 13];
        Some(Self { rank, suit })
    }

    #[must_use]
    pub const fn class(self) -> CardClass {
        match (self.rank, self.suit) {
            (Rank::Jack, Suit::Diamonds | Suit::Clubs) => CardClass::TwoEyedJack,
            (Rank::Jack, Suit::Hearts | Suit::Spades) => CardClass::OneEyedJack,
            _ => CardClass::Standard,
        }
    }

    #[must_use]
    pub const fn is_jack(self) -> bool {
        matches!(self.rank, Rank::Jack)
    }

    /// Every card identity, in ordinal order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::DISTINCT).filter_map(Card::from_ordinal)
    }

    /// Every card that can appear on the board (all but the jacks).
    pub fn board_cards() -> impl Iterator<Item = Card> {
        Self::all().filter(|c| !c.is_jack())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_round_trip_covers_deck() {
        let all: Vec<_> = Card::all().collect();
        assert_eq!(all.len(), 52);
        for (i, card) in all.iter().enumerate() {
            assert_eq!(card.ordinal(), i);
        }
        assert_eq!(Card::from_ordinal(52), None);
    }

    #[test]
    fn test_jack_classification() {
        let classes: Vec<_> = Suit::ALL
            .iter()
            .map(|&s| Card::new(Rank::Jack, s).class())
            .collect();
        assert_eq!(
            classes,
            vec![
                CardClass::TwoEyedJack,
                CardClass::OneEyedJack,
                CardClass::TwoEyedJack,
                CardClass::OneEyedJack,
            ]
        );
        assert_eq!(Card::board_cards().count(), 48);
        assert!(Card::board_cards().all(|c| c.class() == CardClass::Standard));
    }

    #[test]
    fn test_ordering_is_rank_major() {
        let two_spades = Card::new(Rank::Two, Suit::Spades);
        let three_diamonds = Card::new(Rank::Three, Suit::Diamonds);
        assert!(two_spades < three_diamonds);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10♥");
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "A♠");
    }
}
