//! Cards: identities, the 104-instance catalog, and the deck tracker.
//!
//! ## Structure
//!
//! - `Card`: rank × suit value with a pure [`CardClass`] classification
//! - `CardId`: one of the 104 physical instances (two per identity)
//! - `DeckTracker`: draw pile, discard pile and in-play markers

mod card;
mod catalog;
mod deck;

pub use card::{Card, CardClass, Rank, Suit};
pub use catalog::{CardCatalog, CardId};
pub use deck::{CardLocation, DeckTracker};
