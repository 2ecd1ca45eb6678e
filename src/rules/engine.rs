//! The turn engine: the single owner of all mutable game state.
//!
//! A [`Game`] holds the board, the deck tracker, every hand and the public
//! progression state. [`Game::apply_action`] is the only way a move changes
//! any of them, and it either applies a move completely or not at all.
//!
//! A turn is: validate → mutate board and deck → scan for sequences →
//! draw a replacement (unless the game just ended) → pass the turn on.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::validator::MoveValidator;
use crate::board::{Board, BoardLayout, CellIndex, CompletedSequence, SequenceDetector, CELL_COUNT};
use crate::cards::{Card, CardCatalog, CardClass, CardId, CardLocation, DeckTracker};
use crate::core::{
    Action, ActionKind, ActionRecord, GameConfig, GamePhase, GameRng, GameState, LegalAction, PlayerId,
    PlayerMap, Target, TeamId,
};
use crate::error::{DeckError, RejectReason, SetupError};

/// What happened during one applied turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: PlayerId,
    pub action: LegalAction,
    /// Sequences counted by this move.
    pub sequences: SmallVec<[CompletedSequence; 2]>,
    /// Team whose chip was removed by a one-eyed jack.
    pub removed_from: Option<TeamId>,
    /// Set if this move ended the game with a winner.
    pub winner: Option<TeamId>,
    pub game_over: bool,
    /// Replacement card drawn into the acting player's hand.
    pub drawn: Option<Card>,
    /// The replacement draw failed because deck and discard were empty.
    pub supply_exhausted: bool,
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    deck: DeckTracker,
    hands: PlayerMap<Vec<CardId>>,
    /// Card instance backing the chip on each cell.
    chip_cards: Vec<Option<CardId>>,
    detector: SequenceDetector,
    state: GameState,
    rng: GameRng,
}

impl Game {
    /// Validate the table, shuffle, and deal.
    ///
    /// ```
    /// use fiva_engine::board::BoardLayout;
    /// use fiva_engine::core::{GamePhase, PlayerId};
    /// use fiva_engine::rules::Game;
    ///
    /// let game = Game::new_game(2, 2, BoardLayout::sequential(), 7).unwrap();
    /// assert_eq!(game.phase(), GamePhase::Playing);
    /// assert_eq!(game.hand(PlayerId::new(0)).len(), 7);
    /// assert_eq!(game.deck().deck_count(), 104 - 2 * 7);
    /// ```
    pub fn new_game(
        player_count: usize,
        team_count: usize,
        layout: BoardLayout,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let config = GameConfig::new(player_count, team_count)?.with_seed(seed);
        Self::new(config, layout)
    }

    /// Start a game from an explicit configuration.
    pub fn new(config: GameConfig, layout: BoardLayout) -> Result<Self, SetupError> {
        if config.team_count == 0 || config.player_count < config.team_count {
            return Err(SetupError::InvalidTeamCount(config.team_count));
        }
        if config.player_count % config.team_count != 0 {
            return Err(SetupError::UnevenTeams {
                players: config.player_count,
                teams: config.team_count,
            });
        }
        if config.player_count * config.hand_size > CardCatalog::TOTAL {
            return Err(SetupError::InvalidPlayerCount(config.player_count));
        }

        let mut game = Self {
            board: Board::new(layout, config.team_count),
            deck: DeckTracker::new(),
            hands: PlayerMap::with_default(config.player_count),
            chip_cards: vec![None; CELL_COUNT],
            detector: SequenceDetector::new(config.max_shared_cells),
            state: GameState::new(config.team_count, config.win_threshold),
            rng: GameRng::new(config.seed),
            config,
        };
        game.deal();
        Ok(game)
    }

    /// Shuffle and deal one card at a time around the table.
    fn deal(&mut self) {
        self.deck.shuffle_new_game(&mut self.rng);
        for _ in 0..self.config.hand_size {
            for player in PlayerId::all(self.config.player_count) {
                if let Ok(card) = self.deck.draw_card(&mut self.rng) {
                    self.hands[player].push(card);
                }
            }
        }
        self.state.phase = GamePhase::Playing;
        info!(
            players = self.config.player_count,
            teams = self.config.team_count,
            hand_size = self.config.hand_size,
            seed = self.config.seed,
            "game started"
        );
        self.seat_first_able(0);
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &DeckTracker {
        &self.deck
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn detector(&self) -> &SequenceDetector {
        &self.detector
    }

    /// The game's RNG. AI code derives context streams from it without
    /// advancing it.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player
    }

    #[must_use]
    pub fn winner(&self) -> Option<TeamId> {
        self.state.winner
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn team_count(&self) -> usize {
        self.config.team_count
    }

    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> TeamId {
        player.team(self.config.team_count)
    }

    /// Counted sequences for a team.
    #[must_use]
    pub fn sequences_completed(&self, team: TeamId) -> u32 {
        self.state.sequences[team]
    }

    /// Card identities in a player's hand (empty for unknown players).
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Vec<Card> {
        self.hand_ids(player).iter().map(|&id| CardCatalog::card(id)).collect()
    }

    /// Physical instances in a player's hand.
    #[must_use]
    pub fn hand_ids(&self, player: PlayerId) -> &[CardId] {
        if self.hands.contains(player) {
            &self.hands[player]
        } else {
            &[]
        }
    }

    /// Cards held across all hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.hands.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_dead(&self, card: Card) -> bool {
        MoveValidator::is_dead(&self.board, card)
    }

    /// Dead cards in a player's hand, deduplicated.
    #[must_use]
    pub fn dead_cards(&self, player: PlayerId) -> Vec<Card> {
        let mut dead: Vec<Card> = self.hand(player).into_iter().filter(|&c| self.is_dead(c)).collect();
        dead.sort_unstable();
        dead.dedup();
        dead
    }

    /// Everything the validator accepts for this player's hand, in
    /// tie-break order (cell, then card; discards last).
    ///
    /// Does not check whose turn it is. Empty once the game is over.
    #[must_use]
    pub fn legal_actions(&self, player: PlayerId) -> Vec<LegalAction> {
        if !self.state.is_playing() || !self.hands.contains(player) {
            return Vec::new();
        }
        let team = self.team_of(player);

        let cards: FxHashSet<Card> = self.hand(player).into_iter().collect();

        let mut actions = Vec::new();
        for card in cards {
            let cells: Vec<CellIndex> = match card.class() {
                CardClass::Standard => self.board.cells_for(card).to_vec(),
                CardClass::TwoEyedJack | CardClass::OneEyedJack => CellIndex::all().collect(),
            };
            for cell in cells {
                if let Ok(kind) = MoveValidator::classify(&self.board, card, cell, team) {
                    actions.push(LegalAction {
                        action: Action::play(card, cell),
                        kind,
                    });
                }
            }
            if self.is_dead(card) {
                actions.push(LegalAction {
                    action: Action::discard(card),
                    kind: ActionKind::DiscardDead,
                });
            }
        }

        actions.sort_by_key(|a| a.action.tie_break_key());
        actions
    }

    /// Check a move without applying it.
    pub fn validate_action(&self, player: PlayerId, action: &Action) -> Result<LegalAction, RejectReason> {
        self.check(player, action).map(|(_, legal)| legal)
    }

    /// Validate and find the hand slot holding the played card.
    fn check(&self, player: PlayerId, action: &Action) -> Result<(usize, LegalAction), RejectReason> {
        if !self.state.is_playing() {
            return Err(RejectReason::GameNotInProgress);
        }
        if !self.hands.contains(player) {
            return Err(RejectReason::UnknownPlayer);
        }
        if player != self.state.active_player {
            return Err(RejectReason::NotYourTurn);
        }
        let slot = self.hands[player]
            .iter()
            .position(|&id| CardCatalog::card(id) == action.card)
            .ok_or(RejectReason::CardNotInHand)?;

        let kind = MoveValidator::validate(&self.board, action, self.team_of(player))?;
        Ok((slot, LegalAction { action: *action, kind }))
    }

    // === Mutation ===

    /// Apply one move for `player`.
    ///
    /// On rejection nothing changes and the reason is returned.
    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<TurnOutcome, RejectReason> {
        let (slot, legal) = self.check(player, &action)?;
        let team = self.team_of(player);
        let card_id = self.hands[player].remove(slot);

        let mut removed_from = None;
        let mut sequences = SmallVec::new();
        let mut winner = None;

        match (legal.kind, action.target) {
            (ActionKind::PlaceChip, Target::Cell(cell)) => {
                self.board.place_chip(cell, team);
                self.chip_cards[cell.index()] = Some(card_id);
                self.deck.place_on_board(card_id);
            }
            (ActionKind::RemoveChip, Target::Cell(cell)) => {
                removed_from = self.board.remove_chip(cell);
                if let Some(backing) = self.chip_cards[cell.index()].take() {
                    self.deck.remove_from_board(backing);
                    self.deck.discard(backing);
                }
                self.deck.discard(card_id);
            }
            // DiscardDead
            _ => self.deck.discard(card_id),
        }

        if let Target::Cell(cell) = action.target {
            let outcome = self.detector.apply(
                &mut self.board,
                &mut self.state.sequences,
                self.state.win_threshold,
                cell,
                team,
            );
            sequences = outcome.sequences;
            winner = outcome.winner;
        }

        debug!(
            player = player.0,
            card = %action.card,
            kind = ?legal.kind,
            cell = ?action.cell(),
            "action applied"
        );

        self.state.record_action(ActionRecord {
            player,
            action,
            kind: legal.kind,
            turn: self.state.turn_number,
        });

        if let Some(team) = winner {
            self.state.finish(Some(team));
            info!(team = team.0, turn = self.state.turn_number, "game over");
        }

        let mut drawn = None;
        let mut supply_exhausted = false;
        if !self.state.is_over() {
            match self.deck.draw_card(&mut self.rng) {
                Ok(id) => {
                    self.hands[player].push(id);
                    drawn = Some(CardCatalog::card(id));
                }
                Err(DeckError::EmptySupply) => {
                    supply_exhausted = true;
                    warn!(player = player.0, "no card left to replenish hand");
                }
            }
            self.advance_turn();
        }

        debug_assert!(self.check_conservation(), "card conservation violated");

        Ok(TurnOutcome {
            player,
            action: legal,
            sequences,
            removed_from,
            winner,
            game_over: self.state.is_over(),
            drawn,
            supply_exhausted,
        })
    }

    /// Pass the turn to the next seat that can act.
    fn advance_turn(&mut self) {
        self.state.turn_number += 1;
        let next = self.state.active_player.index() + 1;
        self.seat_first_able(next);
    }

    /// Give the turn to the first seat, starting at `from` and wrapping
    /// around, that has a legal action. Ends the game in a draw if nobody
    /// has one. Leaves the turn number alone.
    fn seat_first_able(&mut self, from: usize) {
        let count = self.config.player_count;
        for step in 0..count {
            let seat = PlayerId::new(((from + step) % count) as u8);
            if !self.legal_actions(seat).is_empty() {
                self.state.active_player = seat;
                return;
            }
        }

        self.state.finish(None);
        info!(turn = self.state.turn_number, "game over: no player can move");
    }

    // === Integrity ===

    /// Table sizes agree with the config and every card sits in exactly
    /// one place. Checked on decoded snapshots before they are used.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let players = self.config.player_count;
        let teams = self.config.team_count;
        let shape = teams > 0
            && players >= teams
            && players % teams == 0
            && self.hands.player_count() == players
            && self.chip_cards.len() == CELL_COUNT
            && self.state.sequences.team_count() == teams
            && self.board.is_well_formed(teams)
            && self.state.active_player.index() < players
            && self.state.winner.map_or(true, |team| team.index() < teams);
        shape && self.check_conservation()
    }

    /// Where a physical card is right now.
    #[must_use]
    pub fn card_location(&self, card: CardId) -> Option<CardLocation> {
        if let Some((player, _)) = self.hands.iter().find(|(_, hand)| hand.contains(&card)) {
            return Some(CardLocation::InHand(player));
        }
        if let Some(cell) = self.chip_cards.iter().position(|&c| c == Some(card)) {
            return Some(CardLocation::OnBoard(CellIndex(cell as u8)));
        }
        if self.deck.is_in_deck(card) {
            return Some(CardLocation::InDeck);
        }
        if self.deck.is_in_discard(card) {
            return Some(CardLocation::InDiscard);
        }
        None
    }

    /// Recheck that all 104 cards sit in exactly one of deck, discard,
    /// board or a hand, and that chips and their backing cards agree.
    #[must_use]
    pub fn check_conservation(&self) -> bool {
        let mut seen = [false; CardCatalog::TOTAL];
        let held = self.hands.values().flatten();
        let on_board = self.chip_cards.iter().flatten();
        for &id in held.chain(on_board) {
            let Some(slot) = seen.get_mut(id.index()) else {
                return false;
            };
            if *slot {
                return false;
            }
            *slot = true;
        }

        for &id in self.hands.values().flatten() {
            if self.deck.is_in_deck(id) || self.deck.is_in_discard(id) || self.deck.is_in_play(id) {
                return false;
            }
        }

        for cell in CellIndex::all() {
            let backing = self.chip_cards[cell.index()];
            let occupied = self.board.occupant(cell).is_some();
            match backing {
                Some(id) if !occupied || !self.deck.is_in_play(id) => return false,
                None if occupied => return false,
                _ => {}
            }
        }

        self.deck.in_play_count() == self.board.chip_count() && self.deck.verify_integrity(self.cards_in_hands())
    }

    // === Scenario setup ===

    /// Replace a player's hand with specific cards taken from the deck or
    /// discard pile. The previous hand goes back on the deck.
    ///
    /// For puzzles and tests; fails without changes if a card has no free
    /// instance.
    pub fn setup_hand(&mut self, player: PlayerId, cards: &[Card]) -> Result<(), SetupError> {
        if !self.hands.contains(player) {
            return Err(SetupError::Scenario(format!("{player} is not seated")));
        }

        let mut plan: Vec<CardId> = Vec::with_capacity(cards.len());
        for &card in cards {
            let free = CardCatalog::instances_of(card).into_iter().find(|&id| {
                !plan.contains(&id)
                    && (self.hands[player].contains(&id) || self.deck.is_in_deck(id) || self.deck.is_in_discard(id))
            });
            match free {
                Some(id) => plan.push(id),
                None => {
                    return Err(SetupError::Scenario(format!("no free copy of {card}")));
                }
            }
        }

        for id in std::mem::take(&mut self.hands[player]) {
            self.deck.return_to_deck(id);
        }
        for &id in &plan {
            self.deck.take_from_supply(id);
        }
        self.hands[player] = plan;
        Ok(())
    }

    /// Put a chip on a cell, backed by one of the cell's card instances
    /// taken from the deck or discard pile. Does not score sequences.
    pub fn setup_chip(&mut self, cell: CellIndex, team: TeamId) -> Result<(), SetupError> {
        if team.index() >= self.config.team_count {
            return Err(SetupError::Scenario(format!("{team} does not exist")));
        }
        if !self.board.is_open(cell) {
            return Err(SetupError::Scenario(format!("cell {cell} is not open")));
        }
        let Some(card) = self.board.layout().card_at(cell) else {
            return Err(SetupError::Scenario(format!("cell {cell} has no card")));
        };
        let Some(id) = CardCatalog::instances_of(card)
            .into_iter()
            .find(|&id| self.deck.is_in_deck(id) || self.deck.is_in_discard(id))
        else {
            return Err(SetupError::Scenario(format!("no free copy of {card} for {cell}")));
        };

        self.deck.take_from_supply(id);
        self.deck.place_on_board(id);
        self.board.place_chip(cell, team);
        self.chip_cards[cell.index()] = Some(id);
        Ok(())
    }

    /// Hand the turn to a specific player.
    pub fn setup_active_player(&mut self, player: PlayerId) -> Result<(), SetupError> {
        if !self.hands.contains(player) {
            return Err(SetupError::Scenario(format!("{player} is not seated")));
        }
        self.state.active_player = player;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// Two-player table with every card back in the supply except a
    /// K♠/Q♠ hand for P1, so scenario setup never collides with the deal.
    fn game() -> Game {
        let mut g = Game::new_game(2, 2, BoardLayout::sequential(), 42).unwrap();
        g.setup_hand(P0, &[]).unwrap();
        g.setup_hand(P1, &[card(Rank::King, Suit::Spades), card(Rank::Queen, Suit::Spades)])
            .unwrap();
        g
    }

    #[test]
    fn test_new_game_deals() {
        let g = Game::new_game(2, 2, BoardLayout::sequential(), 42).unwrap();
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.active_player(), P0);
        assert_eq!(g.hand(P0).len(), 7);
        assert_eq!(g.hand(P1).len(), 7);
        assert_eq!(g.deck().deck_count(), 90);
        assert!(g.check_conservation());
    }

    #[test]
    fn test_new_game_rejects_bad_counts() {
        assert_eq!(
            Game::new_game(1, 2, BoardLayout::sequential(), 1).unwrap_err(),
            SetupError::InvalidPlayerCount(1)
        );
        assert_eq!(
            Game::new_game(6, 4, BoardLayout::sequential(), 1).unwrap_err(),
            SetupError::InvalidTeamCount(4)
        );
    }

    #[test]
    fn test_place_chip_turn() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_hand(P0, &[two, card(Rank::Five, Suit::Clubs)]).unwrap();

        let outcome = g.apply_action(P0, Action::play(two, CellIndex(1))).unwrap();
        assert_eq!(outcome.action.kind, ActionKind::PlaceChip);
        assert!(outcome.drawn.is_some());
        assert!(!outcome.game_over);
        assert_eq!(g.board().occupant(CellIndex(1)), Some(TeamId(0)));
        assert_eq!(g.hand(P0).len(), 2);
        assert_eq!(g.active_player(), P1);
        assert_eq!(g.state().turn_number, 2);
        assert_eq!(g.deck().in_play_count(), 1);
        assert!(g.check_conservation());
    }

    #[test]
    fn test_rejection_changes_nothing() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_hand(P0, &[two]).unwrap();
        let before = g.clone();

        assert_eq!(
            g.apply_action(P0, Action::play(two, CellIndex(2))),
            Err(RejectReason::CardMismatch)
        );
        assert_eq!(
            g.apply_action(P1, Action::play(two, CellIndex(1))),
            Err(RejectReason::NotYourTurn)
        );
        assert_eq!(
            g.apply_action(P0, Action::play(card(Rank::Ace, Suit::Spades), CellIndex(1))),
            Err(RejectReason::CardNotInHand)
        );
        assert_eq!(
            g.apply_action(PlayerId(9), Action::play(two, CellIndex(1))),
            Err(RejectReason::UnknownPlayer)
        );
        assert_eq!(
            g.apply_action(P0, Action::play(two, CellIndex(120))),
            Err(RejectReason::OutOfRange)
        );
        assert_eq!(g, before);
    }

    #[test]
    fn test_one_eyed_jack_discards_both_cards() {
        let mut g = game();
        let jack = card(Rank::Jack, Suit::Spades);
        g.setup_chip(CellIndex(12), TeamId(1)).unwrap();
        g.setup_hand(P0, &[jack]).unwrap();
        let discards = g.deck().discard_count();

        let outcome = g.apply_action(P0, Action::play(jack, CellIndex(12))).unwrap();
        assert_eq!(outcome.action.kind, ActionKind::RemoveChip);
        assert_eq!(outcome.removed_from, Some(TeamId(1)));
        assert_eq!(g.board().occupant(CellIndex(12)), None);
        assert_eq!(g.deck().discard_count(), discards + 2);
        assert_eq!(g.deck().in_play_count(), 0);
        assert!(g.check_conservation());
    }

    #[test]
    fn test_dead_card_discard_turn() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_chip(CellIndex(1), TeamId(0)).unwrap();
        g.setup_chip(CellIndex(50), TeamId(1)).unwrap();
        g.setup_hand(P0, &[two]).unwrap();

        assert!(g.is_dead(two));
        assert_eq!(g.dead_cards(P0), vec![two]);
        let legal = g.legal_actions(P0);
        assert_eq!(legal.len(), 1);
        assert_eq!(legal[0].kind, ActionKind::DiscardDead);

        let outcome = g.apply_action(P0, Action::discard(two)).unwrap();
        assert_eq!(outcome.action.kind, ActionKind::DiscardDead);
        assert!(outcome.sequences.is_empty());
        assert_eq!(g.active_player(), P1);
        assert!(g.check_conservation());
    }

    #[test]
    fn test_discarding_live_card_rejected() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_hand(P0, &[two]).unwrap();
        assert_eq!(g.apply_action(P0, Action::discard(two)), Err(RejectReason::NotDead));
    }

    #[test]
    fn test_completing_sequence_wins() {
        let mut g = game();
        // Row 1 cells 11..=14 for team 0, then play the card on 15.
        for raw in 11..15 {
            g.setup_chip(CellIndex(raw), TeamId(0)).unwrap();
        }
        let target = g.board().layout().card_at(CellIndex(15)).unwrap();
        g.setup_hand(P0, &[target]).unwrap();

        let outcome = g.apply_action(P0, Action::play(target, CellIndex(15))).unwrap();
        assert_eq!(outcome.sequences.len(), 1);
        assert_eq!(outcome.winner, Some(TeamId(0)));
        assert!(outcome.game_over);
        assert!(outcome.drawn.is_none());
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.winner(), Some(TeamId(0)));
        assert_eq!(g.sequences_completed(TeamId(0)), 1);
        assert!(g.legal_actions(P1).is_empty());
        assert_eq!(
            g.apply_action(P1, Action::discard(target)),
            Err(RejectReason::GameNotInProgress)
        );
    }

    #[test]
    fn test_card_locations() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_hand(P0, &[two]).unwrap();
        let id = g.hand_ids(P0)[0];
        assert_eq!(g.card_location(id), Some(CardLocation::InHand(P0)));

        g.apply_action(P0, Action::play(two, CellIndex(1))).unwrap();
        assert_eq!(g.card_location(id), Some(CardLocation::OnBoard(CellIndex(1))));
    }

    #[test]
    fn test_setup_hand_is_atomic() {
        let mut g = game();
        let ace = card(Rank::Ace, Suit::Hearts);
        let before = g.clone();
        assert!(g.setup_hand(P0, &[ace, ace, ace]).is_err());
        assert_eq!(g, before);

        g.setup_hand(P0, &[ace, ace]).unwrap();
        assert_eq!(g.hand(P0), vec![ace, ace]);
        assert!(g.check_conservation());
    }

    #[test]
    fn test_history_records_turns() {
        let mut g = game();
        let two = card(Rank::Two, Suit::Diamonds);
        g.setup_hand(P0, &[two]).unwrap();
        g.apply_action(P0, Action::play(two, CellIndex(1))).unwrap();

        let history = &g.state().history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].player, P0);
        assert_eq!(history[0].turn, 1);
        assert_eq!(history[0].kind, ActionKind::PlaceChip);
    }

    #[test]
    fn test_inconsistent_snapshots_are_refused() {
        use crate::error::SnapshotError;

        let fresh = game();
        assert!(fresh.is_well_formed());

        let mut stray_card = fresh.clone();
        stray_card.hands[P0].push(CardId(200));

        let mut short_board = fresh.clone();
        short_board.chip_cards.truncate(10);

        let mut extra_team = fresh.clone();
        extra_team.config.team_count = 3;
        extra_team.config.player_count = 3;

        let mut duplicate = fresh.clone();
        let held = duplicate.hands[P1][0];
        duplicate.hands[P0].push(held);

        for broken in [stray_card, short_board, extra_team, duplicate] {
            assert!(!broken.is_well_formed());
            let bytes = broken.to_snapshot().unwrap();
            assert!(matches!(Game::from_snapshot(&bytes), Err(SnapshotError::Corrupt)));
        }
    }
}
