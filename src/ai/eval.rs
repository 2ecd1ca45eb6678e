//! Move scoring.
//!
//! Every legal action gets a [`MoveScore`] with separate offensive,
//! defensive and cost terms plus two hard flags: `wins` (the move reaches
//! the win threshold) and `blocks` (the move stops an opponent sequence).
//! Scores read the board only; hypothetical positions are built on clones.

use crate::board::{run_length, Axis, Board, CellIndex, SEQUENCE_LENGTH};
use crate::cards::CardClass;
use crate::core::{ActionKind, LegalAction, PlayerId, TeamId, TeamMap};
use crate::rules::Game;

use super::config::ScoreWeights;

/// Score given to a move that wins the game.
pub const WIN_SCORE: f64 = 1.0e9;

/// Breakdown of one action's score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveScore {
    pub action: LegalAction,
    pub offense: f64,
    pub defense: f64,
    pub cost: f64,
    pub wins: bool,
    pub blocks: bool,
}

impl MoveScore {
    /// Combined score. Winning moves score [`WIN_SCORE`].
    #[must_use]
    pub fn total(&self) -> f64 {
        if self.wins {
            WIN_SCORE
        } else {
            self.offense + self.defense - self.cost
        }
    }
}

/// Scores actions for one player against the current position.
#[derive(Debug)]
pub struct Evaluator<'a> {
    game: &'a Game,
    weights: &'a ScoreWeights,
    team: TeamId,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(game: &'a Game, player: PlayerId, weights: &'a ScoreWeights) -> Self {
        Self {
            game,
            weights,
            team: game.team_of(player),
        }
    }

    #[must_use]
    pub fn team(&self) -> TeamId {
        self.team
    }

    /// Teams other than ours.
    pub fn opponents(&self) -> impl Iterator<Item = TeamId> + '_ {
        TeamId::all(self.game.team_count()).filter(move |&t| t != self.team)
    }

    /// Score one action. `with_defense` switches the defensive term on.
    #[must_use]
    pub fn score(&self, action: LegalAction, with_defense: bool) -> MoveScore {
        let board = self.game.board();
        let mut score = MoveScore {
            action,
            offense: 0.0,
            defense: 0.0,
            cost: self.jack_cost(action),
            wins: false,
            blocks: false,
        };

        let Some(cell) = action.action.cell() else {
            // Dead discard: neutral.
            return score;
        };

        match action.kind {
            ActionKind::PlaceChip => {
                score.offense = self.run_value(board, cell, self.team);
                let made = self.completions(board, cell, self.team);
                score.wins = made > 0 && self.reaches_threshold(&self.game.state().sequences, self.team, made);

                score.blocks = self.opponents().any(|opp| self.completions(board, cell, opp) > 0);
                if with_defense {
                    score.defense = self
                        .opponents()
                        .map(|opp| self.run_value(board, cell, opp))
                        .fold(0.0, f64::max)
                        * self.weights.block_weight;
                }
            }
            ActionKind::RemoveChip => {
                score.offense = self.run_value(board, cell, self.team) * self.weights.removal_factor;
                if let Some(owner) = board.occupant(cell) {
                    score.blocks = self.breaks_threat(board, cell, owner);
                    if with_defense {
                        score.defense = self.run_value(board, cell, owner) * self.weights.block_weight;
                    }
                }
            }
            ActionKind::DiscardDead => {}
        }

        score
    }

    /// Value of `team` holding `cell`: per-axis run values plus a bonus for
    /// each run of exactly four.
    #[must_use]
    pub fn run_value(&self, board: &Board, cell: CellIndex, team: TeamId) -> f64 {
        Axis::ALL
            .iter()
            .map(|&axis| {
                let len = run_length(board, cell, team, axis);
                let bonus = if len == SEQUENCE_LENGTH - 1 {
                    self.weights.four_bonus
                } else {
                    0.0
                };
                self.weights.run_value(len) + bonus
            })
            .sum()
    }

    /// How many sequences `team` would count by placing on open `cell`.
    #[must_use]
    pub fn completions(&self, board: &Board, cell: CellIndex, team: TeamId) -> usize {
        let reaches_five = Axis::ALL
            .iter()
            .any(|&axis| run_length(board, cell, team, axis) >= SEQUENCE_LENGTH);
        if !reaches_five || !board.is_open(cell) {
            return 0;
        }
        let mut after = board.clone();
        after.place_chip(cell, team);
        self.game.detector().find_new(&after, cell, team).len()
    }

    /// Whether lifting `owner`'s chip off `cell` takes away a sequence
    /// `owner` could count with one placement on a line through `cell`.
    fn breaks_threat(&self, board: &Board, cell: CellIndex, owner: TeamId) -> bool {
        let in_line = Axis::ALL
            .iter()
            .any(|&axis| run_length(board, cell, owner, axis) >= SEQUENCE_LENGTH - 1);
        if !in_line {
            return false;
        }

        let reach = SEQUENCE_LENGTH as isize;
        let threats: Vec<CellIndex> = Axis::ALL
            .iter()
            .flat_map(|&axis| {
                let (dr, dc) = axis.delta();
                (1..reach).flat_map(move |step| [cell.offset(dr * step, dc * step), cell.offset(-dr * step, -dc * step)])
            })
            .flatten()
            .filter(|&open| self.completions(board, open, owner) > 0)
            .collect();
        if threats.is_empty() {
            return false;
        }

        let mut after = board.clone();
        after.remove_chip(cell);
        threats.into_iter().any(|open| self.completions(&after, open, owner) == 0)
    }

    fn reaches_threshold(&self, counts: &TeamMap<u32>, team: TeamId, made: usize) -> bool {
        counts[team] + made as u32 >= self.game.state().win_threshold
    }

    fn jack_cost(&self, action: LegalAction) -> f64 {
        match action.action.card.class() {
            CardClass::TwoEyedJack => self.weights.two_eyed_cost,
            CardClass::OneEyedJack => self.weights.one_eyed_cost,
            CardClass::Standard => 0.0,
        }
    }

    /// The position after our action, with any sequences it makes locked.
    #[must_use]
    pub fn after(&self, action: LegalAction) -> (Board, TeamMap<u32>) {
        let mut board = self.game.board().clone();
        let mut counts = self.game.state().sequences.clone();
        if let Some(cell) = action.action.cell() {
            match action.kind {
                ActionKind::PlaceChip => {
                    board.place_chip(cell, self.team);
                    for seq in self.game.detector().find_new(&board, cell, self.team) {
                        board.lock(seq.cells, self.team);
                        counts[self.team] += 1;
                    }
                }
                ActionKind::RemoveChip => {
                    board.remove_chip(cell);
                }
                ActionKind::DiscardDead => {}
            }
        }
        (board, counts)
    }

    /// The best value any opponent can get from a single placement on any
    /// open cell of `board`. A winning reply scores [`WIN_SCORE`].
    #[must_use]
    pub fn best_reply(&self, board: &Board, counts: &TeamMap<u32>) -> f64 {
        let mut best = 0.0_f64;
        for opp in self.opponents() {
            for cell in board.open_cells() {
                let made = self.completions(board, cell, opp);
                if made > 0 && self.reaches_threshold(counts, opp, made) {
                    return WIN_SCORE;
                }
                best = best.max(self.run_value(board, cell, opp));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardLayout;
    use crate::cards::{Card, Rank, Suit};
    use crate::core::{Action, GameConfig, PlayerId};

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn game() -> Game {
        let mut g = Game::new_game(2, 2, BoardLayout::sequential(), 5).unwrap();
        g.setup_hand(P0, &[]).unwrap();
        g.setup_hand(P1, &[]).unwrap();
        g
    }

    fn place(cell: u8) -> LegalAction {
        let g = game();
        let card = g.board().layout().card_at(CellIndex(cell)).unwrap();
        LegalAction {
            action: Action::play(card, CellIndex(cell)),
            kind: ActionKind::PlaceChip,
        }
    }

    #[test]
    fn test_lone_chip_offense() {
        let g = game();
        let weights = ScoreWeights::default();
        let eval = Evaluator::new(&g, P0, &weights);

        let score = eval.score(place(44), true);
        assert_eq!(score.offense, 4.0 * weights.run_value(1));
        assert_eq!(score.defense, 4.0 * weights.run_value(1) * weights.block_weight);
        assert!(!score.wins);
        assert!(!score.blocks);
    }

    #[test]
    fn test_extending_run_scores_higher() {
        let mut g = game();
        g.setup_chip(CellIndex(43), TeamId(0)).unwrap();
        g.setup_chip(CellIndex(42), TeamId(0)).unwrap();
        let weights = ScoreWeights::default();
        let eval = Evaluator::new(&g, P0, &weights);

        let adjacent = eval.score(place(44), false);
        let far = eval.score(place(66), false);
        assert!(adjacent.offense > far.offense);
        assert_eq!(adjacent.defense, 0.0);
    }

    #[test]
    fn test_win_and_block_flags() {
        let mut g = game();
        for raw in 41..45 {
            g.setup_chip(CellIndex(raw), TeamId(0)).unwrap();
        }
        let weights = ScoreWeights::default();

        let ours = Evaluator::new(&g, P0, &weights).score(place(45), true);
        assert!(ours.wins);
        assert_eq!(ours.total(), WIN_SCORE);

        let theirs = Evaluator::new(&g, P1, &weights).score(place(45), true);
        assert!(!theirs.wins);
        assert!(theirs.blocks);
        assert!(theirs.defense > 0.0);
    }

    #[test]
    fn test_jack_cost_and_dead_discard() {
        let g = game();
        let weights = ScoreWeights::default();
        let eval = Evaluator::new(&g, P0, &weights);

        let jack = LegalAction {
            action: Action::play(Card::new(Rank::Jack, Suit::Clubs), CellIndex(44)),
            kind: ActionKind::PlaceChip,
        };
        assert_eq!(eval.score(jack, false).cost, weights.two_eyed_cost);

        let discard = LegalAction {
            action: Action::discard(Card::new(Rank::Two, Suit::Diamonds)),
            kind: ActionKind::DiscardDead,
        };
        assert_eq!(eval.score(discard, true).total(), 0.0);
    }

    #[test]
    fn test_best_reply_sees_opponent_win() {
        let mut g = game();
        for raw in 60..64 {
            g.setup_chip(CellIndex(raw), TeamId(1)).unwrap();
        }
        let weights = ScoreWeights::default();
        let eval = Evaluator::new(&g, P0, &weights);

        let (board, counts) = eval.after(place(22));
        assert_eq!(eval.best_reply(&board, &counts), WIN_SCORE);

        let (board, counts) = eval.after(place(64));
        assert!(eval.best_reply(&board, &counts) < WIN_SCORE);
    }

    fn remove(cell: u8) -> LegalAction {
        LegalAction {
            action: Action::play(Card::new(Rank::Jack, Suit::Spades), CellIndex(cell)),
            kind: ActionKind::RemoveChip,
        }
    }

    #[test]
    fn test_removal_blocks_only_live_fours() {
        let weights = ScoreWeights::default();

        // Open four: 41 and 46 both complete it.
        let mut open = game();
        for raw in 42..46 {
            open.setup_chip(CellIndex(raw), TeamId(1)).unwrap();
        }
        assert!(Evaluator::new(&open, P0, &weights).score(remove(43), true).blocks);

        // Same four with both ends ours.
        let mut closed = open.clone();
        closed.setup_chip(CellIndex(41), TeamId(0)).unwrap();
        closed.setup_chip(CellIndex(46), TeamId(0)).unwrap();
        assert!(!Evaluator::new(&closed, P0, &weights).score(remove(43), true).blocks);
    }

    #[test]
    fn test_chip_beside_locked_sequence_is_no_threat() {
        let config = GameConfig::new(2, 2).unwrap().with_win_threshold(2).with_seed(5);
        let mut g = Game::new(config, BoardLayout::sequential()).unwrap();
        g.setup_hand(P0, &[]).unwrap();
        for raw in 51..55 {
            g.setup_chip(CellIndex(raw), TeamId(1)).unwrap();
        }
        let five = g.board().layout().card_at(CellIndex(55)).unwrap();
        g.setup_hand(P1, &[five]).unwrap();
        g.setup_active_player(P1).unwrap();
        let outcome = g.apply_action(P1, Action::play(five, CellIndex(55))).unwrap();
        assert_eq!(outcome.sequences.len(), 1);

        // 56 extends the counted five, but no new window through it could
        // count, so taking it stops nothing.
        g.setup_chip(CellIndex(56), TeamId(1)).unwrap();
        let weights = ScoreWeights::default();
        let score = Evaluator::new(&g, P0, &weights).score(remove(56), true);
        assert!(!score.blocks);
    }
}
