//! Move selection for the three difficulty tiers.
//!
//! `choose_action` is a pure function of the game: it never mutates it and
//! never advances the game RNG. Easy's randomness comes from a stream
//! derived from the game seed, the turn number and the seat, so the same
//! position always yields the same choice.
//!
//! Every tier takes an immediate win first. Ties are broken by the lowest
//! cell index, then the lowest card rank.

use tracing::trace;

use crate::core::{LegalAction, PlayerId};
use crate::rules::Game;

use super::config::{AiConfig, Difficulty};
use super::eval::{Evaluator, MoveScore};

/// A computer player.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AiAgent {
    config: AiConfig,
}

impl AiAgent {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Agent with default settings at `difficulty`.
    #[must_use]
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::new(difficulty))
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Score every legal action for `player`, in tie-break order.
    #[must_use]
    pub fn score_actions(&self, game: &Game, player: PlayerId) -> Vec<MoveScore> {
        let eval = Evaluator::new(game, player, &self.config.weights);
        let with_defense = self.config.difficulty.uses_defense();
        game.legal_actions(player)
            .into_iter()
            .map(|action| eval.score(action, with_defense))
            .collect()
    }

    /// Pick a move for `player`, or `None` if they have no legal action.
    #[must_use]
    pub fn choose_action(&self, game: &Game, player: PlayerId) -> Option<LegalAction> {
        let scores = self.score_actions(game, player);
        if let Some(win) = scores.iter().find(|s| s.wins) {
            return Some(win.action);
        }

        let choice = match self.config.difficulty {
            Difficulty::Easy => self.pick_weighted(game, player, &scores),
            Difficulty::Medium => Self::pick_block(&scores).or_else(|| best_of(scores.iter())),
            Difficulty::Hard => Self::pick_block(&scores).or_else(|| self.pick_lookahead(game, player, &scores)),
        };

        trace!(
            player = player.0,
            difficulty = %self.config.difficulty,
            candidates = scores.len(),
            choice = ?choice.map(|c| c.action),
            "ai choice"
        );
        choice
    }

    /// Random pick weighted by offense only.
    fn pick_weighted(&self, game: &Game, player: PlayerId, scores: &[MoveScore]) -> Option<LegalAction> {
        let context = format!("ai:{}:{}:{}", self.config.seed, game.state().turn_number, player.0);
        let mut rng = game.rng().for_context(&context);
        let weights: Vec<f64> = scores.iter().map(|s| s.offense.max(0.0) + 1.0).collect();
        rng.choose_weighted(&weights).map(|i| scores[i].action)
    }

    /// Best-scoring move among those that stop an opponent sequence.
    fn pick_block(scores: &[MoveScore]) -> Option<LegalAction> {
        best_of(scores.iter().filter(|s| s.blocks))
    }

    /// Best worst-case over the top-K candidates, assuming the strongest
    /// single opposing placement.
    fn pick_lookahead(&self, game: &Game, player: PlayerId, scores: &[MoveScore]) -> Option<LegalAction> {
        let eval = Evaluator::new(game, player, &self.config.weights);

        let mut ranked: Vec<&MoveScore> = scores.iter().collect();
        // Stable sort keeps tie-break order among equal scores.
        ranked.sort_by(|a, b| b.total().total_cmp(&a.total()));
        ranked.truncate(self.config.lookahead_width.max(1));

        let mut best: Option<(f64, LegalAction)> = None;
        for candidate in ranked {
            let (board, counts) = eval.after(candidate.action);
            let reply = eval.best_reply(&board, &counts);
            let value = candidate.total() - self.config.weights.reply_weight * reply;

            let better = match best {
                None => true,
                Some((v, action)) => {
                    value > v || (value == v && candidate.action.action.tie_break_key() < action.action.tie_break_key())
                }
            };
            if better {
                best = Some((value, candidate.action));
            }
        }
        best.map(|(_, action)| action)
    }
}

/// Highest total; the earliest in tie-break order wins ties.
fn best_of<'a>(scores: impl Iterator<Item = &'a MoveScore>) -> Option<LegalAction> {
    let mut best: Option<&MoveScore> = None;
    for score in scores {
        if best.map_or(true, |b| score.total() > b.total()) {
            best = Some(score);
        }
    }
    best.map(|s| s.action)
}

impl Game {
    /// The move the AI would make for `player` at `difficulty`. Pure: the
    /// result must still go through [`Game::apply_action`].
    #[must_use]
    pub fn ai_choose_action(&self, player: PlayerId, difficulty: Difficulty) -> Option<LegalAction> {
        AiAgent::with_difficulty(difficulty).choose_action(self, player)
    }
}
