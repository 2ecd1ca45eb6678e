//! AI configuration parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty tier. Tiers differ in which score terms they use and how they
/// pick among candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Take a winning move if there is one, else a weighted-random pick
    /// using only the offensive term.
    Easy,
    /// Win, else block, else the best combined offense and defense score.
    Medium,
    /// Medium plus a one-ply check of the best opposing reply for the
    /// top candidates.
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Whether the defensive term is scored.
    #[must_use]
    pub const fn uses_defense(self) -> bool {
        !matches!(self, Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty `{other}` (expected easy, medium or hard)")),
        }
    }
}

/// Weights for the move evaluator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Value of a run of each length (index = run length, 0..=5) through
    /// the evaluated cell, summed over the four axes.
    pub run_values: [f64; 6],

    /// Extra value when a run reaches exactly four.
    pub four_bonus: f64,

    /// Multiplier on an opponent's run value at a cell we take or clear.
    pub block_weight: f64,

    /// Multiplier on the offensive value of reopening a cell by removal.
    pub removal_factor: f64,

    /// Cost of spending a two-eyed jack.
    pub two_eyed_cost: f64,

    /// Cost of spending a one-eyed jack.
    pub one_eyed_cost: f64,

    /// Multiplier on the best opposing reply in Hard lookahead.
    pub reply_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            run_values: [0.0, 1.0, 4.0, 12.0, 40.0, 150.0],
            four_bonus: 30.0,
            block_weight: 0.9,
            removal_factor: 0.5,
            two_eyed_cost: 12.0,
            one_eyed_cost: 8.0,
            reply_weight: 0.8,
        }
    }
}

impl ScoreWeights {
    /// Value for a run of `len` cells (lengths above five count as five).
    #[must_use]
    pub fn run_value(&self, len: usize) -> f64 {
        self.run_values[len.min(self.run_values.len() - 1)]
    }

    pub fn with_four_bonus(mut self, bonus: f64) -> Self {
        self.four_bonus = bonus;
        self
    }

    pub fn with_block_weight(mut self, weight: f64) -> Self {
        self.block_weight = weight;
        self
    }

    pub fn with_jack_costs(mut self, two_eyed: f64, one_eyed: f64) -> Self {
        self.two_eyed_cost = two_eyed;
        self.one_eyed_cost = one_eyed;
        self
    }
}

/// Configuration for one AI seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,

    /// How many top candidates Hard checks against an opposing reply.
    pub lookahead_width: usize,

    pub weights: ScoreWeights,

    /// Mixed into Easy's random stream together with the game seed.
    pub seed: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            lookahead_width: 5,
            weights: ScoreWeights::default(),
            seed: 0,
        }
    }
}

impl AiConfig {
    /// Default configuration at a given tier.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_lookahead_width(mut self, width: usize) -> Self {
        self.lookahead_width = width.max(1);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
