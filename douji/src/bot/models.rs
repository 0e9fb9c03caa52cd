//! Bot player models and configuration.

use enum_dispatch::enum_dispatch;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::decision::BotDecisionMaker;
use crate::game::entities::{BidLadder, Chips, Player};

/// Difficulty presets for heuristic bots.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum BotDifficulty {
    /// Loose-passive
    Easy,
    /// Balanced
    #[default]
    Standard,
    /// Tight-aggressive
    Tag,
}

impl fmt::Display for BotDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Easy => "easy",
            Self::Standard => "standard",
            Self::Tag => "tag",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "standard" => Ok(Self::Standard),
            "tag" => Ok(Self::Tag),
            other => Err(format!("unknown bot difficulty: {other}")),
        }
    }
}

/// Bot difficulty parameters
#[derive(Debug, Clone)]
pub struct DifficultyParams {
    /// How readily the bot stays in a call (0.0 to 1.0)
    pub stay_rate: f32,

    /// Aggression factor; higher means bigger calls
    pub aggression_factor: f32,

    /// Whether bot bluffs
    pub bluffs: bool,

    /// Bluff frequency (0.0 to 1.0)
    pub bluff_frequency: f32,
}

impl DifficultyParams {
    /// Loose-passive: stays often, rarely calls big
    #[must_use]
    pub fn easy() -> Self {
        Self {
            stay_rate: 0.7,
            aggression_factor: 0.5,
            bluffs: false,
            bluff_frequency: 0.0,
        }
    }

    #[must_use]
    pub fn standard() -> Self {
        Self {
            stay_rate: 0.5,
            aggression_factor: 1.5,
            bluffs: true,
            bluff_frequency: 0.15,
        }
    }

    /// Very tight, very aggressive when playing
    #[must_use]
    pub fn tag() -> Self {
        Self {
            stay_rate: 0.3,
            aggression_factor: 2.5,
            bluffs: true,
            bluff_frequency: 0.25,
        }
    }

    #[must_use]
    pub fn from_difficulty(difficulty: BotDifficulty) -> Self {
        match difficulty {
            BotDifficulty::Easy => Self::easy(),
            BotDifficulty::Standard => Self::standard(),
            BotDifficulty::Tag => Self::tag(),
        }
    }
}

/// Bot statistics tracker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BotStats {
    /// Times the bot was asked to open a round
    pub calls_asked: u32,

    /// Opening calls answered with zero
    pub calls_folded: u32,

    /// Times the bot was asked to match a call
    pub matches_asked: u32,

    /// Matches accepted
    pub matches_stayed: u32,

    /// Chips put up by the bot's own calls
    pub chips_called: Chips,
}

impl BotStats {
    /// Share of opening calls the bot folded
    #[must_use]
    pub fn call_fold_rate(&self) -> f32 {
        if self.calls_asked == 0 {
            0.0
        } else {
            self.calls_folded as f32 / self.calls_asked as f32
        }
    }

    /// Share of matches the bot stayed in for
    #[must_use]
    pub fn stay_rate(&self) -> f32 {
        if self.matches_asked == 0 {
            0.0
        } else {
            self.matches_stayed as f32 / self.matches_asked as f32
        }
    }

    fn record_call(&mut self, amount: Chips) {
        self.calls_asked += 1;
        if amount == 0 {
            self.calls_folded += 1;
        }
        self.chips_called += amount;
    }

    fn record_match(&mut self, stayed: bool) {
        self.matches_asked += 1;
        if stayed {
            self.matches_stayed += 1;
        }
    }
}

/// How a bot answers the two questions a game asks.
#[enum_dispatch]
pub trait Strategy {
    fn choose_call(&mut self, player: &Player, ladder: &BidLadder) -> Chips;
    fn choose_stay(&mut self, player: &Player, to_match: Chips) -> bool;
    fn stats(&self) -> &BotStats;
}

/// Heuristic bot driven by a difficulty preset.
#[derive(Debug)]
pub struct BotPlayer {
    pub difficulty: BotDifficulty,
    pub params: DifficultyParams,
    pub stats: BotStats,
    decision_maker: BotDecisionMaker,
}

impl BotPlayer {
    #[must_use]
    pub fn new(difficulty: BotDifficulty, decision_maker: BotDecisionMaker) -> Self {
        Self {
            difficulty,
            params: DifficultyParams::from_difficulty(difficulty),
            stats: BotStats::default(),
            decision_maker,
        }
    }
}

impl Strategy for BotPlayer {
    fn choose_call(&mut self, player: &Player, ladder: &BidLadder) -> Chips {
        let amount = self.decision_maker.decide_call(&self.params, player, ladder);
        self.stats.record_call(amount);
        amount
    }

    fn choose_stay(&mut self, player: &Player, to_match: Chips) -> bool {
        let stayed = self
            .decision_maker
            .decide_stay(&self.params, player, to_match);
        self.stats.record_match(stayed);
        stayed
    }

    fn stats(&self) -> &BotStats {
        &self.stats
    }
}

/// Picks uniformly from the ladder and stays with a fixed probability.
/// Useful as a baseline opponent.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
    stay_probability: f64,
    stats: BotStats,
}

impl RandomBot {
    #[must_use]
    pub fn new(seed: u64, stay_probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            stay_probability: stay_probability.clamp(0.0, 1.0),
            stats: BotStats::default(),
        }
    }
}

impl Strategy for RandomBot {
    fn choose_call(&mut self, _player: &Player, ladder: &BidLadder) -> Chips {
        let options = ladder.options();
        let amount = options[self.rng.random_range(0..options.len())];
        self.stats.record_call(amount);
        amount
    }

    fn choose_stay(&mut self, _player: &Player, _to_match: Chips) -> bool {
        let stayed = self.rng.random_bool(self.stay_probability);
        self.stats.record_match(stayed);
        stayed
    }

    fn stats(&self) -> &BotStats {
        &self.stats
    }
}

#[enum_dispatch(Strategy)]
#[derive(Debug)]
pub enum BotKind {
    Heuristic(BotPlayer),
    Random(RandomBot),
}
