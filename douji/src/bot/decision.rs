//! Bot decision-making logic with difficulty-based behavior.

use super::models::DifficultyParams;
use crate::game::{
    constants::FIVE_OF_A_KIND_SCORE,
    entities::{BidLadder, Chips, Player},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Strength of any hand holding a four-of-a-kind. Only another
/// four-of-a-kind can contest it at settlement.
const STRENGTH_FOUR_OF_A_KIND: f32 = 0.95;

/// Highest strength a hand without a four-of-a-kind can reach.
const STRENGTH_CAP: f32 = 0.9;

/// Configuration for bot decision-making thresholds.
///
/// All threshold values are hand strength floats in range [0.0, 1.0].
/// Higher threshold = more conservative play.
///
/// # Examples
///
/// ```
/// use douji::bot::decision::BotDecisionConfig;
///
/// let config = BotDecisionConfig::default();
/// assert_eq!(config.easy_fold_threshold, 0.15);
/// assert_eq!(config.easy_raise_threshold, 0.45);
/// ```
#[derive(Debug, Clone)]
pub struct BotDecisionConfig {
    /// Hand strength below this = fold (Easy bot).
    pub easy_fold_threshold: f32,

    /// Hand strength above this = call big (Easy bot).
    pub easy_raise_threshold: f32,

    /// Hand strength below this = fold (Standard bot).
    pub standard_fold_threshold: f32,

    /// Hand strength above this = call big (Standard bot).
    pub standard_raise_threshold: f32,

    /// Hand strength below this = fold (TAG bot).
    pub tag_fold_threshold: f32,

    /// Hand strength above this = call big (TAG bot).
    pub tag_raise_threshold: f32,

    /// Final score treated as a near-certain winner when estimating
    /// strength. Scores are divided by this and capped.
    ///
    /// **Range**: 80-150 (typical: 110)
    /// **Lower** = bots get confident sooner
    pub strong_score: f32,

    /// Base probability of staying in with medium-strength hands.
    ///
    /// **Range**: 0.2-0.5 (typical: 0.3)
    /// **Effect**: call_prob = base + (aggression / divisor)
    pub base_call_probability: f32,

    /// Divisor for aggression factor when calculating stay probability.
    pub call_aggression_divisor: f32,

    /// Base probability of calling the top of the ladder with strong hands.
    pub base_raise_probability: f32,

    /// Divisor for aggression factor when calculating raise probability.
    pub raise_aggression_divisor: f32,

    /// Fraction of the player's balance a bot is willing to match with a
    /// medium hand before folding outright.
    ///
    /// **Range**: 0.05-0.5 (typical: 0.2)
    pub max_stake_fraction: f32,
}

impl Default for BotDecisionConfig {
    fn default() -> Self {
        Self {
            // Fold/raise thresholds by difficulty
            easy_fold_threshold: 0.15,
            easy_raise_threshold: 0.45,
            standard_fold_threshold: 0.25,
            standard_raise_threshold: 0.55,
            tag_fold_threshold: 0.35,
            tag_raise_threshold: 0.6,
            strong_score: 110.0,
            // Staying
            base_call_probability: 0.3,
            call_aggression_divisor: 5.0,
            // Calling high
            base_raise_probability: 0.4,
            raise_aggression_divisor: 4.0,
            max_stake_fraction: 0.2,
        }
    }
}

/// Bot decision maker
#[derive(Debug)]
pub struct BotDecisionMaker {
    rng: StdRng,
    config: BotDecisionConfig,
}

impl BotDecisionMaker {
    /// Create a new decision maker with default config and OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BotDecisionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: BotDecisionConfig) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            config,
        }
    }

    /// Reproducible decisions for tests and seeded self-play.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: BotDecisionConfig::default(),
        }
    }

    fn thresholds(&self, params: &DifficultyParams) -> (f32, f32) {
        // Looser presets stay with weaker hands.
        match params.stay_rate {
            v if v > 0.6 => (
                self.config.easy_fold_threshold,
                self.config.easy_raise_threshold,
            ),
            v if v > 0.4 => (
                self.config.standard_fold_threshold,
                self.config.standard_raise_threshold,
            ),
            _ => (
                self.config.tag_fold_threshold,
                self.config.tag_raise_threshold,
            ),
        }
    }

    /// Decide how much to call from the ladder. Returns 0 to fold.
    pub fn decide_call(
        &mut self,
        params: &DifficultyParams,
        player: &Player,
        ladder: &BidLadder,
    ) -> Chips {
        let options = ladder.options();
        // Smallest non-zero amount, if the ladder has one.
        let Some(&cheapest) = options.get(1) else {
            return 0;
        };
        let strength = self.estimate_hand_strength(player);
        let (fold_threshold, raise_threshold) = self.thresholds(params);

        if strength < fold_threshold {
            if params.bluffs && self.rng.random_bool(f64::from(params.bluff_frequency)) {
                return ladder.max();
            }
            return 0;
        }

        if strength < raise_threshold {
            return cheapest;
        }

        let raise_probability = self.config.base_raise_probability
            + (params.aggression_factor / self.config.raise_aggression_divisor);
        if self.rng.random_bool(f64::from(raise_probability.min(1.0))) {
            ladder.max()
        } else {
            // Middle of the non-zero options.
            options[options.len() / 2].max(cheapest)
        }
    }

    /// Decide whether to match `to_match` or fold.
    pub fn decide_stay(
        &mut self,
        params: &DifficultyParams,
        player: &Player,
        to_match: Chips,
    ) -> bool {
        let strength = self.estimate_hand_strength(player);
        let (fold_threshold, raise_threshold) = self.thresholds(params);

        if strength >= raise_threshold {
            return true;
        }

        if strength < fold_threshold {
            return params.bluffs && self.rng.random_bool(f64::from(params.bluff_frequency));
        }

        #[allow(clippy::cast_precision_loss)]
        let stake = to_match as f32 / (player.chips.max(1) as f32);
        if stake > self.config.max_stake_fraction {
            return false;
        }
        let call_probability = self.config.base_call_probability
            + (params.aggression_factor / self.config.call_aggression_divisor)
            + params.stay_rate / 2.0;
        self.rng.random_bool(f64::from(call_probability.min(1.0)))
    }

    /// Estimate hand strength from everything the bot can see of its own
    /// hand, hidden cards included.
    ///
    /// # Returns
    ///
    /// * `f32` - Estimated strength (0.0 to 1.0)
    #[must_use]
    pub fn estimate_hand_strength(&self, player: &Player) -> f32 {
        if player.hand.is_empty() {
            return 0.0;
        }
        let evaluation = player.final_eval();
        if evaluation.four_of_a_kind || evaluation.score >= FIVE_OF_A_KIND_SCORE {
            return STRENGTH_FOUR_OF_A_KIND;
        }

        // Average per card, so early rounds with few cards are comparable
        // to later ones.
        #[allow(clippy::cast_precision_loss)]
        let per_card = evaluation.score as f32 / player.hand.len() as f32;
        let projected = per_card * 5.0;
        (projected / self.config.strong_score).min(STRENGTH_CAP)
    }
}

impl Default for BotDecisionMaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::models::BotDifficulty;
    use crate::game::entities::{Card, Suit};

    fn player_with(cards: &[Card]) -> Player {
        let mut player = Player::new("bot", "Bot", 100);
        if let Some((hidden, revealed)) = cards.split_first() {
            player.receive_hidden(*hidden);
            for card in revealed {
                player.receive_revealed(*card);
            }
        }
        player
    }

    fn weak_hand() -> Player {
        player_with(&[Card(2, Suit::Club), Card(3, Suit::Spade)])
    }

    fn strong_hand() -> Player {
        player_with(&[
            Card(15, Suit::Club),
            Card(15, Suit::Spade),
            Card(15, Suit::Diamond),
        ])
    }

    #[test]
    fn test_strength_is_bounded() {
        let decision_maker = BotDecisionMaker::from_seed(1);
        let empty = Player::new("bot", "Bot", 100);
        assert_eq!(decision_maker.estimate_hand_strength(&empty), 0.0);

        let weak = decision_maker.estimate_hand_strength(&weak_hand());
        let strong = decision_maker.estimate_hand_strength(&strong_hand());
        assert!(weak < strong);
        assert!(strong <= STRENGTH_CAP);
    }

    #[test]
    fn test_four_of_a_kind_is_near_certain() {
        let decision_maker = BotDecisionMaker::from_seed(1);
        let player = player_with(&[
            Card(5, Suit::Club),
            Card(5, Suit::Spade),
            Card(5, Suit::Diamond),
            Card(5, Suit::Heart),
        ]);
        assert_eq!(
            decision_maker.estimate_hand_strength(&player),
            STRENGTH_FOUR_OF_A_KIND
        );
    }

    #[test]
    fn test_calls_stay_on_the_ladder() {
        let mut decision_maker = BotDecisionMaker::from_seed(7);
        let ladder = BidLadder::new(2, 8, true);
        for difficulty in [BotDifficulty::Easy, BotDifficulty::Standard, BotDifficulty::Tag] {
            let params = DifficultyParams::from_difficulty(difficulty);
            for player in [weak_hand(), strong_hand()] {
                for _ in 0..50 {
                    let amount = decision_maker.decide_call(&params, &player, &ladder);
                    assert!(ladder.contains(amount), "{amount} not on {ladder}");
                }
            }
        }
    }

    #[test]
    fn test_tag_bot_folds_weak_hands() {
        let mut decision_maker = BotDecisionMaker::from_seed(3);
        let params = DifficultyParams::tag();
        let ladder = BidLadder::new(1, 5, false);
        let folds = (0..100)
            .filter(|_| decision_maker.decide_call(&params, &weak_hand(), &ladder) == 0)
            .count();
        // Only bluffs keep a TAG bot in with nothing.
        assert!(folds > 50, "TAG bot folded {folds} of 100");
    }

    #[test]
    fn test_strong_hands_always_stay() {
        let mut decision_maker = BotDecisionMaker::from_seed(5);
        let params = DifficultyParams::tag();
        assert!((0..50).all(|_| decision_maker.decide_stay(&params, &strong_hand(), 10)));
    }

    #[test]
    fn test_easy_bot_never_bluffs_weak_hands() {
        let mut decision_maker = BotDecisionMaker::from_seed(9);
        let params = DifficultyParams::easy();
        let ladder = BidLadder::new(1, 5, false);
        assert!((0..50).all(|_| decision_maker.decide_call(&params, &weak_hand(), &ladder) == 0));
        assert!((0..50).all(|_| !decision_maker.decide_stay(&params, &weak_hand(), 1)));
    }

    #[test]
    fn test_empty_ladder_folds() {
        let mut decision_maker = BotDecisionMaker::from_seed(2);
        let params = DifficultyParams::standard();
        let ladder = BidLadder::new(0, 0, false);
        assert_eq!(
            decision_maker.decide_call(&params, &strong_hand(), &ladder),
            0
        );
    }
}
