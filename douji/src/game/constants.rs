//! Rank values, bonus amounts, and table defaults.

use super::entities::{Chips, Value};

/// Face value of a jack.
pub const JACK: Value = 11;
/// Face value of a queen.
pub const QUEEN: Value = 12;
/// Face value of a king.
pub const KING: Value = 13;
/// Face value of an ace. 14 is never used.
pub const ACE: Value = 15;
/// Rank of the black joker.
pub const BLACK_JOKER_RANK: Value = 17;
/// Rank of the red joker.
pub const RED_JOKER_RANK: Value = 19;
/// Rank of the special card. It has no scoring effect.
pub const SPECIAL_RANK: Value = 21;

/// Ranks that appear once in each of the four suits.
pub const SUITED_RANKS: [Value; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, JACK, QUEEN, KING, ACE];

/// 13 ranks in four suits, two jokers, and the special card.
pub const DECK_SIZE: usize = 55;

/// Score of a natural four-of-a-kind that also holds the wildcard.
pub const FIVE_OF_A_KIND_SCORE: u32 = 300;
pub const FOUR_OF_A_KIND_BONUS: u32 = 60;
pub const THREE_OF_A_KIND_BONUS: u32 = 30;

// Joker bonuses. Any combination involving the wildcard uses it up.
pub const BOTH_JOKERS_AND_WILDCARD_BONUS: u32 = 47;
pub const BOTH_JOKERS_BONUS: u32 = 30;
pub const RED_JOKER_AND_WILDCARD_BONUS: u32 = 45;
pub const BLACK_JOKER_AND_WILDCARD_BONUS: u32 = 47;

/// Rounds played after the deal with a single hidden card.
pub const ONE_HIDDEN_MAX_ROUND: u8 = 4;
/// Two hidden cards add a round since nothing is revealed at the deal.
pub const TWO_HIDDEN_MAX_ROUND: u8 = 5;

pub const MIN_PLAYERS: usize = 2;
/// Largest table the deck supports: two hidden cards plus four revealed
/// cards for every player must fit in 55 cards.
pub const MAX_PLAYERS: usize = 9;

pub const DEFAULT_ANTE: Chips = 1;
pub const DEFAULT_STEP: Chips = 1;
pub const DEFAULT_CEILING: Chips = 5;
pub const DEFAULT_GAME_COUNT: usize = 2;
pub const DEFAULT_STARTING_CHIPS: Chips = 1000;

/// Highest call ceiling a set may reach, bombing escalation included.
/// Keeps `2 * ceiling` and the pot well inside `Chips`.
pub const MAX_CEILING: Chips = 1_000_000_000;
/// Most non-zero rungs a ladder may have (`ceiling / step`).
pub const MAX_LADDER_RUNGS: Chips = 100;
