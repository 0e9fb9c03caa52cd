//! Hand scoring.
//!
//! A hand's score is the sum of its ranks plus bonuses for jokers, the
//! wildcard, and three- or four-of-a-kinds. Scoring is a pure function of
//! the cards: nothing is remembered between calls.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{
    constants::{
        BLACK_JOKER_AND_WILDCARD_BONUS, BOTH_JOKERS_AND_WILDCARD_BONUS, BOTH_JOKERS_BONUS,
        FIVE_OF_A_KIND_SCORE, FOUR_OF_A_KIND_BONUS, RED_JOKER_AND_WILDCARD_BONUS,
        THREE_OF_A_KIND_BONUS,
    },
    entities::{Card, Score, Value},
};

/// The wildcard's rank. Pairs and triples of this rank are never completed
/// by the wildcard.
const WILD_RANK: Value = 2;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct HandEvaluation {
    pub score: Score,
    pub four_of_a_kind: bool,
}

/// Rank counts in ascending rank order, with the special cards a hand holds.
#[derive(Debug, Default)]
struct Tally {
    counts: BTreeMap<Value, u8>,
    sum: Score,
    wildcard: bool,
    red_joker: bool,
    black_joker: bool,
}

impl Tally {
    fn new(cards: &[Card]) -> Self {
        let mut tally = Self::default();
        for card in cards {
            tally.wildcard |= card.is_wildcard();
            tally.red_joker |= card.is_red_joker();
            tally.black_joker |= card.is_black_joker();
            *tally.counts.entry(card.rank()).or_default() += 1;
            tally.sum += Score::from(card.rank());
        }
        tally
    }

    fn count_of(&self, n: u8) -> usize {
        self.counts.values().filter(|&&count| count == n).count()
    }

    /// Ranks other than the wildcard's with exactly `n` cards, lowest first.
    fn non_wild_ranks_with(&self, n: u8) -> impl Iterator<Item = Value> + '_ {
        self.counts
            .iter()
            .filter(move |&(&rank, &count)| rank != WILD_RANK && count == n)
            .map(|(&rank, _)| rank)
    }
}

/// Bonus for the jokers and wildcard in a hand, and whether the wildcard
/// was spent earning it.
fn joker_bonus(red_joker: bool, black_joker: bool, wildcard: bool) -> (Score, bool) {
    match (red_joker, black_joker, wildcard) {
        (true, true, true) => (BOTH_JOKERS_AND_WILDCARD_BONUS, true),
        (true, true, false) => (BOTH_JOKERS_BONUS, false),
        (true, false, true) => (RED_JOKER_AND_WILDCARD_BONUS, true),
        (false, true, true) => (BLACK_JOKER_AND_WILDCARD_BONUS, true),
        _ => (0, false),
    }
}

/// Score a set of cards.
///
/// The wildcard is spent at most once, in this order of preference:
/// 1. completing a four-of-a-kind from a natural three-of-a-kind,
/// 2. pairing with a joker for a joker bonus,
/// 3. completing a three-of-a-kind from the highest natural pair.
///
/// Holding the wildcard alongside a natural four-of-a-kind (of any rank but
/// the wildcard's) scores a flat 300 that beats every other hand.
#[must_use]
pub fn eval(cards: &[Card]) -> HandEvaluation {
    let mut tally = Tally::new(cards);
    let mut evaluation = HandEvaluation {
        score: tally.sum,
        four_of_a_kind: false,
    };

    if tally.wildcard {
        if tally.non_wild_ranks_with(4).next().is_some() {
            return HandEvaluation {
                score: FIVE_OF_A_KIND_SCORE,
                four_of_a_kind: true,
            };
        }
        let triple = tally.non_wild_ranks_with(3).next();
        if let Some(rank) = triple {
            evaluation.four_of_a_kind = true;
            evaluation.score += Score::from(rank - WILD_RANK);
            tally.wildcard = false;
            tally.counts.insert(rank, 4);
            if let Some(twos) = tally.counts.get_mut(&WILD_RANK) {
                *twos -= 1;
            }
        }
    }

    let (bonus, spent_wildcard) = joker_bonus(tally.red_joker, tally.black_joker, tally.wildcard);
    evaluation.score += bonus;
    if spent_wildcard {
        tally.wildcard = false;
    }

    if tally.count_of(4) > 0 {
        evaluation.four_of_a_kind = true;
        evaluation.score += FOUR_OF_A_KIND_BONUS;
        return evaluation;
    }

    if tally.wildcard {
        let highest_pair = tally.non_wild_ranks_with(2).last();
        if let Some(rank) = highest_pair {
            evaluation.score += Score::from(rank - WILD_RANK);
            tally.counts.insert(rank, 3);
        }
    }

    // A six card hand can hold two separate triples.
    evaluation.score += THREE_OF_A_KIND_BONUS * tally.count_of(3) as Score;
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{BLACK_JOKER, RED_JOKER, SPECIAL, Suit, WILDCARD};

    fn c(rank: Value) -> Card {
        Card(rank, Suit::Club)
    }

    fn score(cards: &[Card]) -> Score {
        eval(cards).score
    }

    #[test]
    fn test_empty_hand_scores_zero() {
        assert_eq!(eval(&[]), HandEvaluation::default());
    }

    #[test]
    fn test_plain_cards_score_their_sum() {
        assert_eq!(score(&[c(10)]), 10);
        assert_eq!(score(&[c(10), c(13)]), 23);
        assert_eq!(score(&[c(10), c(13), c(3)]), 26);
        assert_eq!(score(&[c(10), c(13), c(5), c(8)]), 36);
    }

    #[test]
    fn test_pairs_get_no_bonus() {
        let cards = [c(5), c(6), c(7), Card(7, Suit::Spade), c(15), Card(6, Suit::Heart)];
        assert_eq!(score(&cards), 46);
    }

    #[test]
    fn test_special_card_only_adds_its_rank() {
        assert_eq!(score(&[SPECIAL, c(4)]), 25);
    }

    #[test]
    fn test_natural_three_of_a_kind() {
        assert_eq!(score(&[c(5), c(5), c(5)]), 45);
        assert_eq!(score(&[c(10), c(10), c(5), c(10)]), 65);
        assert_eq!(score(&[c(12), c(10), c(15), c(12), c(12)]), 91);
    }

    #[test]
    fn test_two_natural_triples_stack() {
        let cards = [c(3), c(3), c(5), c(5), c(3), c(5)];
        assert_eq!(score(&cards), 45 + 39);
    }

    #[test]
    fn test_wildcard_completes_three_of_a_kind() {
        assert_eq!(score(&[c(10), c(10), c(5), WILDCARD]), 65);
        assert_eq!(score(&[c(5), WILDCARD, c(5)]), 45);
        assert_eq!(score(&[c(3), c(3), c(2), WILDCARD]), 41);
    }

    #[test]
    fn test_wildcard_completes_the_highest_pair() {
        let cards = [c(3), c(5), c(5), c(3), WILDCARD];
        assert_eq!(score(&cards), 45 + 6);
        let cards = [c(4), c(4), c(5), c(5), c(13), WILDCARD];
        assert_eq!(score(&cards), 45 + 21);
    }

    #[test]
    fn test_wildcard_never_completes_a_pair_of_twos() {
        let cards = [c(2), c(2), c(5), WILDCARD];
        // The wildcard's own rank makes a natural triple of twos.
        assert_eq!(score(&cards), 41);
    }

    #[test]
    fn test_natural_four_of_a_kind() {
        let evaluation = eval(&[c(10), c(10), c(10), c(10), c(11)]);
        assert_eq!(evaluation.score, 111);
        assert!(evaluation.four_of_a_kind);

        let evaluation = eval(&[c(3), c(3), c(3), c(3), c(13)]);
        assert_eq!(evaluation.score, 85);
        assert!(evaluation.four_of_a_kind);
    }

    #[test]
    fn test_wildcard_completes_four_of_a_kind() {
        let evaluation = eval(&[c(10), c(10), WILDCARD, c(10), c(11)]);
        assert_eq!(evaluation.score, 111);
        assert!(evaluation.four_of_a_kind);

        let evaluation = eval(&[c(10), c(10), WILDCARD, c(10)]);
        assert_eq!(evaluation.score, 100);
        assert!(evaluation.four_of_a_kind);
    }

    #[test]
    fn test_four_of_a_kind_skips_triple_bonus() {
        let evaluation = eval(&[c(2), c(10), WILDCARD, c(10), c(2), c(10)]);
        assert_eq!(evaluation.score, 104);
        assert!(evaluation.four_of_a_kind);

        let evaluation = eval(&[c(3), c(10), WILDCARD, c(10), c(3), c(10)]);
        assert_eq!(evaluation.score, 106);
    }

    #[test]
    fn test_four_twos_including_wildcard() {
        let evaluation = eval(&[c(2), c(2), WILDCARD, c(2)]);
        assert_eq!(evaluation.score, 68);
        assert!(evaluation.four_of_a_kind);

        let evaluation = eval(&[c(2), c(2), WILDCARD, c(12), c(2)]);
        assert_eq!(evaluation.score, 80);
    }

    #[test]
    fn test_wildcard_with_natural_four_of_a_kind_scores_300() {
        let evaluation = eval(&[c(3), c(3), WILDCARD, c(12), c(3), c(3)]);
        assert_eq!(evaluation.score, FIVE_OF_A_KIND_SCORE);
        assert!(evaluation.four_of_a_kind);
    }

    #[test]
    fn test_joker_bonus_table() {
        assert_eq!(joker_bonus(true, true, true), (47, true));
        assert_eq!(joker_bonus(true, true, false), (30, false));
        assert_eq!(joker_bonus(true, false, true), (45, true));
        assert_eq!(joker_bonus(false, true, true), (47, true));
        assert_eq!(joker_bonus(true, false, false), (0, false));
        assert_eq!(joker_bonus(false, true, false), (0, false));
        assert_eq!(joker_bonus(false, false, true), (0, false));
        assert_eq!(joker_bonus(false, false, false), (0, false));
    }

    #[test]
    fn test_jokers() {
        assert_eq!(score(&[BLACK_JOKER, RED_JOKER]), 66);
        assert_eq!(score(&[BLACK_JOKER, c(5), RED_JOKER]), 71);
        assert_eq!(score(&[BLACK_JOKER, c(5), RED_JOKER, c(2)]), 73);
        assert_eq!(score(&[BLACK_JOKER, WILDCARD]), 66);
        assert_eq!(score(&[RED_JOKER, WILDCARD]), 66);
        assert_eq!(score(&[BLACK_JOKER, c(5), WILDCARD]), 71);
        assert_eq!(score(&[BLACK_JOKER, WILDCARD, RED_JOKER]), 85);
        assert_eq!(score(&[BLACK_JOKER, WILDCARD, RED_JOKER, c(3)]), 88);
    }

    #[test]
    fn test_jokers_with_three_of_a_kind() {
        let cards = [BLACK_JOKER, c(5), c(5), c(5), RED_JOKER];
        assert_eq!(score(&cards), 45 + 66);
    }

    #[test]
    fn test_joker_bonus_uses_up_the_wildcard() {
        // Red joker and wildcard earn 45, leaving no wildcard for the pairs.
        let cards = [c(4), c(4), c(5), c(5), RED_JOKER, WILDCARD];
        assert_eq!(score(&cards), 84);
    }

    #[test]
    fn test_four_of_a_kind_uses_up_the_wildcard_before_jokers() {
        let cards = [c(4), c(4), c(5), c(4), RED_JOKER, WILDCARD];
        let evaluation = eval(&cards);
        assert_eq!(evaluation.score, 5 + 19 + 4 * 4 + 60);
        assert!(evaluation.four_of_a_kind);

        let cards = [c(4), c(4), c(4), RED_JOKER, WILDCARD];
        assert_eq!(score(&cards), 19 + 4 * 4 + 60);
    }

    #[test]
    fn test_eval_is_stateless() {
        let cards = [c(10), c(10), WILDCARD, c(10)];
        assert_eq!(eval(&cards), eval(&cards));
        assert!(!eval(&[c(4), c(9)]).four_of_a_kind);
    }
}
