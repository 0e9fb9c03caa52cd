use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::{
    constants::{self, BLACK_JOKER_RANK, DECK_SIZE, RED_JOKER_RANK, SPECIAL_RANK, SUITED_RANKS},
    functional::{self, HandEvaluation},
    state_machine::GameError,
};

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Diamond,
    Club,
    Heart,
    Spade,
    Joker,
    // Only the rank 21 card carries this suit.
    Special,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Diamond => "♦",
            Self::Club => "♣",
            Self::Heart => "♥",
            Self::Spade => "♠",
            Self::Joker => "j",
            Self::Special => "*",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card ranks.
pub type Value = u8;

/// Evaluator output. Always non-negative since every rank is at least 2.
pub type Score = u32;

/// Chip amounts. Balances are signed since a player can owe chips in
/// the middle of a game.
pub type Chips = i64;

/// A card is a rank (2..=13, ace=15, black joker=17, red joker=19,
/// special=21) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

/// The two of hearts completes three- and four-of-a-kinds and pairs with
/// jokers for a bonus.
pub const WILDCARD: Card = Card(2, Suit::Heart);
pub const RED_JOKER: Card = Card(RED_JOKER_RANK, Suit::Joker);
pub const BLACK_JOKER: Card = Card(BLACK_JOKER_RANK, Suit::Joker);
pub const SPECIAL: Card = Card(SPECIAL_RANK, Suit::Special);

impl Card {
    #[must_use]
    pub const fn rank(&self) -> Value {
        self.0
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        *self == WILDCARD
    }

    #[must_use]
    pub fn is_red_joker(&self) -> bool {
        *self == RED_JOKER
    }

    #[must_use]
    pub fn is_black_joker(&self) -> bool {
        *self == BLACK_JOKER
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            constants::JACK => "J",
            constants::QUEEN => "Q",
            constants::KING => "K",
            constants::ACE => "A",
            BLACK_JOKER_RANK => "B",
            RED_JOKER_RANK => "R",
            SPECIAL_RANK => "S",
            v => &v.to_string(),
        };
        let repr = format!("{value}/{}", self.1);
        write!(f, "{repr:>4}")
    }
}

/// Anything that can hand out cards one at a time.
pub trait CardDealer {
    /// Remove and return the next card.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DeckExhausted`] once no cards remain.
    fn deal_one(&mut self) -> Result<Card, GameError>;
}

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    deck_idx: usize,
}

impl Deck {
    /// A full deck shuffled with the given random source.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// A full deck with a reproducible order.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::shuffled(&mut StdRng::seed_from_u64(seed))
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for value in SUITED_RANKS {
            for suit in [Suit::Diamond, Suit::Club, Suit::Heart, Suit::Spade] {
                cards.push(Card(value, suit));
            }
        }
        cards.extend([BLACK_JOKER, RED_JOKER, SPECIAL]);
        Self { cards, deck_idx: 0 }
    }
}

impl CardDealer for Deck {
    fn deal_one(&mut self) -> Result<Card, GameError> {
        let card = *self
            .cards
            .get(self.deck_idx)
            .ok_or(GameError::DeckExhausted)?;
        self.deck_idx += 1;
        Ok(card)
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(s: &str) -> Self {
        Self(s.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Type alias for a player's position in the set's player list. Positions
/// are stable for the whole set.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Hand {
    /// Cards only the owner can see.
    pub hidden: Vec<Card>,
    /// Cards everyone can see, in the order they were dealt.
    pub revealed: Vec<Card>,
}

impl Hand {
    pub fn clear(&mut self) {
        self.hidden.clear();
        self.revealed.clear();
    }

    /// Every card in the hand, hidden cards first.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.hidden.iter().chain(self.revealed.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hidden.len() + self.revealed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub chips: Chips,
    pub hand: Hand,
}

impl Player {
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, name: &str, chips: Chips) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            chips,
            hand: Hand::default(),
        }
    }

    pub fn receive_hidden(&mut self, card: Card) {
        self.hand.hidden.push(card);
    }

    pub fn receive_revealed(&mut self, card: Card) {
        self.hand.revealed.push(card);
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Rank of the most recently revealed card, or 0 with nothing revealed.
    /// This decides who calls next, so it is deliberately not the maximum.
    #[must_use]
    pub fn face_score(&self) -> Value {
        self.hand.revealed.last().map_or(0, Card::rank)
    }

    #[must_use]
    pub fn public_eval(&self) -> HandEvaluation {
        functional::eval(&self.hand.revealed)
    }

    #[must_use]
    pub fn public_score(&self) -> Score {
        self.public_eval().score
    }

    /// Only meaningful in the final round when several players remain.
    #[must_use]
    pub fn final_eval(&self) -> HandEvaluation {
        let cards: Vec<Card> = self.hand.all_cards().copied().collect();
        functional::eval(&cards)
    }

    #[must_use]
    pub fn final_score(&self) -> Score {
        self.final_eval().score
    }

    /// Value copy of the persistent parts of a player.
    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            player_id: self.id.clone(),
            player_name: self.name.clone(),
            points: self.chips,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let revealed = self
            .hand
            .revealed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{}({}-{})-{}: {revealed}",
            self.name,
            self.chips,
            self.public_score(),
            "**".repeat(self.hand.hidden.len()),
        )
    }
}

/// What the result sink receives for each player after a game.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: Chips,
}

/// Amounts a calling player may choose from in one round.
///
/// The ladder is `0, step, 2 * step, ..., ceiling`, and the final round
/// also allows `2 * ceiling`. Zero always means folding out of the call.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BidLadder {
    pub step: Chips,
    pub ceiling: Chips,
    pub final_round: bool,
}

impl BidLadder {
    #[must_use]
    pub const fn new(step: Chips, ceiling: Chips, final_round: bool) -> Self {
        Self {
            step,
            ceiling,
            final_round,
        }
    }

    #[must_use]
    pub fn contains(&self, amount: Chips) -> bool {
        if amount == 0 {
            return true;
        }
        if self.final_round && amount == self.ceiling.saturating_mul(2) {
            return true;
        }
        self.step > 0 && amount > 0 && amount % self.step == 0 && amount <= self.ceiling
    }

    /// Every legal amount in increasing order.
    #[must_use]
    pub fn options(&self) -> Vec<Chips> {
        let mut options = vec![0];
        if self.step > 0 {
            let mut amount = self.step;
            while amount <= self.ceiling {
                options.push(amount);
                match amount.checked_add(self.step) {
                    Some(next) => amount = next,
                    None => break,
                }
            }
        }
        if self.final_round {
            options.push(self.ceiling.saturating_mul(2));
        }
        options
    }

    /// Largest legal amount.
    #[must_use]
    pub fn max(&self) -> Chips {
        if self.final_round {
            self.ceiling.saturating_mul(2)
        } else if self.step > 0 && self.ceiling >= self.step {
            self.ceiling - self.ceiling % self.step
        } else {
            0
        }
    }
}

impl fmt::Display for BidLadder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = self
            .options()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    // === Card Tests ===

    #[test]
    fn test_special_cards_are_identified_by_suit_and_rank() {
        assert!(Card(2, Suit::Heart).is_wildcard());
        assert!(!Card(2, Suit::Spade).is_wildcard());
        assert!(Card(19, Suit::Joker).is_red_joker());
        assert!(Card(17, Suit::Joker).is_black_joker());
        assert!(!Card(19, Suit::Joker).is_black_joker());
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card(15, Suit::Spade).to_string(), " A/♠");
        assert_eq!(Card(10, Suit::Club).to_string(), "10/♣");
        assert_eq!(RED_JOKER.to_string(), " R/j");
    }

    // === Deck Tests ===

    #[test]
    fn test_deck_initialization() {
        let deck = Deck::default();
        assert_eq!(deck.cards.len(), DECK_SIZE);
        assert_eq!(deck.remaining(), DECK_SIZE);
    }

    #[test]
    fn test_deck_has_no_rank_fourteen() {
        let deck = Deck::default();
        assert!(deck.cards.iter().all(|card| card.0 != 14));
        assert!(deck.cards.contains(&SPECIAL));
    }

    #[test]
    fn test_fresh_deck_deals_55_distinct_cards() {
        let mut deck = Deck::from_seed(7);
        let mut seen = HashSet::new();
        for _ in 0..DECK_SIZE {
            let card = deck.deal_one().unwrap();
            assert!(seen.insert(card), "{card} dealt twice");
        }
        assert_eq!(seen.len(), DECK_SIZE);
        assert_eq!(deck.deal_one(), Err(GameError::DeckExhausted));
    }

    #[test]
    fn test_seeded_decks_are_reproducible() {
        let mut a = Deck::from_seed(42);
        let mut b = Deck::from_seed(42);
        for _ in 0..DECK_SIZE {
            assert_eq!(a.deal_one().unwrap(), b.deal_one().unwrap());
        }
    }

    #[test]
    fn test_deck_shuffle_resets_index() {
        let mut deck = Deck::from_seed(1);
        deck.deal_one().unwrap();
        deck.deal_one().unwrap();
        assert_eq!(deck.remaining(), DECK_SIZE - 2);
        deck.shuffle(&mut StdRng::seed_from_u64(2));
        assert_eq!(deck.remaining(), DECK_SIZE);
        assert!(deck.deal_one().is_ok());
    }

    // === Player Tests ===

    #[test]
    fn test_face_score_is_last_revealed_card() {
        let mut player = Player::new("1", "liu", 100);
        assert_eq!(player.face_score(), 0);
        player.receive_revealed(Card(10, Suit::Club));
        assert_eq!(player.face_score(), 10);
        player.receive_revealed(Card(15, Suit::Club));
        assert_eq!(player.face_score(), 15);
        player.receive_revealed(Card(5, Suit::Spade));
        assert_eq!(player.face_score(), 5);
    }

    #[test]
    fn test_receive_hidden_card() {
        let mut player = Player::new("1", "liu", 100);
        player.receive_hidden(Card(10, Suit::Club));
        assert_eq!(player.hand.hidden.len(), 1);
        player.receive_hidden(Card(5, Suit::Club));
        assert_eq!(player.hand.hidden.len(), 2);
        assert!(player.hand.revealed.is_empty());
    }

    #[test]
    fn test_clear_hand_keeps_chips() {
        let mut player = Player::new("1", "liu", 100);
        player.receive_hidden(Card(10, Suit::Club));
        player.receive_revealed(Card(5, Suit::Club));
        player.chips -= 3;
        player.clear_hand();
        assert!(player.hand.is_empty());
        assert_eq!(player.chips, 97);
    }

    #[test]
    fn test_final_score_includes_hidden_cards() {
        let mut player = Player::new("1", "liu", 100);
        player.receive_hidden(Card(5, Suit::Club));
        for card in [
            Card(10, Suit::Club),
            Card(12, Suit::Club),
            Card(4, Suit::Club),
            Card(5, Suit::Spade),
        ] {
            player.receive_revealed(card);
        }
        assert_eq!(player.public_score(), 31);
        assert_eq!(player.final_score(), 36);
    }

    #[test]
    fn test_snapshot_is_a_value_copy() {
        let mut player = Player::new("7", "gu", 50);
        let snapshot = player.snapshot();
        player.chips = 10;
        assert_eq!(snapshot.points, 50);
        assert_eq!(snapshot.player_id, PlayerId::new("7"));
        assert_eq!(snapshot.player_name, "gu");
    }

    #[test]
    fn test_player_id_trims_whitespace() {
        let id: PlayerId = " abc ".into();
        assert_eq!(id.as_str(), "abc");
    }

    // === BidLadder Tests ===

    #[test]
    fn test_ladder_options() {
        assert_eq!(BidLadder::new(1, 5, false).options(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(
            BidLadder::new(1, 5, true).options(),
            vec![0, 1, 2, 3, 4, 5, 10]
        );
        assert_eq!(BidLadder::new(2, 10, false).options(), vec![0, 2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_ladder_contains() {
        let ladder = BidLadder::new(2, 10, false);
        assert!(ladder.contains(0));
        assert!(ladder.contains(4));
        assert!(!ladder.contains(3));
        assert!(!ladder.contains(12));
        assert!(!ladder.contains(20));
        assert!(!ladder.contains(-2));

        let last = BidLadder::new(2, 10, true);
        assert!(last.contains(20));
        assert_eq!(last.max(), 20);
    }

    #[test]
    fn test_ladder_max_matches_options() {
        for ladder in [
            BidLadder::new(1, 5, false),
            BidLadder::new(2, 5, false),
            BidLadder::new(3, 9, true),
            BidLadder::new(10, 5, false),
        ] {
            assert_eq!(Some(&ladder.max()), ladder.options().last(), "{ladder:?}");
        }
    }

    #[test]
    fn test_ladder_near_chip_limit_does_not_overflow() {
        let ladder = BidLadder::new(Chips::MAX / 2, Chips::MAX, true);
        assert_eq!(ladder.max(), Chips::MAX);
        assert_eq!(ladder.options(), vec![0, Chips::MAX / 2, Chips::MAX - 1, Chips::MAX]);
        assert!(ladder.contains(Chips::MAX));
    }
}
