//! # Douji
//!
//! Rules engine for douji, a bombing-pot card game played with a 55-card
//! deck: the usual 52 cards, two jokers and a special card.
//!
//! Every player antes, receives hidden and revealed cards, and over four
//! or five rounds either opens the betting ("calls") or matches the call.
//! Folded players drop out. When more than one player survives the last
//! round, hands are scored and the best takes the pot. A tie for the top
//! score "bombs" the game: nobody wins, the pot is carried into an extra
//! game, and the call ladder doubles.
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, scoring, and the per-game state machine
//! - [`set`]: Sequential games with bombing escalation
//! - [`results`]: Background persistence of per-game balances
//! - [`bot`]: Automated decision providers
//!
//! ## Example
//!
//! ```
//! use douji::game::{entities::{Card, Suit}, functional::eval};
//!
//! let hand = [Card(9, Suit::Club), Card(9, Suit::Spade), Card(9, Suit::Diamond)];
//! let evaluation = eval(&hand);
//! assert_eq!(evaluation.score, 27 + 30);
//! assert!(!evaluation.four_of_a_kind);
//! ```

/// Automated decision providers with difficulty presets.
pub mod bot;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    DecisionProvider, Game, GameError, GameOutcome, GameSettings, GameStatus, HiddenCards,
    constants,
    entities::{self, BidLadder, Card, CardDealer, Chips, Deck, Player, PlayerId, PlayerSnapshot},
    functional,
};

/// Result sinks.
pub mod results;
pub use results::{JsonLinesSink, MemorySink, ResultSink};

/// Set runner and configuration.
pub mod set;
pub use set::{SetConfig, SetError, SetReport, SetRunner};
