//! Bot module providing automatic decision providers with difficulty presets.
//!
//! This module implements:
//! - BotPlayer: Heuristic bot scoring its own hand with the game evaluator
//! - RandomBot: Baseline bot picking uniformly from the ladder
//! - BotTable: Per-player registry implementing `DecisionProvider`
//!
//! ## Difficulty Presets
//!
//! ### Easy (Loose-Passive)
//! - Stays in most calls
//! - Rarely calls the top of the ladder
//! - Never bluffs
//!
//! ### Standard (Balanced)
//! - Moderate stay rate
//! - Bluffs 15% of the time
//!
//! ### TAG (Tight-Aggressive)
//! - Folds weak hands early
//! - Calls big with strong hands
//! - Bluffs 25% of the time
//!
//! ## Example
//!
//! ```
//! use douji::bot::{BotDifficulty, BotTable};
//! use douji::game::entities::Deck;
//! use douji::game::{Game, GameSettings};
//!
//! let mut table = BotTable::from_seed(7);
//! let mut players = table.spawn_bots(4, BotDifficulty::Standard, 100);
//! let mut deck = Deck::from_seed(7);
//!
//! let outcome = Game::new(&mut players, GameSettings::default(), None)
//!     .run(&mut deck, &mut table)
//!     .unwrap();
//! let total: i64 = players.iter().map(|p| p.chips).sum();
//! assert_eq!(total + outcome.leftover_pot, 400);
//! ```

pub mod decision;
pub mod manager;
pub mod models;

pub use decision::{BotDecisionConfig, BotDecisionMaker};
pub use manager::BotTable;
pub use models::{BotDifficulty, BotKind, BotPlayer, BotStats, DifficultyParams, RandomBot, Strategy};
