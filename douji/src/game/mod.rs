//! Douji game engine - scoring, dealing, and the per-game state machine.
//!
//! This module provides:
//! - Cards, the 55-card deck, hands, and players
//! - The pure hand evaluator
//! - A typestate game FSM (`Ready -> InProcess -> Over | Bombing`)

pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;
pub mod states;

pub use state_machine::{
    DecisionProvider, Finished, Game, GameData, GameError, GameOutcome, GameSettings, GameStatus,
    HiddenCards, Phase,
};
pub use states::{Bombing, InProcess, Over, Ready, WinReason};
