//! Multi-game sets with pot escalation.
//!
//! A set plays a fixed number of games. A bombed game keeps its pot for the
//! next one, doubles the call step and ceiling, and adds one game to the
//! set. Any other result resets the ladder and lets the winner open the
//! next two-hidden game.

pub mod config;
pub mod errors;
pub mod runner;

pub use config::SetConfig;
pub use errors::{SetError, SetResult};
pub use runner::{PersistenceFailure, SetReport, SetRunner};
