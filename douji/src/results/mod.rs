//! Result persistence for finished games.
//!
//! The set runner hands each game's balances to a [`ResultSink`] on a
//! background task. Sinks never see live players, only owned snapshots.

pub mod errors;
pub mod json_lines;
pub mod memory;
pub mod models;

pub use errors::{SinkError, SinkResult};
pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;
pub use models::{GameRecord, ResultRow};

use async_trait::async_trait;

/// Destination for per-game results.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one game's balances. Failures are reported, never retried.
    async fn save_game(&self, record: &GameRecord) -> SinkResult<()>;
}
