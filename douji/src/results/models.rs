//! Records handed to result sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::entities::{Chips, PlayerId, PlayerSnapshot};

/// Balances of every player at the end of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub set_id: Uuid,
    /// 1-based position of the game within its set.
    pub game_id: usize,
    pub players: Vec<PlayerSnapshot>,
    pub recorded_at: DateTime<Utc>,
}

impl GameRecord {
    #[must_use]
    pub fn new(set_id: Uuid, game_id: usize, players: Vec<PlayerSnapshot>) -> Self {
        Self {
            set_id,
            game_id,
            players,
            recorded_at: Utc::now(),
        }
    }

    /// One flat row per player.
    pub fn rows(&self) -> impl Iterator<Item = ResultRow> + '_ {
        self.players.iter().map(|player| ResultRow {
            set_id: self.set_id,
            game_id: self.game_id,
            player_id: player.player_id.clone(),
            player_name: player.player_name.clone(),
            points: player.points,
            recorded_at: self.recorded_at,
        })
    }
}

/// A single player's balance after a game, as stored by file sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub set_id: Uuid,
    pub game_id: usize,
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: Chips,
    pub recorded_at: DateTime<Utc>,
}
