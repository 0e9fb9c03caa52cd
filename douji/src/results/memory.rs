//! In-memory sink, mostly for tests and dry runs.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{GameRecord, ResultSink, SinkError, SinkResult};

/// Keeps every record it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<GameRecord>>,
    /// Game ids to reject, for exercising failure paths.
    reject: Vec<usize>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that fails for the listed game ids and stores the rest.
    #[must_use]
    pub fn rejecting(game_ids: impl IntoIterator<Item = usize>) -> Self {
        Self {
            records: Mutex::default(),
            reject: game_ids.into_iter().collect(),
        }
    }

    /// Stored records ordered by game id. Tasks may finish out of order.
    pub async fn records(&self) -> Vec<GameRecord> {
        let mut records = self.records.lock().await.clone();
        records.sort_by_key(|record| record.game_id);
        records
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn save_game(&self, record: &GameRecord) -> SinkResult<()> {
        if self.reject.contains(&record.game_id) {
            return Err(SinkError::Rejected(format!(
                "game {} of set {}",
                record.game_id, record.set_id
            )));
        }
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
