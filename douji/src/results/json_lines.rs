//! Append-only JSON lines file sink.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::{
    fs::OpenOptions,
    io::AsyncWriteExt,
    sync::Mutex,
};

use super::{GameRecord, ResultSink, SinkResult};

/// Writes one JSON object per player per game.
///
/// The file is created on first write and only ever appended to, so
/// several sets can share one results file.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    /// Serializes appends from concurrent save tasks.
    write_lock: Mutex<()>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultSink for JsonLinesSink {
    async fn save_game(&self, record: &GameRecord) -> SinkResult<()> {
        let mut buf = Vec::new();
        for row in record.rows() {
            serde_json::to_writer(&mut buf, &row)?;
            buf.push(b'\n');
        }

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&buf).await?;
        file.flush().await?;
        log::debug!(
            "appended {} rows for game {} to {}",
            record.players.len(),
            record.game_id,
            self.path.display()
        );
        Ok(())
    }
}
