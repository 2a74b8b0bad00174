//! Append-only JSONL turn log.
//!
//! Each applied turn is written as one JSON object per line holding the
//! plan, the transcript, and the room state after the turn. The file is only
//! ever appended to, so it doubles as an audit trail of the room.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use partyline_types::{PlayPlan, RoomState, TranscriptEvent, TurnId};

use crate::error::StoreError;

/// One line of the turn log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnLogEntry {
    /// Unique, time-ordered id of the turn.
    pub turn_id: TurnId,
    /// Wall-clock time the entry was written.
    pub logged_at: DateTime<Utc>,
    /// The plan that was executed.
    pub plan: PlayPlan,
    /// The delivered transcript.
    pub transcript: Vec<TranscriptEvent>,
    /// Room state after the turn.
    pub room_state: RoomState,
}

impl TurnLogEntry {
    /// Build an entry stamped with a fresh id and the current time.
    pub fn new(plan: PlayPlan, transcript: Vec<TranscriptEvent>, room_state: RoomState) -> Self {
        Self {
            turn_id: TurnId::new(),
            logged_at: Utc::now(),
            plan,
            transcript,
            room_state,
        }
    }
}

/// Handle to a JSONL log file.
#[derive(Debug, Clone)]
pub struct TurnLog {
    path: PathBuf,
}

impl TurnLog {
    /// Log to `path`. Parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry as a single line.
    pub async fn append(&self, entry: &TurnLogEntry) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|source| self.io_error(source))?;
        file.flush().await.map_err(|source| self.io_error(source))?;
        Ok(())
    }

    /// Read every entry back, in write order.
    pub async fn read_all(&self) -> Result<Vec<TurnLogEntry>, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
