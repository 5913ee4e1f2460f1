//! Records of finished games and where they are stored

use serde::{Deserialize, Serialize};

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::RecordError;

/// A finished game, in the shape the score board service stores it
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "gameNumber")]
    pub game_number: String,
    #[serde(rename = "gameType")]
    pub game_type: String,
    #[serde(rename = "Player1Name")]
    pub player1_name: String,
    #[serde(rename = "Player2Name")]
    pub player2_name: String,
    /// The winner's name, or "Draw"
    #[serde(rename = "WinnerName")]
    pub winner_name: String,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "GameDate")]
    pub game_date: i64,
}

pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Somewhere to put finished games
pub trait RecordSink {
    fn save(&mut self, record: &GameRecord) -> Result<(), RecordError>;
}

/// Append-only store writing one JSON object per line
pub struct NdjsonRecordStore {
    w: BufWriter<File>,
}

impl NdjsonRecordStore {
    /// Opens `path` for appending, creating it if it doesn't exist
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
        })
    }
}

impl RecordSink for NdjsonRecordStore {
    fn save(&mut self, record: &GameRecord) -> Result<(), RecordError> {
        let mut buf = serde_json::to_vec(record)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        // records are rare, keep the file complete after every game
        self.w.flush()?;
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Default, Debug)]
pub struct MemoryRecordStore {
    pub records: Vec<GameRecord>,
}

impl RecordSink for MemoryRecordStore {
    fn save(&mut self, record: &GameRecord) -> Result<(), RecordError> {
        self.records.push(record.clone());
        Ok(())
    }
}
