//! Persistence of the last execution date.
//!
//! The date of the last completed transfer is the start of the next run's
//! window. It is stored as a small JSON document:
//!
//! ```json
//! { "lastExecution": "2024-01-05T10:00:00" }
//! ```
//!
//! Timestamps with an offset (`2024-01-05T10:00:00.1234567+01:00`) are read
//! as the wall time they were written with.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_info, msg_warning};
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_FILE_NAME: &str = "history.json";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(default, deserialize_with = "deserialize_last_execution")]
    pub last_execution: Option<NaiveDateTime>,
}

fn deserialize_last_execution<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| parse_timestamp(&value).map_err(de::Error::custom))
        .transpose()
}

/// Reads an ISO 8601 timestamp, with or without an offset.
pub fn parse_timestamp(value: &str) -> anyhow::Result<NaiveDateTime> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.naive_local())
        .or_else(|_| value.parse::<NaiveDateTime>())
        .map_err(|_| msg_error_anyhow!(Message::WatermarkInvalidTimestamp(value.to_string())))
}

/// Where the last execution date is kept between runs.
pub trait WatermarkStore {
    /// `None` when no run has completed yet.
    fn load(&self) -> Result<Option<NaiveDateTime>>;

    fn save(&self, last_execution: NaiveDateTime) -> Result<()>;
}

/// [`WatermarkStore`] backed by `history.json`.
#[derive(Debug, Clone)]
pub struct FileWatermark {
    path: PathBuf,
}

impl FileWatermark {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `history.json` in the application data directory.
    pub fn in_data_storage() -> Result<Self> {
        Ok(Self::new(DataStorage::new().get_path(HISTORY_FILE_NAME)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Forgets the last execution so the next run starts from the look-back.
    ///
    /// An unreadable file is logged and overwritten.
    pub fn reset(&self) -> Result<()> {
        match self.load() {
            Ok(Some(last_execution)) => msg_info!(Message::WatermarkCurrent(last_execution.to_string())),
            Ok(None) => msg_info!(Message::WatermarkNotSet),
            Err(e) => msg_warning!(Message::WatermarkUnreadable(e.to_string())),
        }
        self.write(&History::default())
    }

    fn write(&self, history: &History) -> Result<()> {
        let json = serde_json::to_string(history)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl WatermarkStore for FileWatermark {
    fn load(&self) -> Result<Option<NaiveDateTime>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let history: History = serde_json::from_str(&json)?;
        Ok(history.last_execution)
    }

    fn save(&self, last_execution: NaiveDateTime) -> Result<()> {
        self.write(&History {
            last_execution: Some(last_execution),
        })
    }
}
