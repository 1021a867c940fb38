//! Classification history: append-only records read back most recent first.

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::sentiment::{ClassificationResult, Sentiment};

/// Environment variable overriding the history file location.
pub const HISTORY_ENV: &str = "VIETSENT_HISTORY";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History IO error: {0}")]
    Io(#[from] io::Error),
    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("History store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sentiment: Sentiment,
    pub timestamp: String,
}

pub trait HistoryStore: Send + Sync {
    fn append(&self, text: &str, sentiment: Sentiment, timestamp: &str) -> Result<(), HistoryError>;

    /// Up to `limit` entries, newest first, optionally restricted to one sentiment.
    fn query(
        &self,
        limit: usize,
        filter: Option<Sentiment>,
    ) -> Result<Vec<HistoryEntry>, HistoryError>;

    /// Stores the original text of a result, stamped with the local time.
    fn record(&self, result: &ClassificationResult) -> Result<(), HistoryError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.append(&result.original_text, result.sentiment, &timestamp)
    }
}

fn newest_first<'a, I>(entries: I, limit: usize, filter: Option<Sentiment>) -> Vec<HistoryEntry>
where
    I: DoubleEndedIterator<Item = &'a HistoryEntry>,
{
    entries
        .rev()
        .filter(|entry| filter.map_or(true, |s| entry.sentiment == s))
        .take(limit)
        .cloned()
        .collect()
}

#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(
        &self,
        text: &str,
        sentiment: Sentiment,
        timestamp: &str,
    ) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        entries.push(HistoryEntry {
            text: text.to_string(),
            sentiment,
            timestamp: timestamp.to_string(),
        });
        Ok(())
    }

    fn query(
        &self,
        limit: usize,
        filter: Option<Sentiment>,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries.lock().map_err(|_| HistoryError::Poisoned)?;
        Ok(newest_first(entries.iter(), limit, filter))
    }
}

/// History kept as one JSON object per line in a local file.
#[derive(Debug)]
pub struct JsonlHistory {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHistory {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        log::info!("History store at {:?}", path);
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(HISTORY_ENV) {
            return PathBuf::from(path);
        }
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(env::temp_dir)
            .join("vietsent")
            .join("history.jsonl")
    }

    fn read_all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut entries = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("Skipping malformed history line {}: {}", number + 1, e),
            }
        }
        Ok(entries)
    }
}

impl HistoryStore for JsonlHistory {
    fn append(
        &self,
        text: &str,
        sentiment: Sentiment,
        timestamp: &str,
    ) -> Result<(), HistoryError> {
        let entry = HistoryEntry {
            text: text.to_string(),
            sentiment,
            timestamp: timestamp.to_string(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().map_err(|_| HistoryError::Poisoned)?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        log::debug!("Saved history entry ({})", sentiment);
        Ok(())
    }

    fn query(
        &self,
        limit: usize,
        filter: Option<Sentiment>,
    ) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.read_all()?;
        let history = newest_first(entries.iter(), limit, filter);
        log::debug!("Loaded {} history entries", history.len());
        Ok(history)
    }
}
