//! Append-only JSONL journals for weight and meal entries.
//!
//! Entries are appended to JSON Lines files with file locking to ensure
//! safe concurrent access; reads tolerate corrupt lines so a crashed
//! writer never blocks the app.

use crate::{MealEntry, Result, WeightEntry};
use chrono::{Duration, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Entry sink trait for persisting journal entries
pub trait EntrySink<T> {
    fn append(&mut self, entry: &T) -> Result<()>;
}

/// JSONL-based entry sink with file locking
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl<T: Serialize> EntrySink<T> for JsonlSink {
    fn append(&mut self, entry: &T) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(entry)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        file.unlock()?;

        tracing::debug!("Appended entry to {:?}", self.path);
        Ok(())
    }
}

/// Read all entries from a JSONL journal
///
/// Corrupt lines are logged and skipped rather than failing the read.
pub fn read_entries<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut entries = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<T>(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!("Failed to parse entry at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Load weight entries from the last N days, newest first
pub fn load_recent_weights(path: &Path, days: i64) -> Result<Vec<WeightEntry>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut entries: Vec<WeightEntry> = read_entries(path)?
        .into_iter()
        .filter(|e: &WeightEntry| e.logged_at >= cutoff)
        .collect();

    entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    tracing::info!(
        "Loaded {} weight entries from last {} days",
        entries.len(),
        days
    );
    Ok(entries)
}

/// Load meal entries from the last N days, newest first
pub fn load_recent_meals(path: &Path, days: i64) -> Result<Vec<MealEntry>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut entries: Vec<MealEntry> = read_entries(path)?
        .into_iter()
        .filter(|e: &MealEntry| e.logged_at >= cutoff)
        .collect();

    entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    tracing::info!(
        "Loaded {} meal entries from last {} days",
        entries.len(),
        days
    );
    Ok(entries)
}
