//! CSV export for the weight journal.
//!
//! Archives journal entries into an append-only CSV with proper error
//! handling to prevent data loss.

use crate::{Result, WeightEntry};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    weight_kg: f64,
    logged_at: String,
    note: Option<String>,
}

impl From<&WeightEntry> for CsvRow {
    fn from(entry: &WeightEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            weight_kg: entry.weight_kg,
            logged_at: entry.logged_at.to_rfc3339(),
            note: entry.note.clone(),
        }
    }
}

/// Roll up journal entries into CSV and archive the journal atomically
///
/// This function:
/// 1. Reads all entries from the journal
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the journal to .processed
/// 5. Returns the number of entries processed
///
/// # Safety
/// - CSV is fsynced before the journal is renamed
/// - The journal is renamed (not deleted) to allow manual recovery
/// - Processed journal files can be cleaned up separately
pub fn journal_to_csv_and_archive(journal_path: &Path, csv_path: &Path) -> Result<usize> {
    let entries: Vec<WeightEntry> = crate::journal::read_entries(journal_path)?;

    if entries.is_empty() {
        tracing::info!("No entries in journal to export");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Headers only when the file is empty
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &entries {
        let row = CsvRow::from(entry);
        writer.serialize(row)?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} entries to CSV", entries.len());

    // Atomically archive the journal by renaming it
    let processed_path = journal_path.with_extension("jsonl.processed");
    std::fs::rename(journal_path, &processed_path)?;

    tracing::info!("Archived journal to {:?}", processed_path);

    Ok(entries.len())
}

/// Clean up old processed journal files
///
/// Removes all .processed files in the given directory.
pub fn cleanup_processed_journals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed journal: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed journal files", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EntrySink, JsonlSink};
    use chrono::Utc;
    use std::fs::File;
    use uuid::Uuid;

    fn create_entry(kg: f64) -> WeightEntry {
        WeightEntry {
            id: Uuid::new_v4(),
            weight_kg: kg,
            logged_at: Utc::now(),
            note: Some("morning".into()),
        }
    }

    #[test]
    fn test_export_creates_csv_and_archives() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("weights.jsonl");
        let csv_path = temp_dir.path().join("weights.csv");

        let mut sink = JsonlSink::new(&journal_path);
        for kg in [70.0, 69.5, 69.8] {
            sink.append(&create_entry(kg)).unwrap();
        }

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert!(!journal_path.exists());
        assert!(journal_path.with_extension("jsonl.processed").exists());
    }

    #[test]
    fn test_export_appends_across_runs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("weights.jsonl");
        let csv_path = temp_dir.path().join("weights.csv");

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&create_entry(70.0)).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&create_entry(69.5)).unwrap();
        assert_eq!(journal_to_csv_and_archive(&journal_path, &csv_path).unwrap(), 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_export_empty_journal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("empty.jsonl");
        let csv_path = temp_dir.path().join("weights.csv");

        File::create(&journal_path).unwrap();

        let count = journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_processed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let journal_path = temp_dir.path().join("weights.jsonl");
        let csv_path = temp_dir.path().join("weights.csv");

        let mut sink = JsonlSink::new(&journal_path);
        sink.append(&create_entry(70.0)).unwrap();
        journal_to_csv_and_archive(&journal_path, &csv_path).unwrap();

        let cleaned = cleanup_processed_journals(temp_dir.path()).unwrap();
        assert_eq!(cleaned, 1);
        assert!(!journal_path.with_extension("jsonl.processed").exists());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");
        assert_eq!(cleanup_processed_journals(&missing).unwrap(), 0);
    }
}
