//! Profile persistence behind an injected repository capability.
//!
//! The rest of the system never touches a storage client directly; it is
//! handed a `ProfileRepository`. The file-backed implementation uses
//! shared/exclusive locks and atomic temp-file writes.

use crate::{Error, Profile, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage capability for the user profile
pub trait ProfileRepository {
    /// Load the stored profile, if any
    fn load(&self) -> Result<Option<Profile>>;

    /// Persist the profile
    fn save(&self, profile: &Profile) -> Result<()>;
}

/// JSON-file-backed profile store with file locking
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    /// Create a store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileRepository for JsonProfileStore {
    /// Load the profile with shared locking
    ///
    /// Returns `None` if the file doesn't exist. If the file is corrupted
    /// or unreadable, logs a warning and returns `None`.
    fn load(&self) -> Result<Option<Profile>> {
        if !self.path.exists() {
            tracing::info!("No profile file found at {:?}", self.path);
            return Ok(None);
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile file {:?}: {}. Treating as absent.",
                    self.path,
                    e
                );
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock profile file {:?}: {}. Treating as absent.",
                self.path,
                e
            );
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read profile file {:?}: {}. Treating as absent.",
                self.path,
                e
            );
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<Profile>(&contents) {
            Ok(profile) => {
                tracing::debug!("Loaded profile from {:?}", self.path);
                Ok(Some(profile))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile file {:?}: {}. Treating as absent.",
                    self.path,
                    e
                );
                Ok(None)
            }
        }
    }

    /// Save the profile with exclusive locking
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Unique temp file in the same directory for atomic rename
        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        // Exclusive lock serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(profile)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile to {:?}", self.path);
        Ok(())
    }
}

/// Load the profile, modify it, and save it back
///
/// Errors if no profile exists yet; onboarding must run first.
pub fn update_profile<F>(repo: &dyn ProfileRepository, f: F) -> Result<Profile>
where
    F: FnOnce(&mut Profile) -> Result<()>,
{
    let mut profile = repo
        .load()?
        .ok_or_else(|| Error::Profile("no profile saved yet".into()))?;
    f(&mut profile)?;
    repo.save(&profile)?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityLevel, Gender};
    use chrono::Utc;
    use uuid::Uuid;

    fn test_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            gender: Gender::Female,
            age: 30,
            height_cm: 165.0,
            current_weight_kg: 70.0,
            starting_weight_kg: 72.0,
            goal_weight_kg: 63.0,
            activity_level: ActivityLevel::LightlyActive,
            weekly_goal_kg: 0.5,
            daily_calorie_goal: 1465,
            daily_steps_goal: 10_000,
            daily_water_goal_ml: 2100,
            add_burned_calories: false,
            program_steps: vec!["log_meals".into(), "move_more".into()],
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("profile.json"));

        let profile = test_profile();
        store.save(&profile).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.id, profile.id);
        assert_eq!(loaded.daily_calorie_goal, 1465);
        assert_eq!(loaded.program_steps, profile.program_steps);
    }

    #[test]
    fn test_load_nonexistent_returns_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("nonexistent.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_profile_treated_as_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("profile.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let store = JsonProfileStore::new(&path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_storage_field_names_match_backend_schema() {
        let profile = test_profile();
        let json = serde_json::to_string(&profile).unwrap();

        for field in [
            "\"gender\":\"female\"",
            "\"activity_level\":\"lightly_active\"",
            "\"daily_calorie_goal\":1465",
            "\"daily_water_goal_ml\":2100",
            "\"daily_steps_goal\":10000",
            "\"current_weight_kg\":70.0",
            "\"goal_weight_kg\":63.0",
            "\"height_cm\":165.0",
        ] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }
    }

    #[test]
    fn test_active_stored_as_moderately_active() {
        let mut profile = test_profile();
        profile.activity_level = ActivityLevel::Active;

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"activity_level\":\"moderately_active\""));

        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.activity_level, ActivityLevel::Active);
    }

    #[test]
    fn test_update_pattern() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("profile.json"));
        store.save(&test_profile()).unwrap();

        update_profile(&store, |profile| {
            profile.current_weight_kg = 69.0;
            Ok(())
        })
        .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.current_weight_kg, 69.0);
    }

    #[test]
    fn test_update_without_profile_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("profile.json"));

        let result = update_profile(&store, |_| Ok(()));
        assert!(result.is_err());
    }

    #[test]
    fn test_atomic_save_leaves_no_stray_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonProfileStore::new(temp_dir.path().join("profile.json"));
        store.save(&test_profile()).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "profile.json")
            .collect();
        assert!(
            extras.is_empty(),
            "Expected only profile.json, found extras: {:?}",
            extras
        );
    }
}
