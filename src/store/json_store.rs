use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::Config;
use crate::store::schema::{EXPORT_VERSION, ExportData, JournalData, ProfileData};

const PROFILE_FILE: &str = "profile.json";
const JOURNAL_FILE: &str = "journal.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ascend");
        Self::with_base_dir(base_dir)
    }

    /// Explicit data dir: the `--data-dir` flag and tests.
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        match fs::read_to_string(self.file_path(name)) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    /// Write tmp, fsync, rename. A crash mid-save leaves the old file intact.
    fn save_atomic<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// None means the file exists but cannot be parsed (schema mismatch or
    /// corruption); the caller decides whether to reset. A missing file is
    /// just a fresh profile.
    pub fn load_profile(&self) -> Option<ProfileData> {
        let path = self.file_path(PROFILE_FILE);
        if path.exists() {
            let content = fs::read_to_string(&path).ok()?;
            serde_json::from_str(&content).ok()
        } else {
            Some(ProfileData::default())
        }
    }

    pub fn save_profile(&self, data: &ProfileData) -> Result<()> {
        self.save_atomic(PROFILE_FILE, data)
    }

    pub fn load_journal(&self) -> JournalData {
        self.load_or_default(JOURNAL_FILE)
    }

    pub fn save_journal(&self, data: &JournalData) -> Result<()> {
        self.save_atomic(JOURNAL_FILE, data)
    }

    pub fn export_all(&self, config: &Config) -> ExportData {
        ExportData {
            ascend_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: config.clone(),
            profile: self.load_profile().unwrap_or_default(),
            journal: self.load_journal(),
        }
    }

    /// Transactional import: stage everything to `.tmp`, back originals up to
    /// `.bak`, rename into place. On any failure, restore the backups and
    /// clean the staging files (best effort).
    pub fn import_all(&self, data: &ExportData) -> Result<()> {
        if data.ascend_export_version != EXPORT_VERSION {
            bail!(
                "Unsupported export version: {} (expected {})",
                data.ascend_export_version,
                EXPORT_VERSION
            );
        }

        let files = [
            (PROFILE_FILE, serde_json::to_string_pretty(&data.profile)?),
            (JOURNAL_FILE, serde_json::to_string_pretty(&data.journal)?),
        ];

        let staged = match self.stage(&files) {
            Ok(staged) => staged,
            Err(e) => bail!("Import failed during staging: {e}"),
        };
        if let Err(e) = self.commit(&files, &staged) {
            bail!("Import failed during commit: {e}");
        }
        Ok(())
    }

    /// Stage phase: write every payload to a `.tmp` sibling. Cleans up after
    /// itself on failure so a half-staged import leaves no droppings.
    fn stage(&self, files: &[(&str, String)]) -> Result<Vec<PathBuf>> {
        let mut staged = Vec::new();
        for (name, json) in files {
            let tmp_path = self.file_path(name).with_extension("json.tmp");
            let write = fs::File::create(&tmp_path)
                .map_err(anyhow::Error::from)
                .and_then(|mut f| {
                    f.write_all(json.as_bytes())?;
                    f.sync_all()?;
                    Ok(())
                });
            match write {
                Ok(()) => staged.push(tmp_path),
                Err(e) => {
                    for tmp in &staged {
                        let _ = fs::remove_file(tmp);
                    }
                    return Err(e);
                }
            }
        }
        Ok(staged)
    }

    /// Commit phase: original -> `.bak`, `.tmp` -> final, per file. Tracks
    /// what moved so a failure can roll everything back, including restoring
    /// the absence of files that never existed.
    fn commit(&self, files: &[(&str, String)], staged: &[PathBuf]) -> Result<()> {
        let mut committed: Vec<(PathBuf, PathBuf, bool)> = Vec::new();

        for (i, (name, _)) in files.iter().enumerate() {
            let final_path = self.file_path(name);
            let bak_path = self.file_path(name).with_extension("json.bak");
            let had_original = final_path.exists();

            let step = (|| -> Result<()> {
                if had_original {
                    fs::rename(&final_path, &bak_path)?;
                }
                if let Err(e) = fs::rename(&staged[i], &final_path) {
                    // Undo this file's backup before reporting.
                    if had_original && bak_path.exists() {
                        let _ = fs::rename(&bak_path, &final_path);
                    }
                    return Err(e.into());
                }
                Ok(())
            })();

            if let Err(e) = step {
                self.rollback(&committed);
                for tmp in &staged[i..] {
                    let _ = fs::remove_file(tmp);
                }
                return Err(e);
            }
            committed.push((final_path, bak_path, had_original));
        }

        for (_, bak_path, had_original) in &committed {
            if *had_original {
                let _ = fs::remove_file(bak_path);
            }
        }
        Ok(())
    }

    fn rollback(&self, committed: &[(PathBuf, PathBuf, bool)]) {
        for (final_path, bak_path, had_original) in committed {
            if *had_original {
                let _ = fs::rename(bak_path, final_path);
            } else {
                let _ = fs::remove_file(final_path);
            }
        }
    }

    /// Sweep `.bak` leftovers from an import that died between phases.
    /// Returns true if any were found.
    pub fn check_interrupted_import(&self) -> bool {
        let mut found = false;
        for name in [PROFILE_FILE, JOURNAL_FILE] {
            let bak_path = self.file_path(name).with_extension("json.bak");
            if bak_path.exists() {
                found = true;
                let _ = fs::remove_file(&bak_path);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn make_test_export() -> ExportData {
        ExportData {
            ascend_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: Config::default(),
            profile: ProfileData::default(),
            journal: JournalData::default(),
        }
    }

    #[test]
    fn test_missing_files_load_as_fresh_state() {
        let (_dir, store) = make_test_store();
        let profile = store.load_profile().unwrap();
        assert_eq!(profile.total_xp, 0);
        assert!(store.load_journal().entries.is_empty());
    }

    #[test]
    fn test_corrupt_profile_loads_as_none() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(PROFILE_FILE), "{not json").unwrap();
        assert!(store.load_profile().is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_dir, store) = make_test_store();
        let mut profile = ProfileData::default();
        profile.total_xp = 903;
        profile.total_completions = 17;
        store.save_profile(&profile).unwrap();

        let loaded = store.load_profile().unwrap();
        assert_eq!(loaded.total_xp, 903);
        assert_eq!(loaded.total_completions, 17);
        // No stray .tmp left behind.
        assert!(!store.file_path(PROFILE_FILE).with_extension("tmp").exists());
    }

    #[test]
    fn test_export_import_round_trip() {
        let (_dir, store) = make_test_store();
        let mut profile = ProfileData::default();
        profile.total_xp = 320;
        store.save_profile(&profile).unwrap();

        let export = store.export_all(&Config::default());
        assert_eq!(export.ascend_export_version, EXPORT_VERSION);

        let (_dir2, store2) = make_test_store();
        store2.import_all(&export).unwrap();
        assert_eq!(store2.load_profile().unwrap().total_xp, 320);
        assert!(store2.file_path(JOURNAL_FILE).exists());
    }

    #[test]
    fn test_import_rejects_version_mismatch() {
        let (_dir, store) = make_test_store();
        let mut export = make_test_export();
        export.ascend_export_version = 99;

        let err = store.import_all(&export).unwrap_err().to_string();
        assert!(err.contains("Unsupported export version"));
        assert!(err.contains("99"));
    }

    #[test]
    fn test_staging_failure_preserves_originals() {
        let (dir, store) = make_test_store();

        let mut profile = ProfileData::default();
        profile.total_completions = 42;
        store.save_profile(&profile).unwrap();
        let original = fs::read_to_string(store.file_path(PROFILE_FILE)).unwrap();

        // A store rooted at a nonexistent subdir fails at the staging write.
        let bad_store = JsonStore {
            base_dir: dir.path().join("missing_subdir"),
        };
        let err = bad_store.import_all(&make_test_export()).unwrap_err();
        assert!(err.to_string().contains("staging"));

        assert_eq!(
            fs::read_to_string(store.file_path(PROFILE_FILE)).unwrap(),
            original
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                let p = e.path();
                let ext = p.extension().and_then(|x| x.to_str());
                ext == Some("tmp") || ext == Some("bak")
            })
            .collect();
        assert!(leftovers.is_empty(), "residual staging files: {leftovers:?}");
    }

    #[test]
    fn test_interrupted_import_sweep() {
        let (_dir, store) = make_test_store();
        assert!(!store.check_interrupted_import());

        fs::write(store.file_path("profile.json.bak"), "{}").unwrap();
        assert!(store.check_interrupted_import());
        assert!(!store.file_path("profile.json.bak").exists());
    }
}
