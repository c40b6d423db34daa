use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app::{BreezeError, Result};
use crate::domain::SeenState;
use crate::store::StateStore;

const APP_DIR: &str = "awsbreeze";
const STATE_FILE: &str = "seen.json";
const LEGACY_FILE: &str = ".awsbreeze.json";

/// Seen-state kept as a single JSON document.
pub struct JsonStore {
    path: PathBuf,
    legacy_path: Option<PathBuf>,
}

impl JsonStore {
    pub fn new(path: PathBuf, legacy_path: Option<PathBuf>) -> Self {
        Self { path, legacy_path }
    }

    /// `<cache dir>/awsbreeze/seen.json`, migrating `~/.awsbreeze.json`.
    pub fn at_default_location() -> Result<Self> {
        let path = Self::default_path()?;
        let legacy_path = dirs::home_dir().map(|home| home.join(LEGACY_FILE));
        Ok(Self::new(path, legacy_path))
    }

    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| BreezeError::Config("Could not find cache directory".into()))?;
        Ok(cache_dir.join(APP_DIR).join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the legacy dotfile into place. Best effort: failures are logged.
    fn migrate_legacy(&self) {
        let Some(legacy) = self.legacy_path.as_deref() else {
            return;
        };
        if !legacy.exists() {
            return;
        }

        tracing::debug!(
            "Migrating legacy state {} -> {}",
            legacy.display(),
            self.path.display()
        );

        if let Err(e) = self.ensure_dir() {
            tracing::warn!("Failed to create state directory: {}", e);
            return;
        }

        if let Err(e) = move_file(legacy, &self.path) {
            tracing::warn!("Failed to move legacy state file: {}", e);
            return;
        }

        // rename normally consumes the source; this covers copy fallbacks that did not
        if legacy.exists() {
            if let Err(e) = fs::remove_file(legacy) {
                tracing::warn!("Failed to remove legacy state file: {}", e);
            }
        }
    }

    fn ensure_dir(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) => fs::create_dir_all(parent),
            None => Ok(()),
        }
    }

    fn read(&self) -> Result<SeenState> {
        let data = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl StateStore for JsonStore {
    fn load(&self) -> SeenState {
        self.migrate_legacy();

        match self.read() {
            Ok(state) => state,
            Err(BreezeError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No state file at {}", self.path.display());
                SeenState::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable state file {}: {}",
                    self.path.display(),
                    e
                );
                SeenState::default()
            }
        }
    }

    fn save(&self, state: &SeenState) -> Result<()> {
        self.ensure_dir()?;
        let data = serde_json::to_vec(state)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!("rename failed ({}), copying instead", e);
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonStore {
        JsonStore::new(
            dir.path().join("cache").join(APP_DIR).join(STATE_FILE),
            Some(dir.path().join("home").join(LEGACY_FILE)),
        )
    }

    fn guids(list: &[&str]) -> Vec<String> {
        list.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load(), SeenState::default());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load(), SeenState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = SeenState::default();
        state.mark_seen("a");
        store.save(&state).unwrap();

        assert_eq!(store.load(), state);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_prune_and_save_drops_absent_guids() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = SeenState::default();
        state.mark_all_seen(["a", "b"]);

        let written = store.prune_and_save(&state, &guids(&["a"])).unwrap();
        assert_eq!(written.last_seen.len(), 1);
        assert_eq!(written.last_seen.get("a"), Some(&true));
        assert!(written.last_run.is_some());

        let reloaded = store.load();
        assert_eq!(reloaded, written);

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["last_seen"], serde_json::json!({"a": true}));
    }

    #[test]
    fn test_prune_and_save_keys_subset_of_current() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut state = SeenState::default();
        state.mark_all_seen(["a", "b", "c", "d"]);
        let current = guids(&["b", "d", "e"]);

        let written = store.prune_and_save(&state, &current).unwrap();
        assert!(written.last_seen.keys().all(|k| current.contains(k)));
    }

    #[test]
    fn test_legacy_file_is_migrated() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let legacy = dir.path().join("home").join(LEGACY_FILE);
        fs::create_dir_all(legacy.parent().unwrap()).unwrap();
        fs::write(
            &legacy,
            r#"{"last_seen":{"old":true},"last_run":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let state = store.load();
        assert!(state.is_seen("old"));
        assert!(!legacy.exists());
        assert!(store.path().exists());
    }

    #[test]
    fn test_unwritable_location_is_an_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = JsonStore::new(blocker.join(STATE_FILE), None);

        assert!(store.save(&SeenState::default()).is_err());
    }
}
