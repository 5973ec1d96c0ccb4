//! JSON file store setup and [`StateStore`] implementation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use garagehub_app::ports::StateStore;
use garagehub_domain::error::GarageError;

use crate::error::StorageError;

/// Configuration for the JSON file store.
pub struct Config {
    /// Directory holding one file per key. Created if missing.
    pub path: PathBuf,
}

impl Config {
    /// Build a [`JsonFileStore`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CreateDir`] if the directory cannot be created.
    pub fn build(self) -> Result<JsonFileStore, StorageError> {
        JsonFileStore::open(self.path)
    }
}

/// On-disk shape of a single entry.
#[derive(Serialize, Deserialize)]
struct Entry {
    key: String,
    value: serde_json::Value,
}

/// [`StateStore`] persisting each key as a small JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CreateDir`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(path = %dir.display(), "persistence directory ready");
        Ok(Self { dir })
    }

    /// Directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{digest:x}.json"))
    }

    fn read(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let path = self.path_for(key);
        let content = match std::fs::read(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        match serde_json::from_slice::<Entry>(&content) {
            Ok(entry) if entry.key == key => Ok(Some(entry.value)),
            Ok(entry) => {
                tracing::warn!(
                    path = %path.display(),
                    expected = key,
                    found = %entry.key,
                    "ignoring entry stored under another key"
                );
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring corrupt entry");
                Ok(None)
            }
        }
    }

    fn write(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_vec(&Entry {
            key: key.to_string(),
            value,
        })?;

        std::fs::write(&tmp, content).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })?;
        Ok(())
    }
}

impl StateStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, GarageError> {
        Ok(self.read(key)?)
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), GarageError> {
        self.write(key, value)?;
        tracing::trace!(key, "value persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Fresh directory under the system temp dir, removed on drop.
    struct TempDir(PathBuf);

    impl TempDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "garagehub-storage-{}-{name}",
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&path);
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn should_create_directory_when_missing() {
        let tmp = TempDir::new("create");
        let store = Config {
            path: tmp.0.join("nested"),
        }
        .build()
        .unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn should_return_none_when_key_missing() {
        let tmp = TempDir::new("missing");
        let store = JsonFileStore::open(&tmp.0).unwrap();
        assert_eq!(store.get("Dummy Garage").unwrap(), None);
    }

    #[test]
    fn should_read_back_written_value() {
        let tmp = TempDir::new("roundtrip");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        store.set("Dummy Garage", json!(false)).unwrap();

        assert_eq!(store.get("Dummy Garage").unwrap(), Some(json!(false)));
    }

    #[test]
    fn should_overwrite_previous_value() {
        let tmp = TempDir::new("overwrite");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        store.set("Garage", json!(true)).unwrap();
        store.set("Garage", json!(false)).unwrap();

        assert_eq!(store.get("Garage").unwrap(), Some(json!(false)));
    }

    #[test]
    fn should_survive_reopening() {
        let tmp = TempDir::new("reopen");
        JsonFileStore::open(&tmp.0)
            .unwrap()
            .set("Garage", json!(false))
            .unwrap();

        let reopened = JsonFileStore::open(&tmp.0).unwrap();
        assert_eq!(reopened.get("Garage").unwrap(), Some(json!(false)));
    }

    #[test]
    fn should_keep_keys_separate() {
        let tmp = TempDir::new("separate");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        store.set("Garage", json!(true)).unwrap();
        store.set("Shed", json!(false)).unwrap();

        assert_eq!(store.get("Garage").unwrap(), Some(json!(true)));
        assert_eq!(store.get("Shed").unwrap(), Some(json!(false)));
    }

    #[test]
    fn should_map_any_key_to_a_file_name() {
        let tmp = TempDir::new("names");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        store.set("../Garage/Door ü", json!(true)).unwrap();

        assert_eq!(store.get("../Garage/Door ü").unwrap(), Some(json!(true)));
        let files: Vec<_> = std::fs::read_dir(&tmp.0).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn should_persist_long_keys() {
        let tmp = TempDir::new("long");
        let store = JsonFileStore::open(&tmp.0).unwrap();
        let name = "G".repeat(200);

        store.set(&name, json!(false)).unwrap();

        assert_eq!(store.get(&name).unwrap(), Some(json!(false)));
        let reopened = JsonFileStore::open(&tmp.0).unwrap();
        assert_eq!(reopened.get(&name).unwrap(), Some(json!(false)));
    }

    #[test]
    fn should_use_fixed_length_file_names() {
        let tmp = TempDir::new("digest");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        let short = store.path_for("G");
        let long = store.path_for(&"G".repeat(500));

        assert_ne!(short, long);
        for path in [short, long] {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert_eq!(name.len(), 64 + ".json".len());
        }
    }

    #[test]
    fn should_treat_corrupt_file_as_missing() {
        let tmp = TempDir::new("corrupt");
        let store = JsonFileStore::open(&tmp.0).unwrap();
        std::fs::write(store.path_for("Garage"), b"{not json").unwrap();

        assert_eq!(store.get("Garage").unwrap(), None);
    }

    #[test]
    fn should_treat_entry_for_other_key_as_missing() {
        let tmp = TempDir::new("mismatch");
        let store = JsonFileStore::open(&tmp.0).unwrap();
        std::fs::write(
            store.path_for("Garage"),
            br#"{"key":"Shed","value":false}"#,
        )
        .unwrap();

        assert_eq!(store.get("Garage").unwrap(), None);
    }

    #[test]
    fn should_not_leave_temporary_files() {
        let tmp = TempDir::new("tmpfiles");
        let store = JsonFileStore::open(&tmp.0).unwrap();

        store.set("Garage", json!(true)).unwrap();

        let leftovers = std::fs::read_dir(&tmp.0)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
