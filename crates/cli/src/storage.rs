//! JSON file storage backend

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crumb::store::{KeyValueStorage, StorageError};
use tracing::debug;

/// Key-value storage persisted as one JSON object in a file.
///
/// The file is read on every access so separate invocations share state the
/// way browser tabs share `localStorage`.
#[derive(Debug, Clone)]
pub(crate) struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => {
                return Err(StorageError(format!(
                    "failed to read {}: {error}",
                    self.path.display()
                )));
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|error| {
            StorageError(format!("failed to parse {}: {error}", self.path.display()))
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|error| StorageError(format!("failed to encode storage: {error}")))?;

        fs::write(&self.path, json).map_err(|error| {
            StorageError(format!("failed to write {}: {error}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), entries = entries.len(), "wrote storage file");

        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;

        entries.insert(key.to_string(), value.to_string());

        self.write(&entries)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read()?;

        if entries.remove(key).is_none() {
            return Ok(());
        }

        self.write(&entries)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() -> TestResult {
        let dir = TempDir::new()?;
        let storage = FileStorage::new(dir.path().join("cart.json"));

        assert_eq!(storage.get_item("cozyCrumbCart")?, None);

        Ok(())
    }

    #[test]
    fn values_survive_a_new_handle() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("cart.json");

        let mut storage = FileStorage::new(&path);

        storage.set_item("cozyCrumbCart", "{}")?;
        storage.set_item("other", "1")?;

        let reopened = FileStorage::new(&path);

        assert_eq!(reopened.get_item("cozyCrumbCart")?.as_deref(), Some("{}"));
        assert_eq!(reopened.get_item("other")?.as_deref(), Some("1"));

        Ok(())
    }

    #[test]
    fn remove_only_touches_one_key() -> TestResult {
        let dir = TempDir::new()?;
        let mut storage = FileStorage::new(dir.path().join("cart.json"));

        storage.set_item("cozyCrumbCart", "{}")?;
        storage.set_item("other", "1")?;
        storage.remove_item("cozyCrumbCart")?;
        storage.remove_item("never-set")?;

        assert_eq!(storage.get_item("cozyCrumbCart")?, None);
        assert_eq!(storage.get_item("other")?.as_deref(), Some("1"));

        Ok(())
    }

    #[test]
    fn corrupt_file_is_a_storage_error() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("cart.json");

        fs::write(&path, "not json")?;

        assert!(FileStorage::new(&path).get_item("cozyCrumbCart").is_err());

        Ok(())
    }
}
