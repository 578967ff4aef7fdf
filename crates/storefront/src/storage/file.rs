use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// JSON-file backed store.
///
/// Every operation re-reads the file, so several handles on the same path
/// observe each other's writes. Writes go through a sibling temp file and a
/// rename so a crash never leaves a half-written map behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created on first write.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Map to update on a write. A corrupt file is moved aside to
    /// `<name>.corrupt` and replaced by an empty map.
    fn writable_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Err(StorageError::Corrupt(e)) => {
                let backup = self.path.with_extension("corrupt");
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "Storage file is corrupt, starting over"
                );
                fs::rename(&self.path, &backup)?;
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.writable_map()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.writable_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = FileStore::open(&path);

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("ramstuga_lang", "nl").unwrap();

        let other = FileStore::open(&path);
        assert_eq!(other.get("ramstuga_lang").unwrap().as_deref(), Some("nl"));

        other.remove("ramstuga_lang").unwrap();
        assert_eq!(store.get("ramstuga_lang").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = FileStore::open(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{").unwrap();
        let store = FileStore::open(&path);

        store.set("ramstuga_cart", "[]").unwrap();
        assert_eq!(store.get("ramstuga_cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(fs::read_to_string(dir.path().join("store.corrupt")).unwrap(), "{");

        fs::write(&path, "not json").unwrap();
        store.remove("ramstuga_cart").unwrap();
        assert_eq!(store.get("ramstuga_cart").unwrap(), None);
    }
}
