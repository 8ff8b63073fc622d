//! Directory-backed snapshot storage.
//!
//! Entries are TOML files named `<entry>.toml`. The default collection lives
//! at the storage root; named collections live under `collection/`, one
//! directory level per dot-separated name segment (`collection/language/fr`
//! holds the `language.fr` collection).

use super::{SnapshotStorage, DEFAULT_COLLECTION};
use crate::error::StorageError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const COLLECTION_DIR: &str = "collection";
const ENTRY_EXTENSION: &str = "toml";

/// Snapshot storage over a directory of TOML entry files.
#[derive(Debug, Clone)]
pub struct DirSnapshotStorage {
    root: PathBuf,
}

impl DirSnapshotStorage {
    /// The directory does not have to exist; a missing root reads as an
    /// empty storage.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        if collection.is_empty() {
            return self.root.clone();
        }
        let mut dir = self.root.join(COLLECTION_DIR);
        for segment in collection.split('.') {
            dir = dir.join(segment);
        }
        dir
    }
}

fn is_entry_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ENTRY_EXTENSION)
}

impl SnapshotStorage for DirSnapshotStorage {
    fn collection_names(&self) -> Result<Vec<String>, StorageError> {
        let mut names = vec![DEFAULT_COLLECTION.to_string()];
        let base = self.root.join(COLLECTION_DIR);
        if base.is_dir() {
            for entry in WalkDir::new(&base).min_depth(1) {
                let entry = entry.map_err(|e| StorageError::IoError(e.into()))?;
                if !entry.file_type().is_file() || !is_entry_file(entry.path()) {
                    continue;
                }
                let parent = match entry.path().parent() {
                    Some(parent) => parent,
                    None => continue,
                };
                let rel = parent.strip_prefix(&base).unwrap_or(parent);
                let name = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect::<Vec<_>>()
                    .join(".");
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn list_all(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.collection_dir(collection);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() || !is_entry_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, collection: &str, name: &str) -> Result<Option<Value>, StorageError> {
        let path = self
            .collection_dir(collection)
            .join(format!("{}.{}", name, ENTRY_EXTENSION));
        if !path.is_file() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let parsed: toml::Value =
            toml::from_str(&raw).map_err(|e| StorageError::InvalidEntry {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let value = serde_json::to_value(parsed).map_err(|e| StorageError::InvalidEntry {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_entry(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(format!("{}.toml", name)), contents).unwrap();
    }

    #[test]
    fn test_missing_root_reads_empty() {
        let temp = TempDir::new().unwrap();
        let storage = DirSnapshotStorage::new(temp.path().join("absent"));
        assert_eq!(storage.collection_names().unwrap(), vec![String::new()]);
        assert!(storage.list_all(DEFAULT_COLLECTION).unwrap().is_empty());
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_default_and_named_collections() {
        let temp = TempDir::new().unwrap();
        write_entry(temp.path(), "system.site", "name = \"Storm\"\n");
        write_entry(
            &temp.path().join("collection/language/fr"),
            "system.site",
            "name = \"Tempête\"\n",
        );

        let storage = DirSnapshotStorage::new(temp.path());
        assert_eq!(
            storage.collection_names().unwrap(),
            vec![String::new(), "language.fr".to_string()]
        );
        assert_eq!(
            storage.list_all(DEFAULT_COLLECTION).unwrap(),
            vec!["system.site".to_string()]
        );

        let snapshot = storage.load().unwrap();
        assert_eq!(
            snapshot.get(DEFAULT_COLLECTION, "system.site"),
            Some(&json!({"name": "Storm"}))
        );
        assert_eq!(
            snapshot.get("language.fr", "system.site"),
            Some(&json!({"name": "Tempête"}))
        );
    }

    #[test]
    fn test_dotted_entry_names_keep_full_stem() {
        let temp = TempDir::new().unwrap();
        write_entry(temp.path(), "views.view.content", "status = true\n");

        let storage = DirSnapshotStorage::new(temp.path());
        assert_eq!(
            storage.list_all(DEFAULT_COLLECTION).unwrap(),
            vec!["views.view.content".to_string()]
        );
        assert_eq!(
            storage.read(DEFAULT_COLLECTION, "views.view.content").unwrap(),
            Some(json!({"status": true}))
        );
    }

    #[test]
    fn test_unparseable_entry_is_an_error() {
        let temp = TempDir::new().unwrap();
        write_entry(temp.path(), "broken", "not [valid toml\n");

        let storage = DirSnapshotStorage::new(temp.path());
        let err = storage.read(DEFAULT_COLLECTION, "broken").unwrap_err();
        assert!(matches!(err, StorageError::InvalidEntry { .. }));
    }

    #[test]
    fn test_non_toml_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        write_entry(temp.path(), "system.site", "name = \"Storm\"\n");
        fs::write(temp.path().join("README.md"), "notes").unwrap();

        let storage = DirSnapshotStorage::new(temp.path());
        assert_eq!(
            storage.list_all(DEFAULT_COLLECTION).unwrap(),
            vec!["system.site".to_string()]
        );
    }
}
