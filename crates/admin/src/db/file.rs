//! File-backed substrate.
//!
//! Each key lives in `<data_dir>/<key>.json`. Writes go to a temporary
//! sibling first and are renamed over the target, so readers only ever see
//! a complete value. Every write uses its own temporary name, so concurrent
//! writers of one key never share a file; the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{Store, StoreError};

const EXTENSION: &str = "json";
const TEMP_SUFFIX: &str = ".tmp";

/// Durable store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        let store = Self { root };
        store.remove_stale_temps()?;
        tracing::debug!(root = %store.root.display(), "file store opened");
        Ok(store)
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }

    /// Remove temporary files left behind by interrupted writes.
    fn remove_stale_temps(&self) -> Result<(), StoreError> {
        self.remove_matching(|name| name.ends_with(TEMP_SUFFIX))
    }

    fn remove_matching(&self, matches: impl Fn(&str) -> bool) -> Result<(), StoreError> {
        let root = self.root.display().to_string();
        let entries = fs::read_dir(&self.root).map_err(io_error(&root))?;
        for entry in entries {
            let path = entry.map_err(io_error(&root))?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !matches(name) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {}
                // Another writer renamed or removed it first
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(io_error(&root)(e)),
            }
        }
        Ok(())
    }
}

fn io_error(key: &str) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        key: key.to_owned(),
        source,
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp = self
            .root
            .join(format!("{key}.{}{TEMP_SUFFIX}", uuid::Uuid::new_v4().simple()));

        let mut file = fs::File::create(&temp).map_err(io_error(key))?;
        file.write_all(value.as_bytes()).map_err(io_error(key))?;
        file.sync_all().map_err(io_error(key))?;
        drop(file);

        fs::rename(&temp, &path).map_err(io_error(key))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        let value_suffix = format!(".{EXTENSION}");
        self.remove_matching(|name| name.ends_with(&value_suffix) || name.ends_with(TEMP_SUFFIX))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("slooze-file-store-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_open_creates_directory() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();
        assert!(store.root().is_dir());
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_set_then_get() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();

        assert_eq!(store.get("slooze_products").unwrap(), None);
        store.set("slooze_products", "[]").unwrap();
        assert_eq!(store.get("slooze_products").unwrap().as_deref(), Some("[]"));
        assert!(root.join("slooze_products.json").is_file());
        let leftovers = fs::read_dir(&root)
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(TEMP_SUFFIX)
            })
            .count();
        assert_eq!(leftovers, 0);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let root = temp_root();
        FileStore::open(&root).unwrap().set("user", "abc").unwrap();

        let reopened = FileStore::open(&root).unwrap();
        assert_eq!(reopened.get("user").unwrap().as_deref(), Some("abc"));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();

        assert!(matches!(
            store.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_remove_missing_is_ok_and_clear_empties() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();

        store.remove("absent").unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), None);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_concurrent_writers_of_one_key() {
        let root = temp_root();
        let store = FileStore::open(&root).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|writer| {
                    let store = &store;
                    scope.spawn(move || {
                        for round in 0..25 {
                            store
                                .set("slooze_users", &format!("[{writer},{round}]"))
                                .unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });

        let value = store.get("slooze_users").unwrap().unwrap();
        assert!(value.starts_with('[') && value.ends_with(']'));
        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);

        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_stale_temps_are_removed() {
        let root = temp_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("slooze_products.0123abcd.tmp"), "[").unwrap();

        let store = FileStore::open(&root).unwrap();
        assert!(!root.join("slooze_products.0123abcd.tmp").exists());

        fs::write(root.join("user.4567ef01.tmp"), "partial").unwrap();
        store.set("user", "abc").unwrap();
        store.clear().unwrap();
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);

        fs::remove_dir_all(root).unwrap();
    }
}
