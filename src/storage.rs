//! String key-value persistence for client-side preferences.

use crate::error::{Result, StoreError};
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Synchronous string storage, shaped like a browser's local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Process-local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, holding an exclusive lock on `<path>.lock` for the duration. A
/// missing file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock_path: PathBuf,
    write_guard: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = sibling(&path, "lock");
        Self {
            path,
            lock_path,
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }

        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Storage(format!(
                "{} does not hold a JSON object (found {})",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    /// Read-modify-write under the file lock.
    fn modify(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let _guard = self.write_guard.lock();

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        lock_file.lock_exclusive()?;

        let result = self.rewrite(f);
        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn rewrite(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<()> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding unreadable storage file");
                Map::new()
            }
        };
        f(&mut map);

        let tmp_path = sibling(&self.path, "tmp");
        let mut file = File::create(&tmp_path)?;
        serde_json::to_writer_pretty(&mut file, &map)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), keys = map.len(), "storage written");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|map| {
            map.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|map| {
            map.remove(key);
        })
    }
}

/// `settings.json` -> `settings.json.<ext>`
fn sibling(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(ext);
    path.with_file_name(name)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("themeMode").unwrap(), None);

        storage.set("themeMode", "dark").unwrap();
        assert_eq!(storage.get("themeMode").unwrap().as_deref(), Some("dark"));

        storage.remove("themeMode").unwrap();
        assert_eq!(storage.get("themeMode").unwrap(), None);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));
        assert_eq!(storage.get("themeMode").unwrap(), None);
    }

    #[test]
    fn test_file_storage_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let storage = FileStorage::new(&path);
        storage.set("themeMode", "dark").unwrap();
        storage.set("other", "1").unwrap();
        storage.remove("other").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("themeMode").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap(), None);
        assert!(!sibling(&path, "tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_non_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2]").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("themeMode"), Err(StoreError::Storage(_))));

        // A write recovers the file.
        storage.set("themeMode", "light").unwrap();
        assert_eq!(storage.get("themeMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_sibling_paths() {
        assert_eq!(
            sibling(Path::new("/tmp/prefs.json"), "lock"),
            PathBuf::from("/tmp/prefs.json.lock")
        );
    }
}
