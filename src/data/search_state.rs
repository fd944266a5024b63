//! The one piece of persisted state: the last search term, kept under a single key in a
//! small JSON key/value file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DataError;

pub const SEARCH_KEY: &str = "pokemonSearch";

#[derive(Debug, Clone)]
pub struct SearchStateStore {
    path: PathBuf,
}

impl SearchStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved term, or empty when the file is missing, unreadable or lacks the key.
    pub fn load(&self) -> String {
        self.read_entries().remove(SEARCH_KEY).unwrap_or_default()
    }

    /// Persist `term` lowercased and return what was stored. Other keys in the file are kept.
    pub fn save(&self, term: &str) -> Result<String, DataError> {
        let stored = term.to_lowercase();
        let mut entries = self.read_entries();
        entries.insert(SEARCH_KEY.to_string(), stored.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DataError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, payload).map_err(|source| DataError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), term = %stored, "search term saved");
        Ok(stored)
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "ignoring unreadable search state");
            BTreeMap::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_path(name: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("pogodex-{name}-{stamp}.json"))
    }

    #[test]
    fn missing_file_loads_empty_term() {
        let store = SearchStateStore::new(unique_temp_path("missing"));
        assert_eq!(store.load(), "");
    }

    #[test]
    fn save_lowercases_and_round_trips() {
        let path = unique_temp_path("save");
        let store = SearchStateStore::new(&path);
        assert_eq!(store.save("ChAr").unwrap(), "char");
        assert_eq!(store.load(), "char");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"pokemonSearch\": \"char\""));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_degrades_to_empty_and_is_replaced() {
        let path = unique_temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();
        let store = SearchStateStore::new(&path);
        assert_eq!(store.load(), "");
        store.save("pika").unwrap();
        assert_eq!(store.load(), "pika");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unrelated_keys_survive_save() {
        let path = unique_temp_path("keys");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let store = SearchStateStore::new(&path);
        store.save("mew").unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"theme\": \"dark\""));
        let _ = fs::remove_file(path);
    }
}
