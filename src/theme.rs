/*
 * Theme Module
 *
 * Dark/light theme state. The state is an explicit object handed by
 * reference to whatever toggles it, and persistence goes through a small
 * key-value interface so the backing store can be swapped (a JSON file for
 * the desktop app, a map in tests).
 */

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::RgbaColor;

pub const THEME_KEY: &str = "theme-storage";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("theme store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("theme store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("theme store must hold a JSON object")]
    NotAnObject,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn background(self) -> RgbaColor {
        match self {
            Theme::Dark => RgbaColor::new(10, 15, 30, 1.0),
            Theme::Light => RgbaColor::new(248, 250, 252, 1.0),
        }
    }
}

pub struct ThemeState<S: KeyValueStore> {
    theme: Theme,
    store: S,
}

impl<S: KeyValueStore> ThemeState<S> {
    /// Read the persisted theme, falling back to dark when nothing usable is
    /// stored or the store cannot be read.
    pub fn load(store: S) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                log::warn!("Ignoring unknown stored theme {:?}", value);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("Could not read theme preference: {}", err);
                Theme::default()
            }
        };

        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // The in-memory theme changes even if persisting it fails
    pub fn set(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A flat JSON object on disk. A missing file reads as empty; other keys in
/// the file are preserved on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let source = match std::fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<Value>(&source)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_owned))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later save
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Io(err)) => return Err(StoreError::Io(err)),
            Err(err) => {
                log::warn!("Overwriting unreadable store {}: {}", self.path.display(), err);
                Map::new()
            }
        };
        map.insert(key.to_owned(), Value::String(value.to_owned()));
        std::fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(map))?)?;
        log::debug!("Persisted {}={} to {}", key, value, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_dark() {
        let state = ThemeState::load(MemoryStore::default());
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut state = ThemeState::load(MemoryStore::default());

        assert_eq!(state.toggle().unwrap(), Theme::Light);
        assert_eq!(state.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));

        assert_eq!(state.toggle().unwrap(), Theme::Dark);
        state.set(Theme::Light).unwrap();
        assert_eq!(state.theme(), Theme::Light);
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();

        let state = ThemeState::load(store);
        assert_eq!(state.theme(), Theme::Dark);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r#"{"other": "kept"}"#).unwrap();

        let mut state = ThemeState::load(JsonFileStore::new(&path));
        state.toggle().unwrap();

        let reloaded = ThemeState::load(JsonFileStore::new(&path));
        assert_eq!(reloaded.theme(), Theme::Light);
        assert_eq!(
            reloaded.store().get("other").unwrap().as_deref(),
            Some("kept")
        );
    }

    #[test]
    fn test_file_store_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileStore::new(dir.path().join("absent.json"));
        assert_eq!(missing.get(THEME_KEY).unwrap(), None);

        let corrupt_path = dir.path().join("corrupt.json");
        std::fs::write(&corrupt_path, "[1, 2, 3]").unwrap();
        let corrupt = JsonFileStore::new(&corrupt_path);
        assert!(matches!(corrupt.get(THEME_KEY), Err(StoreError::NotAnObject)));

        // Unreadable stores still produce a usable state
        assert_eq!(ThemeState::load(corrupt).theme(), Theme::Dark);
    }

    #[test]
    fn test_file_store_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut state = ThemeState::load(JsonFileStore::new(&path));
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!(state.toggle().unwrap(), Theme::Light);

        let reloaded = ThemeState::load(JsonFileStore::new(&path));
        assert_eq!(reloaded.theme(), Theme::Light);
    }
}
