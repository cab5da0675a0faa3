//! Light/dark theme preference.

use crate::storage::KeyValueStorage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Storage key holding the persisted mode.
pub const THEME_KEY: &str = "themeMode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = crate::types::UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(crate::types::UnknownVariant {
                kind: "theme mode",
                value: other.to_string(),
            }),
        }
    }
}

/// The current theme, written through to `storage` on every change.
pub struct ThemeState<S> {
    mode: ThemeMode,
    storage: S,
}

impl<S: KeyValueStorage> ThemeState<S> {
    /// Read the persisted mode once.
    ///
    /// A missing, unreadable, or unrecognised value yields [`ThemeMode::Light`].
    pub fn load(storage: S) -> Self {
        let mode = match storage.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme mode");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!(error = %e, "theme storage unreadable");
                ThemeMode::default()
            }
        };
        debug!(%mode, "theme loaded");
        Self { mode, storage }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flip between light and dark; returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    pub fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        if let Err(e) = self.storage.set(THEME_KEY, mode.as_str()) {
            warn!(%mode, error = %e, "failed to persist theme mode");
        }
    }
}

impl<S> fmt::Debug for ThemeState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeState").field("mode", &self.mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StoreError};
    use crate::storage::MemoryStorage;

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StoreError::Storage("quota exceeded".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Storage("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_defaults_to_light() {
        let theme = ThemeState::load(MemoryStorage::new());
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(ThemeState::load(storage).mode(), ThemeMode::Light);

        let storage = MemoryStorage::new();
        storage.set(THEME_KEY, "Dark").unwrap();
        assert_eq!(ThemeState::load(storage).mode(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut theme = ThemeState::load(MemoryStorage::new());
        assert_eq!(theme.toggle(), ThemeMode::Dark);
        assert_eq!(theme.storage().get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(theme.toggle(), ThemeMode::Light);
        assert_eq!(theme.storage().get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut theme = ThemeState::load(BrokenStorage);
        assert_eq!(theme.mode(), ThemeMode::Light);

        theme.set(ThemeMode::Dark);
        assert_eq!(theme.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
    }
}
