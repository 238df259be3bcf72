//! Dark mode preference.
//!
//! Read once at startup, written through on every toggle.

use crate::settings::SettingsStore;

/// Settings key holding "true"/"false"
pub const DARK_MODE_KEY: &str = "darkMode";

pub struct ThemePreference<S: SettingsStore> {
    store: S,
    dark: bool,
}

impl<S: SettingsStore> ThemePreference<S> {
    /// Read the persisted flag. Anything other than "true" is light mode.
    pub fn load(store: S) -> Self {
        let dark = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        tracing::debug!("Dark mode preference: {}", dark);
        Self { store, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Flip the flag and persist the new value.
    ///
    /// A failed write is logged; the in-memory flag flips regardless.
    pub fn toggle(&mut self) -> bool {
        self.dark = !self.dark;
        let value = if self.dark { "true" } else { "false" };
        if let Err(e) = self.store.set(DARK_MODE_KEY, value) {
            tracing::error!("Failed to save dark mode preference: {:#}", e);
        }
        self.dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// In-memory store that records every write
    #[derive(Clone, Default)]
    struct MemoryStore {
        values: Arc<Mutex<HashMap<String, String>>>,
        writes: Arc<Mutex<Vec<(String, String)>>>,
        fail_writes: bool,
    }

    impl SettingsStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.lock().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            if self.fail_writes {
                anyhow::bail!("disk full");
            }
            self.values.lock().insert(key.to_string(), value.to_string());
            self.writes.lock().push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_absent_key_is_light() {
        let pref = ThemePreference::load(MemoryStore::default());
        assert!(!pref.is_dark());
    }

    #[test]
    fn test_load_reads_stored_flag() {
        let store = MemoryStore::default();
        store.values.lock().insert(DARK_MODE_KEY.to_string(), "true".to_string());
        assert!(ThemePreference::load(store.clone()).is_dark());

        store.values.lock().insert(DARK_MODE_KEY.to_string(), "yes".to_string());
        assert!(!ThemePreference::load(store).is_dark());
    }

    #[test]
    fn test_toggle_writes_through() {
        let store = MemoryStore::default();
        let mut pref = ThemePreference::load(store.clone());

        assert!(pref.toggle());
        assert_eq!(
            *store.writes.lock(),
            vec![(DARK_MODE_KEY.to_string(), "true".to_string())]
        );
    }

    #[test]
    fn test_toggle_twice_restores_and_persists_original() {
        let store = MemoryStore::default();
        let mut pref = ThemePreference::load(store.clone());
        let original = pref.is_dark();

        pref.toggle();
        pref.toggle();

        assert_eq!(pref.is_dark(), original);
        let writes = store.writes.lock();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes.last().unwrap().1, "false");
        assert_eq!(store.get(DARK_MODE_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_failed_write_still_flips() {
        let store = MemoryStore {
            fail_writes: true,
            ..Default::default()
        };
        let mut pref = ThemePreference::load(store);
        assert!(pref.toggle());
        assert!(pref.is_dark());
    }
}
