//! Persisted user preferences.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use folio_storage::{Repository, Settings, Theme};

use crate::error::SiteError;

/// Mutex-guarded [`Settings`] with write-through persistence.
pub struct SettingsStore {
    repository: Arc<dyn Repository<Settings>>,
    settings: Mutex<Settings>,
}

impl SettingsStore {
    /// Load settings from `repository`.
    ///
    /// Missing or corrupt settings fall back to [`Settings::default`]
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the settings exist but cannot be read.
    pub fn open(repository: Arc<dyn Repository<Settings>>) -> Result<Self, SiteError> {
        let settings = match repository.load() {
            Ok(settings) => settings.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                tracing::warn!(error = %e, "Settings are corrupt, using defaults");
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            repository,
            settings: Mutex::new(settings),
        })
    }

    /// Current settings.
    #[must_use]
    pub fn get(&self) -> Settings {
        self.lock().clone()
    }

    /// Change the default assistant model.
    ///
    /// A blank name is ignored. Returns whether the settings changed.
    pub fn set_model(&self, model: &str) -> bool {
        let model = model.trim();
        if model.is_empty() {
            return false;
        }

        let mut settings = self.lock();
        model.clone_into(&mut settings.model);
        tracing::debug!(model, "Default model changed");
        self.persist(&settings);
        true
    }

    /// Switch between light and dark theme and return the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut settings = self.lock();
        settings.theme = settings.theme.toggled();
        self.persist(&settings);
        settings.theme
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, settings: &Settings) {
        if let Err(e) = self.repository.save(settings) {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_storage::MockRepository;

    use super::*;

    static_assertions::assert_impl_all!(SettingsStore: Send, Sync);

    #[test]
    fn test_defaults_when_absent() {
        let repo = Arc::new(MockRepository::new());

        let store = SettingsStore::open(repo.clone()).unwrap();

        assert_eq!(store.get(), Settings::default());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_defaults_when_corrupt() {
        let store = SettingsStore::open(Arc::new(MockRepository::new().corrupt())).unwrap();

        assert_eq!(store.get().model, "Gemini");
        assert_eq!(store.get().theme, Theme::Light);
    }

    #[test]
    fn test_loads_stored_settings() {
        let stored = Settings {
            model: "Claude".to_owned(),
            theme: Theme::Dark,
        };
        let repo = Arc::new(MockRepository::new().with_value(stored.clone()));

        let store = SettingsStore::open(repo).unwrap();

        assert_eq!(store.get(), stored);
    }

    #[test]
    fn test_set_model_persists() {
        let repo = Arc::new(MockRepository::new());
        let store = SettingsStore::open(repo.clone()).unwrap();

        assert!(store.set_model(" GPT-4 "));

        assert_eq!(store.get().model, "GPT-4");
        assert_eq!(repo.stored().unwrap().model, "GPT-4");
    }

    #[test]
    fn test_set_blank_model_is_ignored() {
        let repo = Arc::new(MockRepository::new());
        let store = SettingsStore::open(repo.clone()).unwrap();

        assert!(!store.set_model("  "));

        assert_eq!(store.get().model, "Gemini");
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_toggle_theme_flips_and_persists() {
        let repo = Arc::new(MockRepository::new());
        let store = SettingsStore::open(repo.clone()).unwrap();

        assert_eq!(store.toggle_theme(), Theme::Dark);
        assert_eq!(store.toggle_theme(), Theme::Light);
        assert_eq!(repo.save_count(), 2);
        assert_eq!(repo.stored().unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_save_failure_keeps_change() {
        let repo = Arc::new(MockRepository::new());
        let store = SettingsStore::open(repo.clone()).unwrap();
        repo.set_fail_saves(true);

        store.toggle_theme();

        assert_eq!(store.get().theme, Theme::Dark);
        assert!(repo.stored().is_none());
    }
}
