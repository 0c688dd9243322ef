//! Settings service
//!
//! Holds the user preference record and writes it through to storage.

use crate::config::SETTINGS_KEY;
use crate::error::Result;
use crate::models::AppSettings;
use crate::storage::KeyValueStore;

/// Write-through store for [`AppSettings`]
pub struct SettingsStore<S> {
    store: S,
    settings: AppSettings,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Load settings from storage, falling back to defaults when never saved.
    ///
    /// An unreadable record also yields defaults so `settings set` can still
    /// overwrite it; the stored value is left in place until then.
    pub async fn load(store: S) -> Result<Self> {
        let settings = match store.get(SETTINGS_KEY).await? {
            Some(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse saved settings, using defaults: {}", e);
                AppSettings::default()
            }),
            None => {
                tracing::info!("Settings not found, using defaults");
                AppSettings::default()
            }
        };

        Ok(Self { store, settings })
    }

    pub fn current(&self) -> &AppSettings {
        &self.settings
    }

    /// Replace the whole record. Callers merge partial edits themselves.
    pub async fn update(&mut self, settings: AppSettings) -> Result<&AppSettings> {
        let content = serde_json::to_string(&settings)?;
        self.store.set(SETTINGS_KEY, &content).await?;
        self.settings = settings;

        tracing::info!(
            "Settings saved (language: {}, platform: {}, style: {}, api key set: {})",
            self.settings.language,
            self.settings.default_platform,
            self.settings.default_style,
            self.settings.has_api_key()
        );
        Ok(&self.settings)
    }
}
