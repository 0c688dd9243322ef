//! Application state and initialization
//!
//! `App` owns the stores and the research client and tracks which result is
//! currently displayed. The current result is held as an id and resolved
//! against history on every read, so deleting it simply makes it vanish.

use crate::config::{APP_DIR_NAME, DATABASE_FILE_NAME};
use crate::database::{create_pool, SqliteStore};
use crate::error::{AppError, Result};
use crate::models::{AppSettings, ResearchForm, ResearchRequest, ResearchResult};
use crate::services::{HistoryStore, ModelTransport, ResearchClient, SettingsStore};
use crate::storage::{FileStore, KeyValueStore, Storage};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Where history and settings are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// One JSON file per slot
    #[default]
    File,
    /// A single SQLite database
    Sqlite,
}

/// Default data directory, e.g. `~/.local/share/stockvision`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Generic("Failed to determine data directory".to_string()))
}

/// Open the selected storage backend, creating directories as needed
pub async fn open_storage(data_dir: &Path, backend: StorageBackend) -> Result<Storage> {
    tracing::info!("App data directory: {:?}", data_dir);

    match backend {
        StorageBackend::File => {
            let store = FileStore::new(data_dir.to_path_buf());
            store.initialize().await?;
            Ok(Storage::File(store))
        }
        StorageBackend::Sqlite => {
            let pool = create_pool(&data_dir.join(DATABASE_FILE_NAME)).await?;
            Ok(Storage::Sqlite(SqliteStore::new(pool)))
        }
    }
}

/// Central application state
pub struct App<S, T> {
    history: HistoryStore<S>,
    settings: SettingsStore<S>,
    client: ResearchClient<T>,
    current: Option<String>,
}

impl<S, T> App<S, T>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    /// Load both stores from `store`. Called once at startup.
    pub async fn load(store: S, transport: T) -> Result<Self> {
        tracing::info!("Initializing application");

        let history = HistoryStore::load(store.clone()).await?;
        let settings = SettingsStore::load(store).await?;

        Ok(Self {
            history,
            settings,
            client: ResearchClient::new(transport),
            current: None,
        })
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn settings(&self) -> &AppSettings {
        self.settings.current()
    }

    /// A blank research form seeded from the saved defaults
    pub fn research_form_defaults(&self) -> ResearchForm {
        ResearchForm::from_settings(self.settings.current())
    }

    /// Run a research request and save the result.
    ///
    /// Language and API key are read from settings once, here. Nothing is
    /// stored unless the whole result was generated.
    pub async fn submit_research(&mut self, form: &ResearchForm) -> Result<&ResearchResult> {
        if form.topic.trim().is_empty() {
            return Err(AppError::InvalidInput("topic must not be empty".to_string()));
        }

        let settings = self.settings.current();
        let request = ResearchRequest::new(form, settings.language);
        let api_key = settings.api_key.clone();

        self.current = None;

        let result = self.client.generate(&request, &api_key).await.map_err(|e| {
            tracing::warn!("Research for '{}' failed: {}", request.topic, e);
            e
        })?;

        let id = result.id.clone();
        self.history.append(result).await?;
        self.current = Some(id);

        self.current_result()
            .ok_or_else(|| AppError::Generic("saved result missing from history".to_string()))
    }

    /// Display a saved result
    pub fn view_history_item(&mut self, id: &str) -> Result<&ResearchResult> {
        if self.history.get(id).is_none() {
            return Err(AppError::ResultNotFound(id.to_string()));
        }
        self.current = Some(id.to_string());
        self.current_result()
            .ok_or_else(|| AppError::ResultNotFound(id.to_string()))
    }

    pub fn current_result(&self) -> Option<&ResearchResult> {
        self.current.as_deref().and_then(|id| self.history.get(id))
    }

    pub async fn toggle_favorite(&mut self, id: &str) -> Result<&[ResearchResult]> {
        self.history.toggle_favorite(id).await
    }

    pub async fn delete(&mut self, id: &str) -> Result<&[ResearchResult]> {
        if self.current.as_deref() == Some(id) {
            self.current = None;
        }
        self.history.delete(id).await
    }

    pub async fn update_settings(&mut self, settings: AppSettings) -> Result<&AppSettings> {
        self.settings.update(settings).await
    }
}
