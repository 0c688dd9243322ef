//! Command handlers
//!
//! Each handler runs against a loaded [`App`](crate::app::App) and returns
//! the text to print, so the binary stays a thin shell:
//! - `research`: the research form
//! - `library`: saved results, search and favorites
//! - `settings`: user preferences

pub mod library;
pub mod research;
pub mod settings;

use crate::app::App;
use crate::cli::{Commands, OutputFormat};
use crate::error::Result;
use crate::services::ModelTransport;
use crate::storage::KeyValueStore;
use serde::Serialize;

/// Route a parsed command to its handler
pub async fn dispatch<S, T>(
    command: Commands,
    app: &mut App<S, T>,
    format: OutputFormat,
) -> Result<String>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    match command {
        Commands::Research(args) => research::handle(args, app, format).await,
        Commands::Library { action } => library::handle(action, app, format).await,
        Commands::Settings { action } => settings::handle(action, app, format).await,
    }
}

pub(crate) fn to_json<V: Serialize + ?Sized>(value: &V) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
