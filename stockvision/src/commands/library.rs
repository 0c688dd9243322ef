//! Library commands
//!
//! Listing with search/favorites, detail view, favorite toggle, delete and
//! single-field export.

use super::to_json;
use crate::app::App;
use crate::cli::{ExportField, LibraryCommands, OutputFormat};
use crate::error::{AppError, Result};
use crate::models::{LibraryFilter, ResearchResult};
use crate::services::library::{filter_results, render_card, render_library};
use crate::services::ModelTransport;
use crate::storage::KeyValueStore;

pub async fn handle<S, T>(
    action: LibraryCommands,
    app: &mut App<S, T>,
    format: OutputFormat,
) -> Result<String>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    match action {
        LibraryCommands::List { search, favorites } => {
            let filter = if favorites {
                LibraryFilter::Favorites
            } else {
                LibraryFilter::All
            };
            let items = app.history().items();
            let visible = filter_results(items, &search, filter);

            match format {
                OutputFormat::Text => Ok(render_library(items.len(), &visible)),
                OutputFormat::Json => to_json(&visible),
            }
        }
        LibraryCommands::Show { id } => {
            let result = app.view_history_item(&id)?;
            render(result, format)
        }
        LibraryCommands::Favorite { id } => {
            require(app, &id)?;
            app.toggle_favorite(&id).await?;
            let result = require(app, &id)?;
            match format {
                OutputFormat::Text => Ok(if result.is_favorite {
                    format!("Added to favorites: {}", result.topic)
                } else {
                    format!("Removed from favorites: {}", result.topic)
                }),
                OutputFormat::Json => to_json(result),
            }
        }
        LibraryCommands::Delete { id } => {
            let topic = require(app, &id)?.topic.clone();
            let remaining = app.delete(&id).await?.len();
            match format {
                OutputFormat::Text => Ok(format!(
                    "Deleted: {} ({} saved generations left)",
                    topic, remaining
                )),
                OutputFormat::Json => to_json(&serde_json::json!({
                    "deleted": id,
                    "remaining": remaining,
                })),
            }
        }
        LibraryCommands::Export { id, field } => {
            let result = require(app, &id)?;
            Ok(export_field(result, field))
        }
    }
}

/// The CLI reports unknown ids even though the store treats them as no-ops
fn require<'a, S, T>(app: &'a App<S, T>, id: &str) -> Result<&'a ResearchResult>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    app.history()
        .get(id)
        .ok_or_else(|| AppError::ResultNotFound(id.to_string()))
}

fn render(result: &ResearchResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_card(result)),
        OutputFormat::Json => to_json(result),
    }
}

pub fn export_field(result: &ResearchResult, field: ExportField) -> String {
    match field {
        ExportField::Title => result.title.clone(),
        ExportField::Description => result.description.clone(),
        ExportField::Keywords => result.keywords_csv(),
        ExportField::Tags => result.tags.join(", "),
        ExportField::Prompt => result.ai_prompt.clone(),
    }
}
