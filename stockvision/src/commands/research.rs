//! Research command

use super::to_json;
use crate::app::App;
use crate::cli::{OutputFormat, ResearchArgs};
use crate::error::Result;
use crate::models::ResearchForm;
use crate::services::library::render_card;
use crate::services::ModelTransport;
use crate::storage::KeyValueStore;

/// Fill the form from arguments over saved defaults, then submit it
pub async fn handle<S, T>(
    args: ResearchArgs,
    app: &mut App<S, T>,
    format: OutputFormat,
) -> Result<String>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    let defaults = app.research_form_defaults();
    let form = ResearchForm {
        topic: args.topic,
        platform: args.platform.unwrap_or(defaults.platform),
        market_type: args.market_type.unwrap_or(defaults.market_type),
        style: args.style.unwrap_or(defaults.style),
    };

    tracing::info!(
        "Researching '{}' for {} ({}, {})",
        form.topic,
        form.platform,
        form.market_type,
        form.style
    );

    let result = app.submit_research(&form).await?;

    match format {
        OutputFormat::Text => Ok(render_card(result)),
        OutputFormat::Json => to_json(result),
    }
}
