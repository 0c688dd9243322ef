//! Settings commands
//!
//! `set` merges the given flags into the current record and saves the
//! whole record.

use super::to_json;
use crate::app::App;
use crate::cli::{OutputFormat, SettingsCommands};
use crate::error::Result;
use crate::models::{AppSettings, ImageStyle, Language, Platform};
use crate::services::ModelTransport;
use crate::storage::KeyValueStore;
use serde::Serialize;

/// Settings as shown to the user, with the API key masked
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub language: Language,
    pub default_style: ImageStyle,
    pub default_platform: Platform,
    pub api_key: Option<String>,
}

impl From<&AppSettings> for SettingsView {
    fn from(settings: &AppSettings) -> Self {
        Self {
            language: settings.language,
            default_style: settings.default_style,
            default_platform: settings.default_platform,
            api_key: settings
                .has_api_key()
                .then(|| mask_api_key(&settings.api_key)),
        }
    }
}

/// Keep only the last four characters visible
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn render(view: &SettingsView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(view),
        OutputFormat::Text => Ok(format!(
            "Settings\n  Output language:  {}\n  Default platform: {}\n  Default style:    {}\n  Gemini API key:   {}",
            view.language,
            view.default_platform,
            view.default_style,
            view.api_key.as_deref().unwrap_or("not set"),
        )),
    }
}

pub async fn handle<S, T>(
    action: SettingsCommands,
    app: &mut App<S, T>,
    format: OutputFormat,
) -> Result<String>
where
    S: KeyValueStore + Clone,
    T: ModelTransport,
{
    match action {
        SettingsCommands::Show => render(&SettingsView::from(app.settings()), format),
        SettingsCommands::Set {
            language,
            style,
            platform,
            api_key,
            clear_api_key,
        } => {
            let current = app.settings().clone();
            let merged = AppSettings {
                language: language.unwrap_or(current.language),
                default_style: style.unwrap_or(current.default_style),
                default_platform: platform.unwrap_or(current.default_platform),
                api_key: if clear_api_key {
                    String::new()
                } else {
                    api_key.map(|k| k.trim().to_string()).unwrap_or(current.api_key)
                },
            };

            let saved = app.update_settings(merged).await?;
            render(&SettingsView::from(saved), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("AIzaSyExample1234"), "****1234");
        assert_eq!(mask_api_key("abc"), "****");
    }

    #[test]
    fn test_view_hides_empty_key() {
        let view = SettingsView::from(&AppSettings::default());
        assert!(view.api_key.is_none());

        let text = render(&view, OutputFormat::Text).unwrap();
        assert!(text.contains("Gemini API key:   not set"));
        assert!(text.contains("Default platform: Shutterstock"));
    }
}
