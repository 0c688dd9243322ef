//! Command-line interface definition
//!
//! The three subcommand groups mirror the app's three panes: the research
//! form, the saved-results library and the settings form.

use crate::app::StorageBackend;
use crate::config::{DEFAULT_API_BASE, DEFAULT_MODEL, ENV_API_BASE, ENV_DATA_DIR, ENV_MODEL, ENV_STORAGE};
use crate::models::{ImageStyle, Language, MarketType, Platform};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "stockvision",
    version,
    about = "Stock image SEO research and AI prompt generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Directory holding saved history and settings
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(long, global = true, value_enum, env = ENV_STORAGE, default_value_t = StorageBackend::File)]
    pub storage: StorageBackend,

    /// Model used for research generation
    #[arg(long, global = true, env = ENV_MODEL, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini API
    #[arg(long, global = true, env = ENV_API_BASE, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate SEO metadata and an AI prompt for a topic
    Research(ResearchArgs),
    /// Browse and manage saved research
    Library {
        #[command(subcommand)]
        action: LibraryCommands,
    },
    /// View or change preferences
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Debug, Args)]
pub struct ResearchArgs {
    /// Niche or topic, e.g. "Sustainable energy"
    pub topic: String,

    /// Target platform (defaults to the saved default platform)
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// Market type
    #[arg(long = "market", value_enum)]
    pub market_type: Option<MarketType>,

    /// Visual style (defaults to the saved default style)
    #[arg(long, value_enum)]
    pub style: Option<ImageStyle>,
}

#[derive(Debug, Subcommand)]
pub enum LibraryCommands {
    /// List saved research, newest first
    List {
        /// Only entries whose topic or title contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Show one saved result in full
    Show { id: String },
    /// Toggle the favorite flag
    Favorite { id: String },
    /// Delete a saved result
    Delete { id: String },
    /// Print one field of a saved result, ready to paste
    Export {
        id: String,

        #[arg(long, value_enum, default_value_t = ExportField::Keywords)]
        field: ExportField,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportField {
    Title,
    Description,
    /// Comma separated keyword list
    Keywords,
    Tags,
    Prompt,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long, value_enum)]
        language: Option<Language>,

        #[arg(long, value_enum)]
        style: Option<ImageStyle>,

        #[arg(long, value_enum)]
        platform: Option<Platform>,

        /// Gemini API key
        #[arg(long, conflicts_with = "clear_api_key")]
        api_key: Option<String>,

        /// Remove the stored API key
        #[arg(long)]
        clear_api_key: bool,
    },
}
