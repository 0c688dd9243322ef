//! Domain models
//!
//! Rust structs representing persisted entities and request parameters.
//! Field names serialize in camelCase and enumerations as their display
//! strings so stored history stays readable and stable.

use chrono::{DateTime, Local, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target stock marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Platform {
    Shutterstock,
    #[serde(rename = "Adobe Stock")]
    AdobeStock,
    Instagram,
    #[serde(rename = "Thai Market")]
    ThaiMarket,
    Canva,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Shutterstock => "Shutterstock",
            Platform::AdobeStock => "Adobe Stock",
            Platform::Instagram => "Instagram",
            Platform::ThaiMarket => "Thai Market",
            Platform::Canva => "Canva",
        }
    }
}

/// Temporal demand category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum MarketType {
    #[default]
    Evergreen,
    Seasonal,
    Trend,
}

impl MarketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::Evergreen => "Evergreen",
            MarketType::Seasonal => "Seasonal",
            MarketType::Trend => "Trend",
        }
    }
}

/// Visual rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ImageStyle {
    Realistic,
    Vector,
    Illustration,
    Watercolor,
    Minimal,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "Realistic",
            ImageStyle::Vector => "Vector",
            ImageStyle::Illustration => "Illustration",
            ImageStyle::Watercolor => "Watercolor",
            ImageStyle::Minimal => "Minimal",
        }
    }
}

/// Output language for generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
pub enum Language {
    Thai,
    #[default]
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Thai => "Thai",
            Language::English => "English",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Platform, MarketType, ImageStyle, Language);

/// One generated SEO brief.
///
/// Everything except `is_favorite` is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub id: String,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
    pub topic: String,
    pub platform: Platform,
    pub market_type: MarketType,
    pub style: ImageStyle,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub theme: String,
    pub commercial_angle: String,
    pub buyer_intent: String,
    pub ai_prompt: String,
    #[serde(default)]
    pub is_favorite: bool,
}

impl ResearchResult {
    /// Creation time in the local timezone
    pub fn created_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// Keywords as a comma separated list, ready to paste into an upload form
    pub fn keywords_csv(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Singleton user preference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub language: Language,
    pub default_style: ImageStyle,
    pub default_platform: Platform,
    /// Older records predate the key field
    #[serde(default)]
    pub api_key: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::English,
            default_style: ImageStyle::Realistic,
            default_platform: Platform::Shutterstock,
            api_key: String::new(),
        }
    }
}

impl AppSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Research form input
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchForm {
    pub topic: String,
    pub platform: Platform,
    pub market_type: MarketType,
    pub style: ImageStyle,
}

impl ResearchForm {
    /// Blank form seeded from the user's defaults
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            topic: String::new(),
            platform: settings.default_platform,
            market_type: MarketType::default(),
            style: settings.default_style,
        }
    }
}

/// Parameters of one research call, captured by value at submission so later
/// settings edits cannot leak into an in-flight request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchRequest {
    pub topic: String,
    pub platform: Platform,
    pub market_type: MarketType,
    pub style: ImageStyle,
    pub language: Language,
}

impl ResearchRequest {
    pub fn new(form: &ResearchForm, language: Language) -> Self {
        Self {
            topic: form.topic.clone(),
            platform: form.platform,
            market_type: form.market_type,
            style: form.style,
            language,
        }
    }
}

/// Library visibility filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LibraryFilter {
    #[default]
    All,
    Favorites,
}
