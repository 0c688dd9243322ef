//! Application configuration constants
//!
//! Central location for storage keys, model endpoint defaults and the
//! limits communicated to the model through the response schema.

// ===== Storage =====

/// Key holding the serialized research history
pub const HISTORY_KEY: &str = "stock_vision_history";

/// Key holding the serialized user settings
pub const SETTINGS_KEY: &str = "stock_vision_settings";

/// Directory name under the platform data dir
pub const APP_DIR_NAME: &str = "stockvision";

/// SQLite database file name used by the sqlite storage backend
pub const DATABASE_FILE_NAME: &str = "stockvision.db";

// ===== Model API =====

/// Model used for research generation
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Base URL of the Gemini REST API
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

// ===== Response Schema Limits =====

/// Maximum title length requested from the model
pub const TITLE_MAX_CHARS: usize = 70;

/// Number of SEO keywords requested from the model
pub const KEYWORD_COUNT: usize = 20;

// ===== Environment =====

pub const ENV_DATA_DIR: &str = "STOCKVISION_DATA_DIR";
pub const ENV_STORAGE: &str = "STOCKVISION_STORAGE";
pub const ENV_MODEL: &str = "STOCKVISION_MODEL";
pub const ENV_API_BASE: &str = "STOCKVISION_API_BASE";
