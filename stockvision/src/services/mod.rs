//! Services module
//!
//! Business logic that coordinates between commands, storage and the model API.

pub mod gemini;
pub mod history;
pub mod library;
pub mod research;
pub mod settings;

pub use gemini::{GeminiClient, GenerateRequest, ModelTransport};
pub use history::HistoryStore;
pub use research::ResearchClient;
pub use settings::SettingsStore;
