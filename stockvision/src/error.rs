//! Error types for StockVision
//!
//! All errors use thiserror for structured error handling.
//! These errors can be serialized for machine-readable CLI output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No API key configured; raised before any request is attempted
    #[error("Please set your Gemini API Key in Settings first.")]
    MissingApiKey,

    /// Transport-level failure talking to the model (network, non-success status)
    #[error("Failed to generate research. Please check your API key and connection.")]
    GenerationFailed(String),

    /// A response arrived but could not be parsed into the brief schema
    #[error("Invalid response format from AI: {0}")]
    InvalidResponse(String),

    #[error("Research result not found: {0}")]
    ResultNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
