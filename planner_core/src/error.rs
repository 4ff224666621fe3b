//! Error types for the planner_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for planner_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Solve or score called before any catalog was loaded
    #[error("Exercises not initialized. Load a catalog first.")]
    NotInitialized,

    /// Boundary input that cannot be mapped onto the domain model
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
