//! Error types for the kona application.
//!
//! One enum covers every failure the server can hit, from startup checks to
//! per-request query faults. Handlers map all of these to HTTP 500.

use thiserror::Error;

/// The main error type for kona operations.
#[derive(Error, Debug)]
pub enum KonaError {
    /// SQLite driver and query errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A physical table does not match its declared row structure
    #[error("Schema mismatch in table '{table}': {message}")]
    SchemaMismatch { table: String, message: String },

    /// Queries that cannot be answered because the dataset has no rows
    #[error("Empty dataset: {message}")]
    EmptyDataset { message: String },

    /// Stored date values that do not parse as calendar dates
    #[error("Date parse error: '{value}' - {message}")]
    DateParse { value: String, message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

/// Convenience type alias for Results with KonaError
pub type Result<T> = std::result::Result<T, KonaError>;
