//! Error types for the medterm library.
//!
//! All errors are represented by the [`MedtermError`] enum. Load-time problems
//! with individual glossary entries are not errors: they are recorded as
//! warnings by the source loader, and only an entirely empty vocabulary is
//! reported as [`MedtermError::EmptyVocabulary`].
//!
//! # Examples
//!
//! ```
//! use medterm::error::{MedtermError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MedtermError::invalid_input("text must be a string"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for medterm operations.
#[derive(Error, Debug)]
pub enum MedtermError {
    /// I/O errors (reading glossary files, reading input text)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A glossary source could not be used at all
    #[error("Source error: {0}")]
    Source(String),

    /// Every source was empty or unusable after loading
    #[error("Empty vocabulary: {0}")]
    EmptyVocabulary(String),

    /// Vocabulary index construction failed
    #[error("Index error: {0}")]
    Index(String),

    /// The vocabulary index has not been built yet
    #[error("Glossary service is not ready: {0}")]
    NotReady(String),

    /// The caller supplied input that is not valid text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MedtermError.
pub type Result<T> = std::result::Result<T, MedtermError>;

impl MedtermError {
    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        MedtermError::Source(msg.into())
    }

    /// Create a new empty vocabulary error.
    pub fn empty_vocabulary<S: Into<String>>(msg: S) -> Self {
        MedtermError::EmptyVocabulary(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MedtermError::Index(msg.into())
    }

    /// Create a new not ready error.
    pub fn not_ready<S: Into<String>>(msg: S) -> Self {
        MedtermError::NotReady(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        MedtermError::InvalidInput(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MedtermError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MedtermError::Other(msg.into())
    }

    /// Whether this error means the service has no published index yet.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, MedtermError::NotReady(_))
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, MedtermError::InvalidInput(_))
    }
}
