//! Error handling for the idstore library
//!
//! Lookups and deletes report misses through `Option`/`bool`; this type covers
//! the remaining failures: rejected configuration, synthesized id collisions
//! and config file I/O.

use thiserror::Error;

/// Main error type for the idstore library
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An id that must be unique is already present
    #[error("Duplicate id: {id}")]
    DuplicateId {
        /// The colliding id
        id: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl StoreError {
    /// Create a duplicate id error
    pub fn duplicate_id<S: Into<String>>(id: S) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A duplicate id leaves the store untouched, so the caller may retry with
    /// a different value or id.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::DuplicateId { .. } => true,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StoreError>;
