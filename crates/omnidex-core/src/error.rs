//! Error types for omnidex-core.
//!
//! Every Omnidex crate reports failures through this one enum so callers of
//! the search service see a single taxonomy:
//!
//! - [`Error::Validation`]: missing or malformed indexing input
//! - [`Error::Storage`]: the backing store is unavailable or rejected the operation
//! - [`Error::Query`]: query text that cannot be turned into a match expression
//! - [`Error::Config`]: invalid configuration
//! - [`Error::Io`]: filesystem failures with the offending path

use std::path::{Path, PathBuf};

/// Result type alias for Omnidex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing or querying.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Indexing input failed validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation, if known.
        field: Option<String>,
        /// What went wrong.
        message: String,
    },

    /// The backing store is unreachable or rejected the operation.
    #[error("Storage error: {message}")]
    Storage {
        /// Human-readable error message.
        message: String,
        /// Underlying store error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The query could not be turned into a match expression.
    #[error("Query error: {message}")]
    Query {
        /// What is wrong with the query.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// I/O error with the path involved.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns whether retrying the same call may succeed.
    ///
    /// Only storage and I/O failures are transient. Because indexing is an
    /// atomic replace, retrying `index` after a storage error is always safe.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Storage { .. } => true,
            Error::Io { .. } => true,
            Error::Validation { .. } => false,
            Error::Query { .. } => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a validation error without a field name.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a storage error with a message only.
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Error::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a storage error wrapping the store's own error.
    pub fn storage_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a query error.
    pub fn query<S: Into<String>>(message: S) -> Self {
        Error::Query {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates an I/O error carrying the path that failed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
