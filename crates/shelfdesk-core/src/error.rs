//! Error types for Shelfdesk core library.

use crate::types::EntityId;

/// Errors that can occur while editing and persisting records.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Backing service failure (transport, server rejection, etc.)
    #[error("Service error: {message}")]
    Service {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record does not exist in the backing store
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "borrow"
        entity: &'static str,
        /// Identity that was looked up
        id: EntityId,
    },

    /// Field presence or identity validation error
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A form string could not be read as an instant
    #[error("Invalid date-time '{input}' for format '{format}': {source}")]
    Temporal {
        /// The raw form value
        input: String,
        /// The chrono pattern it was read with
        format: &'static str,
        /// Underlying parse failure
        #[source]
        source: chrono::ParseError,
    },

    /// I/O error (seed files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Save timed out
    #[error("Save timed out after {seconds}s")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// The edit session was closed before the operation finished
    #[error("Edit session closed")]
    SessionClosed,
}

/// Convenience `Result` type alias for Shelfdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is retryable.
    ///
    /// Retryable errors are transient: the user can press save again
    /// without changing the form.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Service { .. } => true,
            Error::Io(_) => true,
            Error::Timeout { .. } => true,
            Error::NotFound { .. } => false,
            Error::Validation { .. } => false,
            Error::Temporal { .. } => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
            Error::SessionClosed => false,
        }
    }

    /// Creates a new service error with a message.
    pub fn service<S: Into<String>>(message: S) -> Self {
        Error::Service {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new service error with a message and source error.
    pub fn service_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Service {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
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

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
