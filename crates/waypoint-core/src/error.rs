//! Error types for the itinerary library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all itinerary operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// User not found for the given ID
    #[error("User with ID {id} not found")]
    UserNotFound { id: u64 },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Day not found for the given ID
    #[error("Day with ID {id} not found")]
    DayNotFound { id: u64 },
    /// Itinerary item not found for the given ID
    #[error("Item with ID {id} not found")]
    ItemNotFound { id: u64 },
    /// Place not found for the given ID
    #[error("Place with ID {id} not found")]
    PlaceNotFound { id: u64 },
    /// The user has not saved the given place
    #[error("Place {place_id} is not saved by user {user_id}")]
    SavedPlaceNotFound { user_id: u64, place_id: u64 },
    /// The acting user does not own the resource
    #[error("User {user_id} may not modify {resource} {id}")]
    Forbidden {
        resource: &'static str,
        id: u64,
        user_id: u64,
    },
    /// A uniqueness constraint was violated inside a unit of work
    #[error("Conflict: {message}")]
    Conflict { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A rank string that is not a fixed-point decimal
    #[error("Invalid rank '{input}': {reason}")]
    InvalidRank { input: String, reason: String },
    /// Calendar arithmetic left the supported date range
    #[error("Date arithmetic failed: {source}")]
    DateOutOfRange {
        #[from]
        source: jiff::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    ///
    /// Constraint violations become [`PlannerError::Conflict`] so callers can
    /// tell a broken uniqueness invariant apart from an I/O failure.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        if is_constraint_violation(&source) {
            return PlannerError::Conflict {
                message: format!("{}: {}", self.message, source),
            };
        }
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a new forbidden error for a resource owned by someone else.
    pub fn forbidden(resource: &'static str, id: u64, user_id: u64) -> Self {
        Self::Forbidden {
            resource,
            id,
            user_id,
        }
    }

    /// Returns true for every "referenced row is absent" variant.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. }
                | Self::TripNotFound { .. }
                | Self::DayNotFound { .. }
                | Self::ItemNotFound { .. }
                | Self::PlaceNotFound { .. }
                | Self::SavedPlaceNotFound { .. }
        )
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to PlannerError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| PlannerError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for itinerary operations
pub type Result<T> = std::result::Result<T, PlannerError>;
