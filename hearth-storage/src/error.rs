//! Error types for hearth-storage.

use thiserror::Error;

/// Result alias used throughout the storage layer.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures surfaced by the storage layer.
///
/// Nothing here is retried internally; every failure propagates to the
/// caller tagged with the operation that produced it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be reached or rejected the credentials.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// Schema creation or teardown hit an incompatible existing structure.
    #[error("schema setup failed: {0}")]
    Schema(#[source] sqlx::Error),

    /// A kind tag outside the configured registry.
    #[error("unknown entity type '{0}'")]
    UnknownType(String),

    /// A read failed mid-flight. No partial results are returned.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A commit failed. The pending set was already emptied and the
    /// transaction rolled back before this is raised.
    #[error("commit failed: {0}")]
    Commit(#[source] sqlx::Error),

    /// An operation that needs an active session was called without one.
    #[error("no active session (currently {state}); call reload first")]
    InvalidState { state: &'static str },

    /// Environment configuration is missing or malformed.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failed_operation() {
        let err = StorageError::UnknownType("Spaceship".to_string());
        assert_eq!(err.to_string(), "unknown entity type 'Spaceship'");

        let err = StorageError::InvalidState { state: "closed" };
        assert_eq!(
            err.to_string(),
            "no active session (currently closed); call reload first"
        );

        let err = StorageError::Config {
            reason: "HEARTH_DB_USER must be set".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "configuration error: HEARTH_DB_USER must be set"
        );
    }

    #[test]
    fn wrapped_driver_errors_keep_their_message() {
        let err = StorageError::Commit(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("commit failed: "));
    }
}
