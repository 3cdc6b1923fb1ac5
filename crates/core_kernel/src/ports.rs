//! Ports and adapters infrastructure
//!
//! The ledger engine talks to persistence exclusively through port traits
//! defined in the domain crates. Adapters (the in-memory store, or a SQL
//! store in the surrounding platform) implement those traits and report
//! failures through the unified `StoreError` defined here, so the domain
//! never sees adapter-specific error types.

use std::fmt;
use thiserror::Error;

/// Error type for persistence port operations
///
/// Every adapter maps its native failures into these variants. The domain
/// layer treats `Conflict` specially during bill creation: a uniqueness
/// conflict on (tenancy, month) means another caller created the bill
/// first, and the correct response is to re-fetch, not to fail.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation violated a uniqueness or state constraint
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An internal adapter error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may
    /// succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection { .. })
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Returns true if this error is a uniqueness/state conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

/// Marker trait for all persistence ports
///
/// Port traits extend this marker to guarantee they are thread-safe and
/// usable from async contexts.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found() {
        let error = StoreError::not_found("Bill", "BIL-123");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("Bill"));
        assert!(error.to_string().contains("BIL-123"));
    }

    #[test]
    fn test_conflict_is_not_transient() {
        let error = StoreError::conflict("duplicate bill for 2026-03");
        assert!(error.is_conflict());
        assert!(!error.is_transient());
    }

    #[test]
    fn test_connection_is_transient() {
        let error = StoreError::connection("pool exhausted");
        assert!(error.is_transient());
    }
}
