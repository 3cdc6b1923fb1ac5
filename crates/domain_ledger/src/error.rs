//! Ledger domain errors
//!
//! The taxonomy keeps business-rule rejections (`Locked`, `WindowExpired`,
//! `AlreadyVerified`) distinct from scope violations (`Forbidden`) and
//! from missing data (`NotFound`), so a request handler can render an
//! accurate message for each. Store failures propagate unmodified.

use core_kernel::{MoneyError, StoreError};
use domain_tenancy::TenancyError;
use thiserror::Error;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Tenancy, bill, or entry missing
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The caller's role or scope does not own the target
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The entry was verified by the tenant and is immutable
    #[error("Entry {0} is locked by tenant verification")]
    Locked(String),

    /// The entry's 24-hour edit window has elapsed
    #[error("Edit window expired for entry {0}")]
    WindowExpired(String),

    /// The entry has already been verified
    #[error("Entry {0} is already verified")]
    AlreadyVerified(String),

    /// A required field is missing or a value is out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tenancy domain error
    #[error(transparent)]
    Tenancy(#[from] TenancyError),

    /// Money arithmetic error
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Persistence layer failure, propagated unmodified
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl std::fmt::Display) -> Self {
        LedgerError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        LedgerError::Forbidden(message.into())
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput(message.into())
    }

    /// Returns true for business-rule rejections, as opposed to scope
    /// violations or system failures
    pub fn is_business_rejection(&self) -> bool {
        matches!(
            self,
            LedgerError::Locked(_)
                | LedgerError::WindowExpired(_)
                | LedgerError::AlreadyVerified(_)
        )
    }
}
