//! Tenancy domain errors

use thiserror::Error;

/// Errors that can occur in the tenancy domain
#[derive(Debug, Error)]
pub enum TenancyError {
    /// Tenancy not found
    #[error("Tenancy not found: {0}")]
    NotFound(String),

    /// Lease dates are inconsistent
    #[error("Invalid lease period: {0}")]
    InvalidLeasePeriod(String),

    /// A monetary term is invalid
    #[error("Invalid lease term: {0}")]
    InvalidTerm(String),

    /// The property already has an active tenancy
    #[error("Property {0} already has an active tenancy")]
    PropertyOccupied(String),

    /// The tenancy has already ended
    #[error("Tenancy {0} has already ended")]
    AlreadyEnded(String),
}
