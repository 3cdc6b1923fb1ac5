//! Tenancy Domain - lease terms and lifecycle
//!
//! A `Tenancy` links one tenant to one property under one landlord and
//! carries the monetary terms (monthly rent, deposit, currency) the
//! billing engine snapshots into each monthly bill.
//!
//! Two invariants live here:
//! - a property has at most one active tenancy at a time (enforced at the
//!   persistence layer on insert, see `infra_store`);
//! - ending a tenancy is soft and never cascades to bills or entries.

pub mod error;
pub mod tenancy;

pub use error::TenancyError;
pub use tenancy::{Tenancy, TenancyStatus};
