//! Core Kernel - Foundational types for the rent ledger engine
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Billing period (calendar month) types
//! - Strongly-typed identifiers
//! - The persistence port error shared by all store adapters

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{BillId, LandlordId, LedgerEntryId, PropertyId, TenancyId, TenantId};
pub use money::{Currency, Money, MoneyError, UnitRate};
pub use ports::{DomainPort, StoreError};
pub use temporal::{BillingMonth, TemporalError};
