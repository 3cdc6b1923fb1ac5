//! Ledger Domain - monthly bill reconciliation
//!
//! This crate turns a stream of dated debit/credit entries (rent,
//! metered electricity, water, payments) into authoritative per-month
//! bill totals, carry-forward balances, and payment status.
//!
//! # Invariants
//!
//! - One bill per (tenancy, calendar month); auto-created on the first
//!   entry of a new month.
//! - After every entry mutation: `total == Σ debit`, `paid == Σ credit`,
//!   `remaining == total − paid`.
//! - A verified entry is immutable; an unverified entry is mutable only
//!   within 24 hours of creation. The lock is one-way.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{Actor, EntryDraft, LedgerService};
//!
//! let service = LedgerService::new(store);
//! let draft = EntryDraft::new(today, "March rent").with_rent(rent_amount);
//! let entry = service.add_entry(Actor::Landlord(landlord_id), tenancy_id, draft, now).await?;
//! ```

pub mod bill;
pub mod entry;
pub mod error;
pub mod meter;
pub mod ports;
pub mod service;

pub use bill::{Bill, BillStatus};
pub use entry::{
    CreatorRole, ElectricityCharge, EntryDraft, LedgerEntry, PaymentMethod, EDIT_WINDOW_HOURS,
};
pub use error::LedgerError;
pub use ports::{EntryMutation, LedgerStore};
pub use service::{Actor, LedgerService};
