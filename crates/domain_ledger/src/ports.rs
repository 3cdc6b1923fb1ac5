//! Persistence port for the ledger domain
//!
//! The engine persists through this trait; adapters live in `infra_store`
//! (in-memory) or in the surrounding platform (SQL). Two contract points
//! carry the concurrency invariants:
//!
//! - `insert_bill` must enforce uniqueness on `(tenancy_id, month)` and
//!   report a duplicate as `StoreError::Conflict` — the caller treats
//!   that as "someone else just created it" and re-fetches.
//! - `apply_entry_mutation` must apply the mutation and recompute the
//!   bill's aggregates in one atomic step, serialized against other
//!   mutations of the same bill, so a reader never observes a bill whose
//!   totals disagree with its entry set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{BillId, BillingMonth, DomainPort, LedgerEntryId, StoreError, TenancyId};
use domain_tenancy::Tenancy;

use crate::bill::Bill;
use crate::entry::LedgerEntry;

/// A mutation of one bill's entry set
#[derive(Debug, Clone)]
pub enum EntryMutation {
    /// Append a new entry
    Insert(LedgerEntry),
    /// Overwrite an existing entry in place
    Update(LedgerEntry),
    /// Remove an entry
    Remove(LedgerEntryId),
}

/// Persistence operations the ledger engine depends on
#[async_trait]
pub trait LedgerStore: DomainPort {
    /// Fetches a tenancy by id
    async fn tenancy(&self, id: TenancyId) -> Result<Option<Tenancy>, StoreError>;

    /// Inserts a tenancy
    ///
    /// Fails with `Conflict` if the property already has an active
    /// tenancy.
    async fn insert_tenancy(&self, tenancy: Tenancy) -> Result<Tenancy, StoreError>;

    /// Overwrites a tenancy (lifecycle changes)
    async fn update_tenancy(&self, tenancy: &Tenancy) -> Result<(), StoreError>;

    /// Fetches a bill by id
    async fn bill(&self, id: BillId) -> Result<Option<Bill>, StoreError>;

    /// Fetches the bill for a tenancy's month, if one exists
    async fn bill_for_month(
        &self,
        tenancy_id: TenancyId,
        month: BillingMonth,
    ) -> Result<Option<Bill>, StoreError>;

    /// Inserts a freshly-opened bill
    ///
    /// Fails with `Conflict` when a bill for the same `(tenancy, month)`
    /// already exists; the adapter must make the existence check and the
    /// insert atomic.
    async fn insert_bill(&self, bill: Bill) -> Result<Bill, StoreError>;

    /// Fetches an entry by id
    async fn entry(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError>;

    /// Fetches all entries for a bill, in creation order
    async fn entries_for_bill(&self, bill_id: BillId) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Overwrites an entry without touching the bill's aggregates
    ///
    /// Used for verification, which flips flags but changes no amounts.
    async fn update_entry(&self, entry: &LedgerEntry) -> Result<(), StoreError>;

    /// Atomically applies an entry mutation and recalculates the bill
    ///
    /// Returns the bill with its freshly recomputed aggregates.
    async fn apply_entry_mutation(
        &self,
        bill_id: BillId,
        mutation: EntryMutation,
        now: DateTime<Utc>,
    ) -> Result<Bill, StoreError>;

    /// Atomically recalculates a bill from its current entry set
    async fn recalculate_bill(
        &self,
        bill_id: BillId,
        now: DateTime<Utc>,
    ) -> Result<Bill, StoreError>;
}
