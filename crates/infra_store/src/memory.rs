//! In-memory `LedgerStore` adapter
//!
//! The reference implementation of the persistence port, used by the test
//! suites and by embedders that do not need durability. One async mutex
//! guards the whole state, which trivially satisfies the port's two
//! atomicity contracts:
//!
//! - `insert_bill` checks the `(tenancy, month)` index and inserts in the
//!   same critical section, so exactly one of two racing creators wins
//!   and the loser sees `Conflict`;
//! - `apply_entry_mutation` applies the mutation and recalculates the
//!   bill before releasing the lock, so no reader ever observes totals
//!   that disagree with the entry set.
//!
//! A SQL adapter would replace the mutex with a unique index on
//! `(tenancy_id, month)` and a transaction per mutation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use core_kernel::{
    BillId, BillingMonth, DomainPort, LedgerEntryId, StoreError, TenancyId,
};
use domain_ledger::{Bill, EntryMutation, LedgerEntry, LedgerStore};
use domain_tenancy::Tenancy;

#[derive(Debug, Default)]
struct State {
    tenancies: HashMap<TenancyId, Tenancy>,
    bills: HashMap<BillId, Bill>,
    /// Uniqueness index for one bill per tenancy-month
    bill_index: HashMap<(TenancyId, BillingMonth), BillId>,
    /// BTreeMap keyed by v7 id, so iteration order is creation order
    entries: BTreeMap<LedgerEntryId, LedgerEntry>,
}

impl State {
    fn entries_for_bill(&self, bill_id: BillId) -> Vec<LedgerEntry> {
        self.entries
            .values()
            .filter(|entry| entry.bill_id == bill_id)
            .cloned()
            .collect()
    }

    /// Recomputes a bill's aggregates from its entries, in place
    fn recalculate(&mut self, bill_id: BillId, now: DateTime<Utc>) -> Result<Bill, StoreError> {
        let entries = self.entries_for_bill(bill_id);
        let bill = self
            .bills
            .get_mut(&bill_id)
            .ok_or_else(|| StoreError::not_found("Bill", bill_id))?;
        bill.recalculate(&entries, now)
            .map_err(|e| StoreError::internal(format!("recalculation failed: {}", e)))?;
        Ok(bill.clone())
    }
}

/// Thread-safe in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for MemoryStore {}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn tenancy(&self, id: TenancyId) -> Result<Option<Tenancy>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.tenancies.get(&id).cloned())
    }

    async fn insert_tenancy(&self, tenancy: Tenancy) -> Result<Tenancy, StoreError> {
        let mut state = self.state.lock().await;
        let occupied = state.tenancies.values().any(|existing| {
            existing.property_id == tenancy.property_id && existing.is_active()
        });
        if tenancy.is_active() && occupied {
            return Err(StoreError::conflict(format!(
                "property {} already has an active tenancy",
                tenancy.property_id
            )));
        }
        state.tenancies.insert(tenancy.id, tenancy.clone());
        Ok(tenancy)
    }

    async fn update_tenancy(&self, tenancy: &Tenancy) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if !state.tenancies.contains_key(&tenancy.id) {
            return Err(StoreError::not_found("Tenancy", tenancy.id));
        }
        state.tenancies.insert(tenancy.id, tenancy.clone());
        Ok(())
    }

    async fn bill(&self, id: BillId) -> Result<Option<Bill>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.bills.get(&id).cloned())
    }

    async fn bill_for_month(
        &self,
        tenancy_id: TenancyId,
        month: BillingMonth,
    ) -> Result<Option<Bill>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .bill_index
            .get(&(tenancy_id, month))
            .and_then(|id| state.bills.get(id))
            .cloned())
    }

    async fn insert_bill(&self, bill: Bill) -> Result<Bill, StoreError> {
        let mut state = self.state.lock().await;
        let key = (bill.tenancy_id, bill.month);
        // Existence check and insert share the critical section
        if state.bill_index.contains_key(&key) {
            return Err(StoreError::conflict(format!(
                "bill already exists for tenancy {} month {}",
                bill.tenancy_id, bill.month
            )));
        }
        state.bill_index.insert(key, bill.id);
        state.bills.insert(bill.id, bill.clone());
        Ok(bill)
    }

    async fn entry(&self, id: LedgerEntryId) -> Result<Option<LedgerEntry>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.entries.get(&id).cloned())
    }

    async fn entries_for_bill(&self, bill_id: BillId) -> Result<Vec<LedgerEntry>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.entries_for_bill(bill_id))
    }

    async fn update_entry(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if !state.entries.contains_key(&entry.id) {
            return Err(StoreError::not_found("LedgerEntry", entry.id));
        }
        state.entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn apply_entry_mutation(
        &self,
        bill_id: BillId,
        mutation: EntryMutation,
        now: DateTime<Utc>,
    ) -> Result<Bill, StoreError> {
        let mut state = self.state.lock().await;
        if !state.bills.contains_key(&bill_id) {
            return Err(StoreError::not_found("Bill", bill_id));
        }

        match mutation {
            EntryMutation::Insert(entry) => {
                if state.entries.contains_key(&entry.id) {
                    return Err(StoreError::conflict(format!(
                        "entry {} already exists",
                        entry.id
                    )));
                }
                state.entries.insert(entry.id, entry);
            }
            EntryMutation::Update(entry) => {
                if !state.entries.contains_key(&entry.id) {
                    return Err(StoreError::not_found("LedgerEntry", entry.id));
                }
                state.entries.insert(entry.id, entry);
            }
            EntryMutation::Remove(entry_id) => {
                if state.entries.remove(&entry_id).is_none() {
                    return Err(StoreError::not_found("LedgerEntry", entry_id));
                }
            }
        }

        state.recalculate(bill_id, now)
    }

    async fn recalculate_bill(
        &self,
        bill_id: BillId,
        now: DateTime<Utc>,
    ) -> Result<Bill, StoreError> {
        let mut state = self.state.lock().await;
        state.recalculate(bill_id, now)
    }
}
