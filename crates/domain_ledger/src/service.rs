//! Ledger orchestration service
//!
//! `LedgerService` ties entry mutation to bill aggregation: every
//! create/update/delete resolves the target bill, enforces ownership and
//! the entry state machine, derives the metered fields, and hands the
//! store an atomic mutate-and-recalculate. The service never reads a wall
//! clock; callers pass the instant each operation happens.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use core_kernel::{BillId, BillingMonth, LandlordId, LedgerEntryId, Money, TenancyId, TenantId};
use domain_tenancy::Tenancy;

use crate::bill::Bill;
use crate::entry::{CreatorRole, EntryDraft, EntryParts, LedgerEntry};
use crate::error::LedgerError;
use crate::meter;
use crate::ports::{EntryMutation, LedgerStore};

/// The authenticated caller of a ledger operation
///
/// Identity is established outside this subsystem; the engine only
/// enforces ownership scope against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Landlord(LandlordId),
    Tenant(TenantId),
}

/// Orchestrates entry mutations, verification, and bill resolution over a
/// persistence adapter
#[derive(Debug)]
pub struct LedgerService<S> {
    store: S,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over a store adapter
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a new ledger entry against a tenancy's active bill
    ///
    /// The bill for `now`'s month is created as a byproduct if it does
    /// not exist yet. A landlord may record any entry; a tenant may only
    /// report a payment (credit-only draft).
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown tenancy, `Forbidden` when the actor is
    /// outside the tenancy's scope, `InvalidInput` for a bad draft.
    #[instrument(skip(self, draft), fields(tenancy = %tenancy_id))]
    pub async fn add_entry(
        &self,
        actor: Actor,
        tenancy_id: TenancyId,
        draft: EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<LedgerEntry, LedgerError> {
        let tenancy = self.require_tenancy(tenancy_id).await?;
        let created_by = self.authorize_entry_creation(&tenancy, actor, &draft)?;
        draft.validate()?;

        let bill = self.resolve_active_bill(tenancy_id, now).await?;
        let entries = self.store.entries_for_bill(bill.id).await?;
        let parts = self.resolve_parts(&tenancy, &bill, draft, &entries, None)?;
        let entry = LedgerEntry::assemble(bill.id, tenancy.currency, parts, created_by, now)?;

        let bill = self
            .store
            .apply_entry_mutation(bill.id, EntryMutation::Insert(entry.clone()), now)
            .await?;
        debug!(entry = %entry.id, bill = %bill.id, "entry recorded");
        Ok(entry)
    }

    /// Updates an entry while it is still mutable
    ///
    /// Derived fields are recomputed exactly as on creation, with the
    /// entry itself excluded from the previous-reading scan. The entry is
    /// marked edited; edits overwrite in place and are not versioned.
    ///
    /// # Errors
    ///
    /// In order of evaluation: `NotFound`, `Forbidden` (landlord scope),
    /// `Locked` (tenant verified), `WindowExpired` (older than 24h),
    /// `InvalidInput`.
    #[instrument(skip(self, draft), fields(entry = %entry_id))]
    pub async fn update_entry(
        &self,
        actor: Actor,
        entry_id: LedgerEntryId,
        draft: EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<LedgerEntry, LedgerError> {
        let (mut entry, bill, tenancy) = self.require_entry_scope(entry_id).await?;
        self.authorize_landlord(&tenancy, actor)?;
        entry.ensure_mutable(now)?;
        draft.validate()?;

        let entries = self.store.entries_for_bill(bill.id).await?;
        let parts = self.resolve_parts(&tenancy, &bill, draft, &entries, Some(entry.id))?;
        entry.apply_edit(tenancy.currency, parts, now)?;

        self.store
            .apply_entry_mutation(bill.id, EntryMutation::Update(entry.clone()), now)
            .await?;
        Ok(entry)
    }

    /// Deletes an entry while it is still mutable
    ///
    /// # Errors
    ///
    /// Same guard chain as [`update_entry`](Self::update_entry).
    #[instrument(skip(self), fields(entry = %entry_id))]
    pub async fn delete_entry(
        &self,
        actor: Actor,
        entry_id: LedgerEntryId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let (entry, bill, tenancy) = self.require_entry_scope(entry_id).await?;
        self.authorize_landlord(&tenancy, actor)?;
        entry.ensure_mutable(now)?;

        self.store
            .apply_entry_mutation(bill.id, EntryMutation::Remove(entry.id), now)
            .await?;
        Ok(())
    }

    /// Records the tenant's one-way verification of an entry
    ///
    /// Verification changes no amounts, so the bill is not recalculated.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden` (the tenancy does not belong to this
    /// tenant), `AlreadyVerified`.
    #[instrument(skip(self), fields(entry = %entry_id))]
    pub async fn verify_entry(
        &self,
        tenant_id: TenantId,
        entry_id: LedgerEntryId,
        now: DateTime<Utc>,
    ) -> Result<LedgerEntry, LedgerError> {
        let (mut entry, _bill, tenancy) = self.require_entry_scope(entry_id).await?;
        if !tenancy.leased_to(tenant_id) {
            return Err(LedgerError::forbidden(format!(
                "tenancy {} is not leased to tenant {}",
                tenancy.id, tenant_id
            )));
        }
        entry.verify(now)?;
        self.store.update_entry(&entry).await?;
        Ok(entry)
    }

    /// Finds or creates the bill for the month containing `as_of`
    ///
    /// Creation seeds the carry-forward from the previous month's
    /// remaining balance and is safe under concurrent invocation: a
    /// uniqueness conflict from the store means another caller created
    /// the bill first, and the winner's row is fetched and returned.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown tenancy.
    #[instrument(skip(self), fields(tenancy = %tenancy_id))]
    pub async fn resolve_active_bill(
        &self,
        tenancy_id: TenancyId,
        as_of: DateTime<Utc>,
    ) -> Result<Bill, LedgerError> {
        let tenancy = self.require_tenancy(tenancy_id).await?;
        let month = BillingMonth::containing(as_of.date_naive());

        if let Some(bill) = self.store.bill_for_month(tenancy_id, month).await? {
            return Ok(bill);
        }

        let carry_forward = self.carry_forward(&tenancy, month).await?;
        let bill = Bill::open(&tenancy, month, carry_forward, as_of);
        match self.store.insert_bill(bill).await {
            Ok(bill) => {
                debug!(bill = %bill.id, %month, "bill auto-created");
                Ok(bill)
            }
            Err(e) if e.is_conflict() => {
                // Lost the race: another caller created the bill
                self.store
                    .bill_for_month(tenancy_id, month)
                    .await?
                    .ok_or_else(|| {
                        LedgerError::not_found("Bill", format!("{}/{}", tenancy_id, month))
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Recalculates a bill's aggregates from its current entry set
    ///
    /// Idempotent; exposed for callers that need to re-derive after
    /// out-of-band changes.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown bill.
    #[instrument(skip(self), fields(bill = %bill_id))]
    pub async fn recalculate(
        &self,
        bill_id: BillId,
        now: DateTime<Utc>,
    ) -> Result<Bill, LedgerError> {
        if self.store.bill(bill_id).await?.is_none() {
            return Err(LedgerError::not_found("Bill", bill_id));
        }
        Ok(self.store.recalculate_bill(bill_id, now).await?)
    }

    /// Resolves the carry-forward for a new bill: the previous month's
    /// remaining balance, or zero when no previous bill exists
    async fn carry_forward(
        &self,
        tenancy: &Tenancy,
        month: BillingMonth,
    ) -> Result<Money, LedgerError> {
        let prior = self
            .store
            .bill_for_month(tenancy.id, month.previous())
            .await?;
        Ok(prior
            .map(|bill| bill.remaining)
            .unwrap_or_else(|| Money::zero(tenancy.currency)))
    }

    /// Resolves a draft's bare decimals against the tenancy currency and
    /// derives the electricity charge
    fn resolve_parts(
        &self,
        tenancy: &Tenancy,
        bill: &Bill,
        draft: EntryDraft,
        entries: &[LedgerEntry],
        exclude: Option<LedgerEntryId>,
    ) -> Result<EntryParts, LedgerError> {
        let electricity = meter::derive_charge(
            draft.current_reading,
            draft.electricity_rate,
            bill.currency,
            entries,
            exclude,
        )?;

        Ok(EntryParts {
            entry_date: draft.entry_date,
            description: draft.description,
            electricity,
            water: draft.water.map(|v| Money::new(v, tenancy.currency)),
            rent: draft.rent.map(|v| Money::new(v, tenancy.currency)),
            credit: draft
                .payment_received
                .map(|v| Money::new(v, tenancy.currency)),
            payment_method: draft.payment_method,
            payment_proof: draft.payment_proof,
        })
    }

    async fn require_tenancy(&self, tenancy_id: TenancyId) -> Result<Tenancy, LedgerError> {
        self.store
            .tenancy(tenancy_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Tenancy", tenancy_id))
    }

    /// Loads an entry together with its bill and tenancy
    async fn require_entry_scope(
        &self,
        entry_id: LedgerEntryId,
    ) -> Result<(LedgerEntry, Bill, Tenancy), LedgerError> {
        let entry = self
            .store
            .entry(entry_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("LedgerEntry", entry_id))?;
        let bill = self
            .store
            .bill(entry.bill_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Bill", entry.bill_id))?;
        let tenancy = self.require_tenancy(bill.tenancy_id).await?;
        Ok((entry, bill, tenancy))
    }

    /// A landlord may record any entry; a tenant only a reported payment
    fn authorize_entry_creation(
        &self,
        tenancy: &Tenancy,
        actor: Actor,
        draft: &EntryDraft,
    ) -> Result<CreatorRole, LedgerError> {
        match actor {
            Actor::Landlord(landlord_id) => {
                if !tenancy.owned_by(landlord_id) {
                    return Err(LedgerError::forbidden(format!(
                        "tenancy {} is not owned by landlord {}",
                        tenancy.id, landlord_id
                    )));
                }
                Ok(CreatorRole::Landlord)
            }
            Actor::Tenant(tenant_id) => {
                if !tenancy.leased_to(tenant_id) {
                    return Err(LedgerError::forbidden(format!(
                        "tenancy {} is not leased to tenant {}",
                        tenancy.id, tenant_id
                    )));
                }
                if draft.has_charge() {
                    return Err(LedgerError::forbidden(
                        "tenants may only report payments, not charges",
                    ));
                }
                Ok(CreatorRole::Tenant)
            }
        }
    }

    fn authorize_landlord(&self, tenancy: &Tenancy, actor: Actor) -> Result<(), LedgerError> {
        match actor {
            Actor::Landlord(landlord_id) if tenancy.owned_by(landlord_id) => Ok(()),
            Actor::Landlord(landlord_id) => Err(LedgerError::forbidden(format!(
                "tenancy {} is not owned by landlord {}",
                tenancy.id, landlord_id
            ))),
            Actor::Tenant(_) => Err(LedgerError::forbidden(
                "only the landlord may modify ledger entries",
            )),
        }
    }
}
