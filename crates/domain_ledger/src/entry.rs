//! The LedgerEntry aggregate
//!
//! A ledger entry is one dated transaction line inside a bill: some
//! combination of charges (rent, water, metered electricity) on the debit
//! side and a received payment on the credit side. Entries move through a
//! one-way state machine:
//!
//! ```text
//! created (editable) → [edited]* → locked
//! ```
//!
//! The lock is reached by whichever comes first of the 24-hour edit
//! window elapsing or the tenant verifying the entry. There is no path
//! back to editable.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, Currency, LedgerEntryId, Money, UnitRate};

use crate::error::LedgerError;

/// Hours after creation during which an unverified entry may still be
/// updated or deleted
pub const EDIT_WINDOW_HOURS: i64 = 24;

/// Who recorded an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatorRole {
    /// The landlord recorded a charge or a received payment
    Landlord,
    /// The tenant reported a payment
    Tenant,
}

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Upi,
    Card,
    Cheque,
    Other,
}

/// A metered electricity charge with its derivation inputs
///
/// The three derived fields (`previous_reading`, `units_consumed`,
/// `total`) always appear together with their inputs; partial electricity
/// data is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectricityCharge {
    /// The most recent prior reading in the same bill (0 if none)
    pub previous_reading: u64,
    /// The reading submitted with this entry
    pub current_reading: u64,
    /// `current - previous`, clamped at zero
    pub units_consumed: u64,
    /// Tariff applied per unit
    pub rate: UnitRate,
    /// `units_consumed × rate`
    pub total: Money,
}

/// One dated transaction line within a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier; v7, so id order is creation order
    pub id: LedgerEntryId,
    /// Owning bill
    pub bill_id: BillId,
    /// Date the transaction applies to
    pub entry_date: NaiveDate,
    /// Free-text description
    pub description: String,
    /// Metered electricity charge, if any
    pub electricity: Option<ElectricityCharge>,
    /// Water charge, if any
    pub water: Option<Money>,
    /// Rent charge, if any
    pub rent: Option<Money>,
    /// Sum of all charge fields; None when the entry carries no charge
    pub debit: Option<Money>,
    /// Payment received, if any
    pub credit: Option<Money>,
    /// How the payment was made
    pub payment_method: Option<PaymentMethod>,
    /// Opaque reference to uploaded payment proof; never resolved here
    pub payment_proof: Option<String>,
    /// Tenant's one-way confirmation
    pub verified_by_tenant: bool,
    /// When the tenant verified
    pub verified_at: Option<DateTime<Utc>>,
    /// Whether the entry was edited after creation
    pub is_edited: bool,
    /// When it was last edited
    pub edited_at: Option<DateTime<Utc>>,
    /// Who recorded the entry
    pub created_by: CreatorRole,
    /// Creation timestamp; anchors the edit window
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Assembles an entry from validated parts
    ///
    /// `debit` is derived here: the sum of whichever charge fields are
    /// present, or `None` when the entry carries no charge at all.
    pub(crate) fn assemble(
        bill_id: BillId,
        currency: Currency,
        draft: EntryParts,
        created_by: CreatorRole,
        now: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let debit = Self::derive_debit(
            draft.electricity.as_ref(),
            draft.water.as_ref(),
            draft.rent.as_ref(),
            currency,
        )?;

        Ok(Self {
            id: LedgerEntryId::new_v7(),
            bill_id,
            entry_date: draft.entry_date,
            description: draft.description,
            electricity: draft.electricity,
            water: draft.water,
            rent: draft.rent,
            debit,
            credit: draft.credit,
            payment_method: draft.payment_method,
            payment_proof: draft.payment_proof,
            verified_by_tenant: false,
            verified_at: None,
            is_edited: false,
            edited_at: None,
            created_by,
            created_at: now,
        })
    }

    /// Overwrites the mutable fields in place from validated parts,
    /// marking the entry edited
    ///
    /// Identity, creation metadata, and verification state are untouched;
    /// edits are tracked only by `is_edited`/`edited_at`, never versioned.
    pub(crate) fn apply_edit(
        &mut self,
        currency: Currency,
        draft: EntryParts,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let debit = Self::derive_debit(
            draft.electricity.as_ref(),
            draft.water.as_ref(),
            draft.rent.as_ref(),
            currency,
        )?;

        self.entry_date = draft.entry_date;
        self.description = draft.description;
        self.electricity = draft.electricity;
        self.water = draft.water;
        self.rent = draft.rent;
        self.debit = debit;
        self.credit = draft.credit;
        self.payment_method = draft.payment_method;
        self.payment_proof = draft.payment_proof;
        self.is_edited = true;
        self.edited_at = Some(now);
        Ok(())
    }

    fn derive_debit(
        electricity: Option<&ElectricityCharge>,
        water: Option<&Money>,
        rent: Option<&Money>,
        currency: Currency,
    ) -> Result<Option<Money>, LedgerError> {
        if electricity.is_none() && water.is_none() && rent.is_none() {
            return Ok(None);
        }
        let total = Money::sum_optional(
            [electricity.map(|e| &e.total), water, rent],
            currency,
        )?;
        Ok(Some(total))
    }

    /// Returns true once the tenant has verified the entry
    pub fn is_verified(&self) -> bool {
        self.verified_by_tenant
    }

    /// Returns true while the entry is inside its 24-hour edit window
    pub fn within_edit_window(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at <= Duration::hours(EDIT_WINDOW_HOURS)
    }

    /// Checks that the entry may still be updated or deleted
    ///
    /// # Errors
    ///
    /// `Locked` if the tenant has verified the entry; otherwise
    /// `WindowExpired` if the edit window has elapsed. Verification is
    /// checked first: a verified entry reports `Locked` even when the
    /// window has also expired.
    pub fn ensure_mutable(&self, now: DateTime<Utc>) -> Result<(), LedgerError> {
        if self.verified_by_tenant {
            return Err(LedgerError::Locked(self.id.to_string()));
        }
        if !self.within_edit_window(now) {
            return Err(LedgerError::WindowExpired(self.id.to_string()));
        }
        Ok(())
    }

    /// Records the tenant's one-way verification
    ///
    /// # Errors
    ///
    /// `AlreadyVerified` if the flag is already set.
    pub fn verify(&mut self, now: DateTime<Utc>) -> Result<(), LedgerError> {
        if self.verified_by_tenant {
            return Err(LedgerError::AlreadyVerified(self.id.to_string()));
        }
        self.verified_by_tenant = true;
        self.verified_at = Some(now);
        Ok(())
    }
}

/// Validated, currency-resolved parts of an entry, produced from an
/// `EntryDraft` by the service before assembly
#[derive(Debug, Clone)]
pub(crate) struct EntryParts {
    pub entry_date: NaiveDate,
    pub description: String,
    pub electricity: Option<ElectricityCharge>,
    pub water: Option<Money>,
    pub rent: Option<Money>,
    pub credit: Option<Money>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_proof: Option<String>,
}

/// Caller-supplied fields for creating or updating an entry
///
/// Amounts arrive as bare decimals, the shape of a submitted form; the
/// service resolves them against the tenancy's currency and derives the
/// electricity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Date the transaction applies to
    pub entry_date: NaiveDate,
    /// Free-text description; required
    pub description: String,
    /// Candidate electricity meter reading
    pub current_reading: Option<u64>,
    /// Electricity tariff per unit
    pub electricity_rate: Option<Decimal>,
    /// Water charge
    pub water: Option<Decimal>,
    /// Rent charge
    pub rent: Option<Decimal>,
    /// Payment received
    pub payment_received: Option<Decimal>,
    /// How the payment was made
    pub payment_method: Option<PaymentMethod>,
    /// Opaque reference to payment proof
    pub payment_proof: Option<String>,
}

impl EntryDraft {
    /// Creates a draft with only the required fields set
    pub fn new(entry_date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            entry_date,
            description: description.into(),
            current_reading: None,
            electricity_rate: None,
            water: None,
            rent: None,
            payment_received: None,
            payment_method: None,
            payment_proof: None,
        }
    }

    /// Sets the rent charge
    pub fn with_rent(mut self, rent: Decimal) -> Self {
        self.rent = Some(rent);
        self
    }

    /// Sets the water charge
    pub fn with_water(mut self, water: Decimal) -> Self {
        self.water = Some(water);
        self
    }

    /// Sets the electricity meter reading and tariff
    pub fn with_meter_reading(mut self, current_reading: u64, rate: Decimal) -> Self {
        self.current_reading = Some(current_reading);
        self.electricity_rate = Some(rate);
        self
    }

    /// Sets the payment received
    pub fn with_payment(mut self, amount: Decimal, method: PaymentMethod) -> Self {
        self.payment_received = Some(amount);
        self.payment_method = Some(method);
        self
    }

    /// Attaches a payment proof reference
    pub fn with_payment_proof(mut self, proof: impl Into<String>) -> Self {
        self.payment_proof = Some(proof.into());
        self
    }

    /// Returns true if any charge field is present
    pub fn has_charge(&self) -> bool {
        self.current_reading.is_some()
            || self.water.is_some()
            || self.rent.is_some()
    }

    /// Validates the caller-supplied fields
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty description, a negative amount or
    /// tariff, a meter reading without a tariff (or vice versa), or a
    /// draft carrying neither a charge nor a payment.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::invalid_input("description is required"));
        }
        if self.current_reading.is_some() != self.electricity_rate.is_some() {
            return Err(LedgerError::invalid_input(
                "electricity reading and rate must be supplied together",
            ));
        }
        if let Some(rate) = self.electricity_rate {
            if rate.is_sign_negative() {
                return Err(LedgerError::invalid_input("electricity rate cannot be negative"));
            }
        }
        for (name, value) in [
            ("water", self.water),
            ("rent", self.rent),
            ("payment", self.payment_received),
        ] {
            if let Some(v) = value {
                if v.is_sign_negative() {
                    return Err(LedgerError::invalid_input(format!(
                        "{} amount cannot be negative",
                        name
                    )));
                }
            }
        }
        if !self.has_charge() && self.payment_received.is_none() {
            return Err(LedgerError::invalid_input(
                "entry must carry a charge or a payment",
            ));
        }
        Ok(())
    }
}
