//! The Bill aggregate
//!
//! One bill per (tenancy, calendar month). A bill's totals are never
//! edited directly: they are recomputed from its entry set after every
//! entry mutation, so `total == Σ debit`, `paid == Σ credit`, and
//! `remaining == total − paid` hold as invariants. The only exception is
//! the freshly-created bill, whose seeded total (rent + carry-forward) is
//! superseded by the first recalculation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, BillingMonth, Currency, Money, MoneyError, TenancyId};
use domain_tenancy::Tenancy;

use crate::entry::LedgerEntry;

/// Payment status of a bill, derived deterministically from its totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    /// Nothing paid yet
    Pending,
    /// Partially paid with a balance outstanding
    Partial,
    /// Paid in full (or overpaid)
    Paid,
    /// Unpaid past the due date; a view-time status, never stored by
    /// recalculation
    Overdue,
}

/// The aggregated monthly statement for a tenancy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Owning tenancy
    pub tenancy_id: TenancyId,
    /// Billing period; unique per tenancy
    pub month: BillingMonth,
    /// Payment due date: the 5th of the following month
    pub due_date: NaiveDate,
    /// Currency, snapshotted from the tenancy
    pub currency: Currency,
    /// Monthly rent snapshot from the tenancy at creation
    pub rent_component: Money,
    /// Sum of electricity charges across entries
    pub electricity_component: Money,
    /// Sum of water charges across entries
    pub water_component: Money,
    /// Balance rolled in from the previous month; positive is debt,
    /// negative is credit
    pub carry_forward: Money,
    /// Total owed: Σ debit across entries
    pub total: Money,
    /// Total received: Σ credit across entries
    pub paid: Money,
    /// `total − paid`
    pub remaining: Money,
    /// Derived payment status
    pub status: BillStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last recalculation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Opens the bill for a tenancy's month with a resolved carry-forward
    ///
    /// The seeded total is `monthly_rent + carry_forward` with nothing
    /// paid. This is a seed, not a standing override: the first
    /// entry-driven recalculation replaces it entirely.
    pub fn open(
        tenancy: &Tenancy,
        month: BillingMonth,
        carry_forward: Money,
        now: DateTime<Utc>,
    ) -> Self {
        let zero = Money::zero(tenancy.currency);
        let total = tenancy.monthly_rent + carry_forward;
        Self {
            id: BillId::new_v7(),
            tenancy_id: tenancy.id,
            month,
            due_date: month.due_date(),
            currency: tenancy.currency,
            rent_component: tenancy.monthly_rent,
            electricity_component: zero,
            water_component: zero,
            carry_forward,
            total,
            paid: zero,
            remaining: total,
            status: BillStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recomputes totals, component snapshots, and status from the full
    /// entry set
    ///
    /// Idempotent, touches nothing outside this bill, and all-or-nothing:
    /// on error the bill is left exactly as it was.
    pub fn recalculate(
        &mut self,
        entries: &[LedgerEntry],
        now: DateTime<Utc>,
    ) -> Result<(), MoneyError> {
        let total = Money::sum_optional(
            entries.iter().map(|e| e.debit.as_ref()),
            self.currency,
        )?;
        let paid = Money::sum_optional(
            entries.iter().map(|e| e.credit.as_ref()),
            self.currency,
        )?;
        let electricity = Money::sum_optional(
            entries
                .iter()
                .map(|e| e.electricity.as_ref().map(|c| &c.total)),
            self.currency,
        )?;
        let water = Money::sum_optional(
            entries.iter().map(|e| e.water.as_ref()),
            self.currency,
        )?;
        let rent = Money::sum_optional(
            entries.iter().map(|e| e.rent.as_ref()),
            self.currency,
        )?;
        let remaining = total.checked_sub(&paid)?;

        self.total = total;
        self.paid = paid;
        self.remaining = remaining;
        self.electricity_component = electricity;
        self.water_component = water;
        self.rent_component = rent;
        self.status = Self::derive_status(paid, remaining);
        self.updated_at = now;
        Ok(())
    }

    /// Status derivation, evaluated in order:
    /// 1. nothing paid → `Pending`
    /// 2. balance outstanding → `Partial`
    /// 3. otherwise → `Paid`
    fn derive_status(paid: Money, remaining: Money) -> BillStatus {
        if paid.is_zero() {
            BillStatus::Pending
        } else if remaining.is_positive() {
            BillStatus::Partial
        } else {
            BillStatus::Paid
        }
    }

    /// Returns true if the bill is unpaid past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.due_date && self.status != BillStatus::Paid
    }

    /// Status as a caller should display it on a given day
    ///
    /// Overdue is a property of the calendar, not of the entry set, so it
    /// is derived here rather than stored by recalculation.
    pub fn display_status(&self, today: NaiveDate) -> BillStatus {
        if self.is_overdue(today) {
            BillStatus::Overdue
        } else {
            self.status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CreatorRole, EntryParts, PaymentMethod};
    use core_kernel::{LandlordId, PropertyId, TenantId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn tenancy() -> Tenancy {
        Tenancy::new(
            LandlordId::new(),
            TenantId::new(),
            PropertyId::new(),
            Money::new(dec!(15000), Currency::INR),
            Money::new(dec!(30000), Currency::INR),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    fn march() -> BillingMonth {
        BillingMonth::new(2026, 3).unwrap()
    }

    fn charge_entry(bill_id: BillId, rent: Decimal) -> LedgerEntry {
        let parts = EntryParts {
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: "rent".to_string(),
            electricity: None,
            water: None,
            rent: Some(Money::new(rent, Currency::INR)),
            credit: None,
            payment_method: None,
            payment_proof: None,
        };
        LedgerEntry::assemble(bill_id, Currency::INR, parts, CreatorRole::Landlord, Utc::now())
            .unwrap()
    }

    fn payment_entry(bill_id: BillId, amount: Decimal) -> LedgerEntry {
        let parts = EntryParts {
            entry_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            description: "payment".to_string(),
            electricity: None,
            water: None,
            rent: None,
            credit: Some(Money::new(amount, Currency::INR)),
            payment_method: Some(PaymentMethod::Upi),
            payment_proof: None,
        };
        LedgerEntry::assemble(bill_id, Currency::INR, parts, CreatorRole::Landlord, Utc::now())
            .unwrap()
    }

    #[test]
    fn test_open_seeds_rent_plus_carry_forward() {
        let carry = Money::new(dec!(150), Currency::INR);
        let bill = Bill::open(&tenancy(), march(), carry, Utc::now());

        assert_eq!(bill.total.amount(), dec!(15150));
        assert_eq!(bill.remaining.amount(), dec!(15150));
        assert!(bill.paid.is_zero());
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.due_date, NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
    }

    #[test]
    fn test_open_with_credit_carry_forward() {
        let carry = Money::new(dec!(-40), Currency::INR);
        let bill = Bill::open(&tenancy(), march(), carry, Utc::now());

        assert_eq!(bill.total.amount(), dec!(14960));
        assert_eq!(bill.carry_forward.amount(), dec!(-40));
    }

    #[test]
    fn test_recalculate_replaces_seed() {
        let mut bill = Bill::open(
            &tenancy(),
            march(),
            Money::new(dec!(150), Currency::INR),
            Utc::now(),
        );
        let entries = vec![charge_entry(bill.id, dec!(15000))];

        bill.recalculate(&entries, Utc::now()).unwrap();
        // Entry-driven totals supersede the seeded carry-forward total
        assert_eq!(bill.total.amount(), dec!(15000));
        assert_eq!(bill.remaining.amount(), dec!(15000));
    }

    #[test]
    fn test_status_derivation_order() {
        let mut bill = Bill::open(&tenancy(), march(), Money::zero(Currency::INR), Utc::now());
        let bill_id = bill.id;

        let entries = vec![charge_entry(bill_id, dec!(15000))];
        bill.recalculate(&entries, Utc::now()).unwrap();
        assert_eq!(bill.status, BillStatus::Pending);

        let entries = vec![
            charge_entry(bill_id, dec!(15000)),
            payment_entry(bill_id, dec!(5000)),
        ];
        bill.recalculate(&entries, Utc::now()).unwrap();
        assert_eq!(bill.status, BillStatus::Partial);
        assert_eq!(bill.remaining.amount(), dec!(10000));

        let entries = vec![
            charge_entry(bill_id, dec!(15000)),
            payment_entry(bill_id, dec!(5000)),
            payment_entry(bill_id, dec!(10000)),
        ];
        bill.recalculate(&entries, Utc::now()).unwrap();
        assert_eq!(bill.status, BillStatus::Paid);
        assert!(bill.remaining.is_zero());
    }

    #[test]
    fn test_overpayment_is_paid_with_negative_remaining() {
        let mut bill = Bill::open(&tenancy(), march(), Money::zero(Currency::INR), Utc::now());
        let entries = vec![
            charge_entry(bill.id, dec!(100)),
            payment_entry(bill.id, dec!(140)),
        ];
        bill.recalculate(&entries, Utc::now()).unwrap();

        assert_eq!(bill.status, BillStatus::Paid);
        assert_eq!(bill.remaining.amount(), dec!(-40));
    }

    #[test]
    fn test_empty_entry_set_zeroes_totals() {
        let mut bill = Bill::open(
            &tenancy(),
            march(),
            Money::new(dec!(150), Currency::INR),
            Utc::now(),
        );
        bill.recalculate(&[], Utc::now()).unwrap();

        assert!(bill.total.is_zero());
        assert!(bill.paid.is_zero());
        assert!(bill.remaining.is_zero());
        assert_eq!(bill.status, BillStatus::Pending);
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut bill = Bill::open(&tenancy(), march(), Money::zero(Currency::INR), Utc::now());
        let entries = vec![
            charge_entry(bill.id, dec!(15000)),
            payment_entry(bill.id, dec!(7000)),
        ];

        bill.recalculate(&entries, Utc::now()).unwrap();
        let first = bill.clone();
        bill.recalculate(&entries, Utc::now()).unwrap();

        assert_eq!(bill.total, first.total);
        assert_eq!(bill.paid, first.paid);
        assert_eq!(bill.remaining, first.remaining);
        assert_eq!(bill.status, first.status);
    }

    #[test]
    fn test_overdue_is_view_time_only() {
        let mut bill = Bill::open(&tenancy(), march(), Money::zero(Currency::INR), Utc::now());
        let entries = vec![charge_entry(bill.id, dec!(15000))];
        bill.recalculate(&entries, Utc::now()).unwrap();

        let before_due = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
        let after_due = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();

        assert_eq!(bill.display_status(before_due), BillStatus::Pending);
        assert_eq!(bill.display_status(after_due), BillStatus::Overdue);
        // The stored status is untouched
        assert_eq!(bill.status, BillStatus::Pending);
    }
}
