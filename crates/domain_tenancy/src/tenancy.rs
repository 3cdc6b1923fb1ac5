//! The Tenancy aggregate
//!
//! A tenancy is a lease between one tenant and one property, owned by a
//! landlord. It carries the monetary terms the billing engine snapshots
//! into each monthly bill. Tenancies are ended softly and never deleted:
//! the financial history hanging off a tenancy must survive the lease.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, LandlordId, Money, PropertyId, TenancyId, TenantId};

use crate::error::TenancyError;

/// Lifecycle status of a tenancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenancyStatus {
    /// The lease is in force
    Active,
    /// The lease has ended; retained for financial history
    Ended,
}

/// A lease between one tenant and one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenancy {
    /// Unique identifier
    pub id: TenancyId,
    /// Landlord who owns the property and this tenancy's bills
    pub landlord_id: LandlordId,
    /// Tenant on the lease
    pub tenant_id: TenantId,
    /// Property being leased
    pub property_id: PropertyId,
    /// Monthly rent, snapshotted into each bill
    pub monthly_rent: Money,
    /// Security deposit held for the lease
    pub security_deposit: Money,
    /// First day of the lease
    pub lease_start: NaiveDate,
    /// Last day of the lease, if fixed
    pub lease_end: Option<NaiveDate>,
    /// Lifecycle status
    pub status: TenancyStatus,
    /// Currency all of this tenancy's bills are denominated in
    pub currency: Currency,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// When the tenancy was ended, if it has been
    pub ended_at: Option<DateTime<Utc>>,
}

impl Tenancy {
    /// Creates a new active tenancy
    ///
    /// # Errors
    ///
    /// Returns an error if rent or deposit is negative, if the currencies
    /// disagree, or if the lease ends before it starts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        landlord_id: LandlordId,
        tenant_id: TenantId,
        property_id: PropertyId,
        monthly_rent: Money,
        security_deposit: Money,
        lease_start: NaiveDate,
        lease_end: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Self, TenancyError> {
        if monthly_rent.is_negative() {
            return Err(TenancyError::InvalidTerm(format!(
                "monthly rent cannot be negative: {}",
                monthly_rent
            )));
        }
        if security_deposit.is_negative() {
            return Err(TenancyError::InvalidTerm(format!(
                "security deposit cannot be negative: {}",
                security_deposit
            )));
        }
        if monthly_rent.currency() != security_deposit.currency() {
            return Err(TenancyError::InvalidTerm(format!(
                "rent ({}) and deposit ({}) must share a currency",
                monthly_rent.currency(),
                security_deposit.currency()
            )));
        }
        if let Some(end) = lease_end {
            if end < lease_start {
                return Err(TenancyError::InvalidLeasePeriod(format!(
                    "lease ends {} before it starts {}",
                    end, lease_start
                )));
            }
        }

        Ok(Self {
            id: TenancyId::new_v7(),
            landlord_id,
            tenant_id,
            property_id,
            monthly_rent,
            security_deposit,
            lease_start,
            lease_end,
            status: TenancyStatus::Active,
            currency: monthly_rent.currency(),
            created_at: now,
            ended_at: None,
        })
    }

    /// Returns true if the lease is currently in force
    pub fn is_active(&self) -> bool {
        self.status == TenancyStatus::Active
    }

    /// Ends the tenancy softly
    ///
    /// Bills and ledger entries are never cascaded; they remain for audit.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenancy has already ended.
    pub fn end(&mut self, now: DateTime<Utc>) -> Result<(), TenancyError> {
        if self.status == TenancyStatus::Ended {
            return Err(TenancyError::AlreadyEnded(self.id.to_string()));
        }
        self.status = TenancyStatus::Ended;
        self.ended_at = Some(now);
        Ok(())
    }

    /// Returns true if the given landlord owns this tenancy
    pub fn owned_by(&self, landlord_id: LandlordId) -> bool {
        self.landlord_id == landlord_id
    }

    /// Returns true if the given tenant is on this lease
    pub fn leased_to(&self, tenant_id: TenantId) -> bool {
        self.tenant_id == tenant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rent() -> Money {
        Money::new(dec!(15000), Currency::INR)
    }

    fn deposit() -> Money {
        Money::new(dec!(30000), Currency::INR)
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn make_tenancy() -> Tenancy {
        Tenancy::new(
            LandlordId::new(),
            TenantId::new(),
            PropertyId::new(),
            rent(),
            deposit(),
            start(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_tenancy_is_active() {
        let tenancy = make_tenancy();
        assert!(tenancy.is_active());
        assert_eq!(tenancy.currency, Currency::INR);
        assert!(tenancy.ended_at.is_none());
    }

    #[test]
    fn test_negative_rent_rejected() {
        let result = Tenancy::new(
            LandlordId::new(),
            TenantId::new(),
            PropertyId::new(),
            Money::new(dec!(-1), Currency::INR),
            deposit(),
            start(),
            None,
            Utc::now(),
        );
        assert!(matches!(result, Err(TenancyError::InvalidTerm(_))));
    }

    #[test]
    fn test_lease_end_before_start_rejected() {
        let result = Tenancy::new(
            LandlordId::new(),
            TenantId::new(),
            PropertyId::new(),
            rent(),
            deposit(),
            start(),
            Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
            Utc::now(),
        );
        assert!(matches!(result, Err(TenancyError::InvalidLeasePeriod(_))));
    }

    #[test]
    fn test_mismatched_currencies_rejected() {
        let result = Tenancy::new(
            LandlordId::new(),
            TenantId::new(),
            PropertyId::new(),
            rent(),
            Money::new(dec!(500), Currency::USD),
            start(),
            None,
            Utc::now(),
        );
        assert!(matches!(result, Err(TenancyError::InvalidTerm(_))));
    }

    #[test]
    fn test_end_is_soft_and_one_way() {
        let mut tenancy = make_tenancy();
        tenancy.end(Utc::now()).unwrap();
        assert_eq!(tenancy.status, TenancyStatus::Ended);
        assert!(tenancy.ended_at.is_some());

        let again = tenancy.end(Utc::now());
        assert!(matches!(again, Err(TenancyError::AlreadyEnded(_))));
    }

    #[test]
    fn test_ownership_checks() {
        let tenancy = make_tenancy();
        assert!(tenancy.owned_by(tenancy.landlord_id));
        assert!(!tenancy.owned_by(LandlordId::new()));
        assert!(tenancy.leased_to(tenancy.tenant_id));
        assert!(!tenancy.leased_to(TenantId::new()));
    }
}
