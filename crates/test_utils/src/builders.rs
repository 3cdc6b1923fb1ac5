//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about and take defaults for
//! everything else.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{LandlordId, Money, PropertyId, TenantId};
use domain_tenancy::Tenancy;

use crate::fixtures::{MoneyFixtures, TemporalFixtures};

/// Builder for constructing test tenancies
pub struct TenancyBuilder {
    landlord_id: LandlordId,
    tenant_id: TenantId,
    property_id: PropertyId,
    monthly_rent: Money,
    security_deposit: Money,
    lease_start: NaiveDate,
    lease_end: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl Default for TenancyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TenancyBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            landlord_id: LandlordId::new(),
            tenant_id: TenantId::new(),
            property_id: PropertyId::new(),
            monthly_rent: MoneyFixtures::rent(),
            security_deposit: MoneyFixtures::deposit(),
            lease_start: TemporalFixtures::lease_start(),
            lease_end: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the landlord
    pub fn with_landlord(mut self, id: LandlordId) -> Self {
        self.landlord_id = id;
        self
    }

    /// Sets the tenant
    pub fn with_tenant(mut self, id: TenantId) -> Self {
        self.tenant_id = id;
        self
    }

    /// Sets the property
    pub fn with_property(mut self, id: PropertyId) -> Self {
        self.property_id = id;
        self
    }

    /// Sets the monthly rent
    pub fn with_rent(mut self, rent: Money) -> Self {
        self.monthly_rent = rent;
        self
    }

    /// Sets the security deposit
    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.security_deposit = deposit;
        self
    }

    /// Sets a fixed lease end date
    pub fn with_lease_end(mut self, end: NaiveDate) -> Self {
        self.lease_end = Some(end);
        self
    }

    /// Builds the tenancy
    ///
    /// # Panics
    ///
    /// Panics if the configured terms are invalid; builders are for
    /// tests, where that is a bug in the test.
    pub fn build(self) -> Tenancy {
        Tenancy::new(
            self.landlord_id,
            self.tenant_id,
            self.property_id,
            self.monthly_rent,
            self.security_deposit,
            self.lease_start,
            self.lease_end,
            self.created_at,
        )
        .expect("TenancyBuilder produced invalid terms")
    }
}
