//! Pre-built test fixtures
//!
//! Ready-to-use test data for common entities across the rent ledger.
//! These fixtures are designed to be consistent and predictable for unit
//! tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{BillingMonth, Currency, Money};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical monthly rent
    pub fn rent() -> Money {
        Money::new(dec!(15000.00), Currency::INR)
    }

    /// A typical security deposit (two months' rent)
    pub fn deposit() -> Money {
        Money::new(dec!(30000.00), Currency::INR)
    }

    /// A typical water charge
    pub fn water() -> Money {
        Money::new(dec!(300.00), Currency::INR)
    }

    /// A zero amount in the default currency
    pub fn zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// A negative amount for overpayment/credit scenarios
    pub fn credit_40() -> Money {
        Money::new(dec!(-40.00), Currency::INR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard lease start date (Jan 1, 2026)
    pub fn lease_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    /// The billing month most tests operate in (March 2026)
    pub fn current_month() -> BillingMonth {
        BillingMonth::new(2026, 3).unwrap()
    }

    /// An instant inside the current billing month
    pub fn mid_month() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    /// An entry date inside the current billing month
    pub fn entry_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    /// An instant in the following billing month
    pub fn next_month() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap()
    }
}
