//! Money types with precise decimal arithmetic
//!
//! All monetary values in the ledger are represented with rust_decimal so
//! that repeated additions across a month of entries never accumulate
//! floating-point drift. Negative amounts are first-class: a tenant credit
//! carried into the next period is simply a negative `Money`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
///
/// The set covers the markets the rent platform operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
    GBP,
    AED,
    BDT,
    NPR,
    LKR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::AED => "د.إ",
            Currency::BDT => "৳",
            Currency::NPR => "रू",
            Currency::LKR => "Rs",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::AED => "AED",
            Currency::BDT => "BDT",
            Currency::NPR => "NPR",
            Currency::LKR => "LKR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount with associated currency
///
/// Amounts are kept at 2 decimal places of precision, the minor unit of
/// every currency the platform bills in. Sign is meaningful throughout:
/// a positive balance is debt owed by the tenant, a negative balance is a
/// credit owed to the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounding to the currency's minor unit
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(currency.decimal_places()),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (e.g. paise)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
            currency: self.currency,
        }
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar (e.g. a unit count)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Sums an iterator of optional amounts, treating `None` as zero
    ///
    /// This is the shape ledger aggregation takes: an entry's debit or
    /// credit side may be absent and must contribute nothing to the total.
    pub fn sum_optional<'a, I>(iter: I, currency: Currency) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = Option<&'a Money>>,
    {
        let mut total = Money::zero(currency);
        for item in iter {
            if let Some(amount) = item {
                total = total.checked_add(amount)?;
            }
        }
        Ok(total)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        if self.is_negative() {
            write!(
                f,
                "-{} {:.dp$}",
                self.currency.symbol(),
                self.amount.abs(),
                dp = dp as usize
            )
        } else {
            write!(
                f,
                "{} {:.dp$}",
                self.currency.symbol(),
                self.amount,
                dp = dp as usize
            )
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

/// A per-unit utility tariff (e.g. rupees per kWh)
///
/// Distinct from `Money` because a tariff is not itself an amount owed;
/// it only becomes one when multiplied by a consumed unit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRate {
    value: Decimal,
    currency: Currency,
}

impl UnitRate {
    /// Creates a tariff; negative rates are rejected
    pub fn new(value: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        if value.is_sign_negative() {
            return Err(MoneyError::InvalidAmount(format!(
                "Unit rate cannot be negative: {}",
                value
            )));
        }
        Ok(Self { value, currency })
    }

    /// Returns the per-unit value
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Charges for a consumed unit count at this tariff
    pub fn charge(&self, units: u64) -> Money {
        Money::new(self.value * Decimal::from(units), self.currency)
    }
}

impl fmt::Display for UnitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/unit", self.currency.symbol(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_rounds_to_minor_unit() {
        let m = Money::new(dec!(100.505), Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(10050, Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::INR);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_negative_money_display() {
        let credit = Money::new(dec!(-40.00), Currency::INR);
        assert!(credit.is_negative());
        assert_eq!(credit.to_string(), "-₹ 40.00");
    }

    #[test]
    fn test_currency_mismatch() {
        let inr = Money::new(dec!(100.00), Currency::INR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = inr.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_sum_optional_treats_none_as_zero() {
        let a = Money::new(dec!(120.00), Currency::INR);
        let b = Money::new(dec!(30.00), Currency::INR);
        let items = vec![Some(&a), None, Some(&b), None];

        let total = Money::sum_optional(items, Currency::INR).unwrap();
        assert_eq!(total.amount(), dec!(150.00));
    }

    #[test]
    fn test_unit_rate_charge() {
        let rate = UnitRate::new(dec!(8), Currency::INR).unwrap();
        assert_eq!(rate.charge(20).amount(), dec!(160));
    }

    #[test]
    fn test_unit_rate_rejects_negative() {
        let result = UnitRate::new(dec!(-1), Currency::INR);
        assert!(matches!(result, Err(MoneyError::InvalidAmount(_))));
    }
}
