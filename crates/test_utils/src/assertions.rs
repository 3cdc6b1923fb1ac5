//! Custom test assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_ledger::{Bill, LedgerEntry};
use rust_decimal::Decimal;

/// Asserts that a bill's stored aggregates agree with its entry set
///
/// Checks the three ledger identities: `total == Σ debit`,
/// `paid == Σ credit`, and `remaining == total − paid`.
///
/// # Panics
///
/// Panics with a descriptive message when any identity is violated.
pub fn assert_bill_consistent(bill: &Bill, entries: &[LedgerEntry]) {
    let debit_sum: Decimal = entries
        .iter()
        .filter_map(|e| e.debit.as_ref())
        .map(|m| m.amount())
        .sum();
    let credit_sum: Decimal = entries
        .iter()
        .filter_map(|e| e.credit.as_ref())
        .map(|m| m.amount())
        .sum();

    assert_eq!(
        bill.total.amount(),
        debit_sum,
        "bill {} total {} disagrees with entry debit sum {}",
        bill.id,
        bill.total.amount(),
        debit_sum
    );
    assert_eq!(
        bill.paid.amount(),
        credit_sum,
        "bill {} paid {} disagrees with entry credit sum {}",
        bill.id,
        bill.paid.amount(),
        credit_sum
    );
    assert_eq!(
        bill.remaining.amount(),
        bill.total.amount() - bill.paid.amount(),
        "bill {} remaining {} is not total - paid",
        bill.id,
        bill.remaining.amount()
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that two Money values match exactly
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Money amounts differ: actual={}, expected={}",
        actual.amount(),
        expected.amount()
    );
}
