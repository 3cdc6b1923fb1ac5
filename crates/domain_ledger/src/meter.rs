//! Electricity meter-reading derivation
//!
//! Successive meter readings inside one bill become consumed units and a
//! charge. The previous reading is the `current_reading` of the latest
//! prior electricity entry in the same bill, with entry creation order
//! (v7 id order) as the tie-break when entries share a date, and 0 when
//! the bill has no earlier reading.
//!
//! A reading lower than its predecessor is treated as zero consumption
//! rather than a negative charge.

use rust_decimal::Decimal;

use core_kernel::{Currency, LedgerEntryId, UnitRate};

use crate::entry::{ElectricityCharge, LedgerEntry};
use crate::error::LedgerError;

/// Finds the previous meter reading within a bill's entries
///
/// Scans for the latest entry (by creation order) carrying an electricity
/// charge, skipping `exclude` — the entry currently being edited must not
/// see its own reading as its predecessor. Returns 0 when no prior
/// reading exists.
pub fn previous_reading(entries: &[LedgerEntry], exclude: Option<LedgerEntryId>) -> u64 {
    entries
        .iter()
        .filter(|entry| Some(entry.id) != exclude)
        .filter(|entry| entry.electricity.is_some())
        .max_by_key(|entry| entry.id)
        .and_then(|entry| entry.electricity.as_ref())
        .map(|charge| charge.current_reading)
        .unwrap_or(0)
}

/// Derives the electricity charge for a candidate reading
///
/// All-or-nothing: when either the reading or the tariff is absent, no
/// electricity fields are derived at all. Consumption is
/// `current - previous` clamped at zero.
///
/// # Errors
///
/// `InvalidInput` if the tariff is negative.
pub fn derive_charge(
    current_reading: Option<u64>,
    rate: Option<Decimal>,
    currency: Currency,
    entries: &[LedgerEntry],
    exclude: Option<LedgerEntryId>,
) -> Result<Option<ElectricityCharge>, LedgerError> {
    let (current, rate) = match (current_reading, rate) {
        (Some(current), Some(rate)) => (current, rate),
        _ => return Ok(None),
    };

    let rate = UnitRate::new(rate, currency)
        .map_err(|e| LedgerError::invalid_input(e.to_string()))?;

    let previous = previous_reading(entries, exclude);
    let units_consumed = current.saturating_sub(previous);
    let total = rate.charge(units_consumed);

    Ok(Some(ElectricityCharge {
        previous_reading: previous,
        current_reading: current,
        units_consumed,
        rate,
        total,
    }))
}
