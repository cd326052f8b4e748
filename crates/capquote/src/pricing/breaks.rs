//! Quantity-break resolution and rate-table lookups.
//!
//! Lookups never fail: a missing option or a missing break is reported as a
//! [`RateLookup`] variant so each calculator can apply its own policy
//! (domestic prices it at zero, overseas treats it as an unmet MOQ).

use std::collections::BTreeMap;

/// Unit prices for a single rate-table category keyed by quantity break.
pub type BreakPrices = BTreeMap<u32, f64>;

/// Category name (style, decoration method, add-on, ...) to break prices.
pub type RateTable = BTreeMap<String, BreakPrices>;

/// Outcome of looking up one option in a rate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateLookup {
    Priced(f64),
    /// The option is listed but has no price at the requested break.
    NotOffered,
    /// The option name is not present in the table at all.
    Unknown,
}

impl RateLookup {
    pub fn price(self) -> Option<f64> {
        match self {
            Self::Priced(price) => Some(price),
            Self::NotOffered | Self::Unknown => None,
        }
    }

    pub fn or_zero(self) -> f64 {
        self.price().unwrap_or(0.0)
    }
}

/// Returns the largest break that does not exceed `quantity`.
///
/// Quantities under the smallest break clamp up to it. An empty break list
/// resolves to the quantity itself.
pub fn resolve_break(quantity: u32, breaks: &[u32]) -> u32 {
    breaks
        .iter()
        .copied()
        .take_while(|quantity_break| *quantity_break <= quantity)
        .last()
        .or_else(|| breaks.first().copied())
        .unwrap_or(quantity)
}

/// Exact-break lookup with no resolution.
pub fn lookup_at(table: &RateTable, key: &str, quantity_break: u32) -> RateLookup {
    match table.get(key) {
        Some(prices) => prices
            .get(&quantity_break)
            .copied()
            .map_or(RateLookup::NotOffered, RateLookup::Priced),
        None => RateLookup::Unknown,
    }
}

/// Looks up `table[key]` at the break resolved for `quantity`.
pub fn price_at(table: &RateTable, key: &str, quantity: u32, breaks: &[u32]) -> RateLookup {
    lookup_at(table, key, resolve_break(quantity, breaks))
}

/// Lookup for fees that do not vary by quantity.
pub fn flat_fee(fees: &BTreeMap<String, f64>, key: &str) -> RateLookup {
    fees.get(key)
        .copied()
        .map_or(RateLookup::Unknown, RateLookup::Priced)
}
