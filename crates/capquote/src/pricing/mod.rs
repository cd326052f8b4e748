//! Quote pricing: rate card data, the quantity-break resolver, and the
//! domestic and overseas calculators.

pub mod breaks;
mod domain;
mod domestic;
pub mod money;
mod options;
mod overseas;
pub mod rates;
mod summary;

pub use breaks::{price_at, resolve_break, BreakPrices, RateLookup, RateTable};
pub use domain::{
    selection, DomesticPriceBreak, DomesticQuote, DomesticQuoteRequest, OverseasPriceBreak,
    OverseasQuote, OverseasQuoteRequest, Quote, QuoteError, QuoteType, DEFAULT_SHIPPING_METHOD,
    DEFAULT_SHIPPING_SPEED,
};
pub use domestic::calculate_domestic;
pub use options::{DomesticOptions, OverseasOptions, QuoteOptions, StyleOption};
pub use overseas::calculate_overseas;
pub use rates::{
    DomesticRates, HatTypeRates, OverseasRates, RateCard, RateCardError, StyleInfo,
    DOMESTIC_MINIMUM_QUANTITY, OVERSEAS_MINIMUM_QUANTITY,
};
pub use summary::{CachedQuote, QuoteSummary};

use std::sync::Arc;
use tracing::debug;

/// Stateless calculator over a shared, read-only rate card.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    rates: Arc<RateCard>,
}

impl QuoteEngine {
    pub fn new(rates: Arc<RateCard>) -> Self {
        Self { rates }
    }

    pub fn rate_card(&self) -> &RateCard {
        &self.rates
    }

    pub fn domestic(&self, request: &DomesticQuoteRequest) -> Result<DomesticQuote, QuoteError> {
        let quote = calculate_domestic(&self.rates.domestic, request)?;
        debug!(
            style = %quote.style_number,
            quantity = quote.quantity,
            rows = quote.price_breaks.len(),
            "domestic quote calculated"
        );
        Ok(quote)
    }

    pub fn overseas(&self, request: &OverseasQuoteRequest) -> Result<OverseasQuote, QuoteError> {
        let quote = calculate_overseas(&self.rates.overseas, request)?;
        debug!(
            hat_type = %quote.hat_type,
            quantity = quote.quantity,
            below_moq = quote.price_breaks.iter().filter(|row| !row.meets_moq()).count(),
            "overseas quote calculated"
        );
        Ok(quote)
    }

    pub fn options(&self) -> QuoteOptions {
        QuoteOptions::from_rate_card(&self.rates)
    }
}
