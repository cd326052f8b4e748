//! Applicable-break summaries and the cents representation persisted
//! alongside a design's quote.

use serde::{Deserialize, Serialize};

use super::domain::Quote;
use super::money::to_cents;

/// The single row chosen to represent a quote at its requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub quantity_break: Option<u32>,
    pub per_piece_price: Option<f64>,
    pub total: Option<f64>,
}

impl QuoteSummary {
    pub const fn unavailable() -> Self {
        Self {
            quantity_break: None,
            per_piece_price: None,
            total: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.per_piece_price.is_some()
    }
}

impl Quote {
    pub fn summary(&self) -> QuoteSummary {
        match self {
            Quote::Domestic(quote) => quote
                .applicable_break()
                .map(|row| QuoteSummary {
                    quantity_break: Some(row.quantity_break),
                    per_piece_price: Some(row.per_piece_price),
                    total: Some(row.total),
                })
                .unwrap_or(QuoteSummary::unavailable()),
            Quote::Overseas(quote) => quote
                .applicable_break()
                .map(|row| QuoteSummary {
                    quantity_break: Some(row.quantity_break),
                    per_piece_price: row.per_piece_price,
                    total: row.total,
                })
                .unwrap_or(QuoteSummary::unavailable()),
        }
    }
}

/// Serialized rows plus the applicable totals in integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub price_breaks: serde_json::Value,
    pub total_cents: Option<i64>,
    pub per_piece_cents: Option<i64>,
}

impl CachedQuote {
    pub fn from_quote(quote: &Quote) -> Result<Self, serde_json::Error> {
        let price_breaks = match quote {
            Quote::Domestic(quote) => serde_json::to_value(&quote.price_breaks)?,
            Quote::Overseas(quote) => serde_json::to_value(&quote.price_breaks)?,
        };
        let summary = quote.summary();

        Ok(Self {
            price_breaks,
            total_cents: summary.total.map(to_cents),
            per_piece_cents: summary.per_piece_price.map(to_cents),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::domain::{DomesticQuoteRequest, OverseasQuoteRequest};
    use crate::pricing::rates::RateCard;
    use crate::pricing::{calculate_domestic, calculate_overseas};

    #[test]
    fn domestic_summary_uses_last_row() {
        let card = RateCard::standard().expect("bundled rate card");
        let quote: Quote = calculate_domestic(&card.domestic, &DomesticQuoteRequest::new("250", 300))
            .expect("quotes")
            .into();
        let summary = quote.summary();

        assert_eq!(summary.quantity_break, Some(288));
        let cached = CachedQuote::from_quote(&quote).expect("serializes");
        assert_eq!(cached.total_cents, summary.total.map(to_cents));
        assert_eq!(
            cached.price_breaks.as_array().map(Vec::len),
            Some(card.domestic.quantity_breaks.iter().filter(|b| **b <= 300).count())
        );
    }

    #[test]
    fn overseas_without_applicable_break_caches_nothing() {
        let card = RateCard::standard().expect("bundled rate card");
        let request = OverseasQuoteRequest {
            design_addons: vec!["Custom Undervisor Print".to_string()],
            ..OverseasQuoteRequest::new("Classic", 500)
        };
        let quote: Quote = calculate_overseas(&card.overseas, &request)
            .expect("quotes")
            .into();

        assert!(!quote.summary().is_available());
        let cached = CachedQuote::from_quote(&quote).expect("serializes");
        assert_eq!(cached.total_cents, None);
        assert_eq!(cached.per_piece_cents, None);
        assert_eq!(
            cached.price_breaks.as_array().map(Vec::len),
            Some(card.overseas.quantity_breaks.len())
        );
    }

    #[test]
    fn caching_is_idempotent() {
        let card = RateCard::standard().expect("bundled rate card");
        let request = OverseasQuoteRequest {
            front_decoration: Some("Embroidery".to_string()),
            ..OverseasQuoteRequest::new("Comfort", 2600)
        };
        let first: Quote = calculate_overseas(&card.overseas, &request).expect("quotes").into();
        let second: Quote = calculate_overseas(&card.overseas, &request).expect("quotes").into();

        assert_eq!(first, second);
        assert_eq!(
            CachedQuote::from_quote(&first).expect("serializes"),
            CachedQuote::from_quote(&second).expect("serializes")
        );
        assert_eq!(first.summary().quantity_break, Some(2500));
    }
}
