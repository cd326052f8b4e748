use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::rates::{DOMESTIC_MINIMUM_QUANTITY, OVERSEAS_MINIMUM_QUANTITY};

pub const DEFAULT_SHIPPING_SPEED: &str = "Standard (5-7 Production Days)";
pub const DEFAULT_SHIPPING_METHOD: &str = "FOB CA";

/// Pricing mode of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteType {
    Domestic,
    Overseas,
}

impl QuoteType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::Overseas => "Overseas",
        }
    }

    pub const fn minimum_quantity(self) -> u32 {
        match self {
            Self::Domestic => DOMESTIC_MINIMUM_QUANTITY,
            Self::Overseas => OVERSEAS_MINIMUM_QUANTITY,
        }
    }
}

impl fmt::Display for QuoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domestic => f.write_str("domestic"),
            Self::Overseas => f.write_str("overseas"),
        }
    }
}

/// Returns the decoration name when it denotes an actual selection.
///
/// Absent, blank, and `"0"` values all mean "no decoration". A real
/// selection is returned untouched; rate tables are keyed by exact name.
pub fn selection(value: Option<&str>) -> Option<&str> {
    value.filter(|name| {
        let name = name.trim();
        !name.is_empty() && name != "0"
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("Unknown style number: {0}")]
    UnknownStyle(String),
    #[error("Unknown hat type: {0}")]
    UnknownHatType(String),
    #[error("{mode} quotes require a quantity of at least {minimum} (got {quantity})")]
    BelowMinimumQuantity {
        mode: QuoteType,
        quantity: u32,
        minimum: u32,
    },
    #[error("{field} is required for {mode} quotes")]
    MissingField {
        field: &'static str,
        mode: QuoteType,
    },
}

fn check_minimum(mode: QuoteType, quantity: u32) -> Result<(), QuoteError> {
    let minimum = mode.minimum_quantity();
    if quantity < minimum {
        return Err(QuoteError::BelowMinimumQuantity {
            mode,
            quantity,
            minimum,
        });
    }
    Ok(())
}

fn default_shipping_speed() -> String {
    DEFAULT_SHIPPING_SPEED.to_string()
}

fn default_shipping_method() -> String {
    DEFAULT_SHIPPING_METHOD.to_string()
}

fn default_dst_files() -> u32 {
    1
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomesticQuoteRequest {
    /// Label for exported quote sheets; not used in pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_number: Option<String>,
    pub style_number: String,
    pub quantity: u32,
    #[serde(default)]
    pub front_decoration: Option<String>,
    #[serde(default)]
    pub left_decoration: Option<String>,
    #[serde(default)]
    pub right_decoration: Option<String>,
    #[serde(default)]
    pub back_decoration: Option<String>,
    #[serde(default = "default_shipping_speed")]
    pub shipping_speed: String,
    #[serde(default)]
    pub include_rope: bool,
    #[serde(default = "default_dst_files")]
    pub num_dst_files: u32,
}

impl DomesticQuoteRequest {
    pub fn new(style_number: impl Into<String>, quantity: u32) -> Self {
        Self {
            design_number: None,
            style_number: style_number.into(),
            quantity,
            front_decoration: None,
            left_decoration: None,
            right_decoration: None,
            back_decoration: None,
            shipping_speed: default_shipping_speed(),
            include_rope: false,
            num_dst_files: default_dst_files(),
        }
    }

    /// Request-level checks applied before pricing.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.style_number.trim().is_empty() {
            return Err(QuoteError::MissingField {
                field: "style_number",
                mode: QuoteType::Domestic,
            });
        }
        check_minimum(QuoteType::Domestic, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverseasQuoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_number: Option<String>,
    pub hat_type: String,
    pub quantity: u32,
    #[serde(default)]
    pub front_decoration: Option<String>,
    #[serde(default)]
    pub left_decoration: Option<String>,
    #[serde(default)]
    pub right_decoration: Option<String>,
    #[serde(default)]
    pub back_decoration: Option<String>,
    #[serde(default)]
    pub visor_decoration: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub design_addons: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessories: Vec<String>,
    #[serde(default = "default_shipping_method")]
    pub shipping_method: String,
}

impl OverseasQuoteRequest {
    pub fn new(hat_type: impl Into<String>, quantity: u32) -> Self {
        Self {
            design_number: None,
            hat_type: hat_type.into(),
            quantity,
            front_decoration: None,
            left_decoration: None,
            right_decoration: None,
            back_decoration: None,
            visor_decoration: None,
            design_addons: Vec::new(),
            accessories: Vec::new(),
            shipping_method: default_shipping_method(),
        }
    }

    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.hat_type.trim().is_empty() {
            return Err(QuoteError::MissingField {
                field: "hat_type",
                mode: QuoteType::Overseas,
            });
        }
        check_minimum(QuoteType::Overseas, self.quantity)
    }
}

/// One domestic quantity-break row. All amounts are dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticPriceBreak {
    pub quantity_break: u32,
    pub blank_price: f64,
    pub front_decoration_price: f64,
    pub left_decoration_price: f64,
    pub right_decoration_price: f64,
    pub back_decoration_price: f64,
    pub rush_fee: f64,
    pub rope_price: f64,
    pub per_piece_price: f64,
    /// One-time charge, not included in the per-piece price.
    pub digitizing_fee: f64,
    pub subtotal: f64,
    pub total: f64,
}

/// One overseas quantity-break row.
///
/// Either every amount is present or every amount is `None`; the latter
/// marks a break where some selected option does not meet its MOQ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverseasPriceBreak {
    pub quantity_break: u32,
    pub blank_price: Option<f64>,
    pub front_decoration_price: Option<f64>,
    pub left_decoration_price: Option<f64>,
    pub right_decoration_price: Option<f64>,
    pub back_decoration_price: Option<f64>,
    pub visor_decoration_price: Option<f64>,
    pub addons_price: Option<f64>,
    pub accessories_price: Option<f64>,
    pub hat_subtotal: Option<f64>,
    pub shipping_price: Option<f64>,
    pub per_piece_price: Option<f64>,
    pub total: Option<f64>,
}

impl OverseasPriceBreak {
    pub fn below_moq(quantity_break: u32) -> Self {
        Self {
            quantity_break,
            blank_price: None,
            front_decoration_price: None,
            left_decoration_price: None,
            right_decoration_price: None,
            back_decoration_price: None,
            visor_decoration_price: None,
            addons_price: None,
            accessories_price: None,
            hat_subtotal: None,
            shipping_price: None,
            per_piece_price: None,
            total: None,
        }
    }

    pub fn meets_moq(&self) -> bool {
        self.per_piece_price.is_some()
    }

    #[cfg(test)]
    pub(crate) fn amounts(&self) -> [Option<f64>; 12] {
        [
            self.blank_price,
            self.front_decoration_price,
            self.left_decoration_price,
            self.right_decoration_price,
            self.back_decoration_price,
            self.visor_decoration_price,
            self.addons_price,
            self.accessories_price,
            self.hat_subtotal,
            self.shipping_price,
            self.per_piece_price,
            self.total,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticQuote {
    pub quote_type: QuoteType,
    pub style_number: String,
    pub style_name: String,
    pub collection: String,
    pub quantity: u32,
    pub front_decoration: Option<String>,
    pub left_decoration: Option<String>,
    pub right_decoration: Option<String>,
    pub back_decoration: Option<String>,
    pub shipping_speed: String,
    pub include_rope: bool,
    pub price_breaks: Vec<DomesticPriceBreak>,
}

impl DomesticQuote {
    /// The last emitted row: the break closest to, but not above, the quantity.
    pub fn applicable_break(&self) -> Option<&DomesticPriceBreak> {
        self.price_breaks.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverseasQuote {
    pub quote_type: QuoteType,
    pub hat_type: String,
    pub quantity: u32,
    pub front_decoration: Option<String>,
    pub left_decoration: Option<String>,
    pub right_decoration: Option<String>,
    pub back_decoration: Option<String>,
    pub visor_decoration: Option<String>,
    pub design_addons: Vec<String>,
    pub accessories: Vec<String>,
    pub shipping_method: String,
    pub price_breaks: Vec<OverseasPriceBreak>,
}

impl OverseasQuote {
    /// Scans from the largest break down for the first priced row at or
    /// below the requested quantity.
    pub fn applicable_break(&self) -> Option<&OverseasPriceBreak> {
        self.price_breaks.iter().rev().find(|price_break| {
            price_break.quantity_break <= self.quantity && price_break.meets_moq()
        })
    }
}

/// Either calculator's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quote {
    Domestic(DomesticQuote),
    Overseas(OverseasQuote),
}

impl Quote {
    pub fn quote_type(&self) -> QuoteType {
        match self {
            Self::Domestic(_) => QuoteType::Domestic,
            Self::Overseas(_) => QuoteType::Overseas,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            Self::Domestic(quote) => quote.quantity,
            Self::Overseas(quote) => quote.quantity,
        }
    }
}

impl From<DomesticQuote> for Quote {
    fn from(value: DomesticQuote) -> Self {
        Self::Domestic(value)
    }
}

impl From<OverseasQuote> for Quote {
    fn from(value: OverseasQuote) -> Self {
        Self::Overseas(value)
    }
}
