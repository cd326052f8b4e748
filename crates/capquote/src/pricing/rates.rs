//! Rate card schema and loading.
//!
//! The JSON shape mirrors the tables the sales team maintains: every table is
//! `name -> quantity break -> unit price`, except the flat domestic rush and
//! add-on fees. A loaded [`RateCard`] is shared behind an `Arc` and never
//! mutated afterwards.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::breaks::{BreakPrices, RateTable};

const STANDARD_RATE_CARD: &str = include_str!("../../data/rate_card.json");

pub const DOMESTIC_MINIMUM_QUANTITY: u32 = 24;
pub const OVERSEAS_MINIMUM_QUANTITY: u32 = 144;

/// Key of the rope add-on in the domestic flat add-on table.
pub const ROPE_ADDON: &str = "Rope";
/// Key of the per-DST-file charge in the domestic additional charges table.
pub const DIGITIZING_FEE: &str = "Embroidery Digitizing Fee";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    pub domestic: DomesticRates,
    pub overseas: OverseasRates,
}

/// Display metadata for a domestic style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleInfo {
    pub name: String,
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticRates {
    pub quantity_breaks: Vec<u32>,
    #[serde(default)]
    pub styles: BTreeMap<String, StyleInfo>,
    pub blank_prices: RateTable,
    #[serde(default)]
    pub front_decoration_prices: RateTable,
    /// Shared by the left, right, and back locations.
    #[serde(default)]
    pub additional_decoration_prices: RateTable,
    #[serde(default)]
    pub rush_fees: BTreeMap<String, f64>,
    #[serde(default)]
    pub addons: BTreeMap<String, f64>,
    #[serde(default)]
    pub additional_charges: RateTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HatTypeRates {
    pub prices: BreakPrices,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverseasRates {
    pub quantity_breaks: Vec<u32>,
    pub hat_types: BTreeMap<String, HatTypeRates>,
    #[serde(default)]
    pub front_decoration_prices: RateTable,
    /// Shared by the left and right locations.
    #[serde(default)]
    pub side_decoration_prices: RateTable,
    #[serde(default)]
    pub back_decoration_prices: RateTable,
    #[serde(default)]
    pub visor_decoration_prices: RateTable,
    #[serde(default)]
    pub design_addons: RateTable,
    #[serde(default)]
    pub accessories: RateTable,
    #[serde(default)]
    pub shipping: RateTable,
}

#[derive(Debug, thiserror::Error)]
pub enum RateCardError {
    #[error("failed to read rate card: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate card data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{mode} rate card defines no quantity breaks")]
    EmptyBreaks { mode: &'static str },
    #[error("{mode} quantity breaks must be strictly ascending")]
    UnsortedBreaks { mode: &'static str },
    #[error("hat type '{hat_type}' has no price at quantity break {quantity_break}")]
    IncompleteHatPricing {
        hat_type: String,
        quantity_break: u32,
    },
}

impl RateCard {
    /// The rate card bundled with the service.
    pub fn standard() -> Result<Self, RateCardError> {
        Self::from_json(STANDARD_RATE_CARD)
    }

    pub fn from_json(raw: &str) -> Result<Self, RateCardError> {
        let card: Self = serde_json::from_str(raw)?;
        card.validate()?;
        Ok(card)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RateCardError> {
        let card: Self = serde_json::from_reader(reader)?;
        card.validate()?;
        Ok(card)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RateCardError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let card = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(path = %path.display(), "loaded rate card from disk");
        Ok(card)
    }

    /// Checks the structural guarantees the calculators rely on.
    pub fn validate(&self) -> Result<(), RateCardError> {
        check_breaks("domestic", &self.domestic.quantity_breaks)?;
        check_breaks("overseas", &self.overseas.quantity_breaks)?;

        for (hat_type, rates) in &self.overseas.hat_types {
            if let Some(missing) = self
                .overseas
                .quantity_breaks
                .iter()
                .find(|quantity_break| !rates.prices.contains_key(quantity_break))
            {
                return Err(RateCardError::IncompleteHatPricing {
                    hat_type: hat_type.clone(),
                    quantity_break: *missing,
                });
            }
        }

        Ok(())
    }
}

fn check_breaks(mode: &'static str, breaks: &[u32]) -> Result<(), RateCardError> {
    if breaks.is_empty() {
        return Err(RateCardError::EmptyBreaks { mode });
    }
    if breaks.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(RateCardError::UnsortedBreaks { mode });
    }
    Ok(())
}
