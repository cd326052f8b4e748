use std::collections::BTreeSet;

use serde::Serialize;

use super::rates::RateCard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub style_number: String,
    pub name: String,
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomesticOptions {
    pub quantity_breaks: Vec<u32>,
    pub styles: Vec<StyleOption>,
    pub front_decoration_methods: Vec<String>,
    pub additional_decoration_methods: Vec<String>,
    pub shipping_speeds: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverseasOptions {
    pub quantity_breaks: Vec<u32>,
    pub hat_types: Vec<String>,
    pub decoration_methods: Vec<String>,
    pub design_addons: Vec<String>,
    pub accessories: Vec<String>,
    pub shipping_methods: Vec<String>,
}

/// Selectable values for quote forms, derived from the loaded rate card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteOptions {
    pub domestic: DomesticOptions,
    pub overseas: OverseasOptions,
}

impl QuoteOptions {
    pub fn from_rate_card(card: &RateCard) -> Self {
        let domestic = &card.domestic;
        let overseas = &card.overseas;

        let styles = domestic
            .styles
            .iter()
            .map(|(style_number, info)| StyleOption {
                style_number: style_number.clone(),
                name: info.name.clone(),
                collection: info.collection.clone(),
            })
            .collect();

        let decoration_methods: BTreeSet<&String> = overseas
            .front_decoration_prices
            .keys()
            .chain(overseas.side_decoration_prices.keys())
            .chain(overseas.back_decoration_prices.keys())
            .chain(overseas.visor_decoration_prices.keys())
            .collect();

        Self {
            domestic: DomesticOptions {
                quantity_breaks: domestic.quantity_breaks.clone(),
                styles,
                front_decoration_methods: domestic.front_decoration_prices.keys().cloned().collect(),
                additional_decoration_methods: domestic
                    .additional_decoration_prices
                    .keys()
                    .cloned()
                    .collect(),
                shipping_speeds: domestic.rush_fees.keys().cloned().collect(),
            },
            overseas: OverseasOptions {
                quantity_breaks: overseas.quantity_breaks.clone(),
                hat_types: overseas.hat_types.keys().cloned().collect(),
                decoration_methods: decoration_methods.into_iter().cloned().collect(),
                design_addons: overseas.design_addons.keys().cloned().collect(),
                accessories: overseas.accessories.keys().cloned().collect(),
                shipping_methods: overseas.shipping.keys().cloned().collect(),
            },
        }
    }
}
