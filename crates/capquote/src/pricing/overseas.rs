use super::breaks::{lookup_at, RateLookup, RateTable};
use super::domain::{
    selection, OverseasPriceBreak, OverseasQuote, OverseasQuoteRequest, QuoteError, QuoteType,
};
use super::money::round_currency;
use super::rates::{HatTypeRates, OverseasRates};

/// Prices an overseas order at every defined break, regardless of quantity.
///
/// Selected options are looked up at the exact break. If any selection has
/// no price there, including names missing from their table, the whole row
/// is emitted with every amount set to `None`.
pub fn calculate_overseas(
    rates: &OverseasRates,
    request: &OverseasQuoteRequest,
) -> Result<OverseasQuote, QuoteError> {
    let hat = rates
        .hat_types
        .get(&request.hat_type)
        .ok_or_else(|| QuoteError::UnknownHatType(request.hat_type.clone()))?;

    let price_breaks = rates
        .quantity_breaks
        .iter()
        .map(|quantity_break| price_break(rates, hat, request, *quantity_break))
        .collect();

    Ok(OverseasQuote {
        quote_type: QuoteType::Overseas,
        hat_type: request.hat_type.clone(),
        quantity: request.quantity,
        front_decoration: request.front_decoration.clone(),
        left_decoration: request.left_decoration.clone(),
        right_decoration: request.right_decoration.clone(),
        back_decoration: request.back_decoration.clone(),
        visor_decoration: request.visor_decoration.clone(),
        design_addons: request.design_addons.clone(),
        accessories: request.accessories.clone(),
        shipping_method: request.shipping_method.clone(),
        price_breaks,
    })
}

/// Accumulates selected option prices at one break, remembering whether
/// every selection was priced.
struct MoqGate {
    quantity_break: u32,
    meets_moq: bool,
}

impl MoqGate {
    fn new(quantity_break: u32) -> Self {
        Self {
            quantity_break,
            meets_moq: true,
        }
    }

    fn option(&mut self, table: &RateTable, name: Option<&str>) -> f64 {
        let Some(name) = selection(name) else {
            return 0.0;
        };
        match lookup_at(table, name, self.quantity_break) {
            RateLookup::Priced(price) => price,
            RateLookup::NotOffered | RateLookup::Unknown => {
                self.meets_moq = false;
                0.0
            }
        }
    }

    fn all(&mut self, table: &RateTable, names: &[String]) -> f64 {
        names
            .iter()
            .map(|name| self.option(table, Some(name.as_str())))
            .sum()
    }
}

fn price_break(
    rates: &OverseasRates,
    hat: &HatTypeRates,
    request: &OverseasQuoteRequest,
    quantity_break: u32,
) -> OverseasPriceBreak {
    let mut gate = MoqGate::new(quantity_break);

    let blank_price = hat.prices.get(&quantity_break).copied().unwrap_or(0.0);
    let front = gate.option(
        &rates.front_decoration_prices,
        request.front_decoration.as_deref(),
    );
    let left = gate.option(
        &rates.side_decoration_prices,
        request.left_decoration.as_deref(),
    );
    let right = gate.option(
        &rates.side_decoration_prices,
        request.right_decoration.as_deref(),
    );
    let back = gate.option(
        &rates.back_decoration_prices,
        request.back_decoration.as_deref(),
    );
    let visor = gate.option(
        &rates.visor_decoration_prices,
        request.visor_decoration.as_deref(),
    );
    let addons = gate.all(&rates.design_addons, &request.design_addons);
    let accessories = gate.all(&rates.accessories, &request.accessories);

    if !gate.meets_moq {
        return OverseasPriceBreak::below_moq(quantity_break);
    }

    let shipping = lookup_at(&rates.shipping, &request.shipping_method, quantity_break).or_zero();
    let hat_subtotal = blank_price + front + left + right + back + visor + addons + accessories;
    let per_piece = hat_subtotal + shipping;
    let total = per_piece * f64::from(request.quantity);

    OverseasPriceBreak {
        quantity_break,
        blank_price: Some(round_currency(blank_price)),
        front_decoration_price: Some(round_currency(front)),
        left_decoration_price: Some(round_currency(left)),
        right_decoration_price: Some(round_currency(right)),
        back_decoration_price: Some(round_currency(back)),
        visor_decoration_price: Some(round_currency(visor)),
        addons_price: Some(round_currency(addons)),
        accessories_price: Some(round_currency(accessories)),
        hat_subtotal: Some(round_currency(hat_subtotal)),
        shipping_price: Some(round_currency(shipping)),
        per_piece_price: Some(round_currency(per_piece)),
        total: Some(round_currency(total)),
    }
}
