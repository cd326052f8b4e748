use super::breaks::{flat_fee, price_at, RateTable};
use super::domain::{
    selection, DomesticPriceBreak, DomesticQuote, DomesticQuoteRequest, QuoteError, QuoteType,
};
use super::money::round_currency;
use super::rates::{DomesticRates, DIGITIZING_FEE, ROPE_ADDON};

/// Prices a domestic order at every break the quantity reaches.
///
/// The smallest break is always emitted as a reference row, even when the
/// quantity is below it. Unknown decoration names and shipping speeds price
/// at zero.
pub fn calculate_domestic(
    rates: &DomesticRates,
    request: &DomesticQuoteRequest,
) -> Result<DomesticQuote, QuoteError> {
    if !rates.blank_prices.contains_key(&request.style_number) {
        return Err(QuoteError::UnknownStyle(request.style_number.clone()));
    }

    let breaks = rates.quantity_breaks.as_slice();
    let first_break = breaks.first().copied();
    let price_breaks = breaks
        .iter()
        .copied()
        .filter(|quantity_break| {
            *quantity_break <= request.quantity || Some(*quantity_break) == first_break
        })
        .map(|quantity_break| price_break(rates, request, quantity_break))
        .collect();

    let (style_name, collection) = rates
        .styles
        .get(&request.style_number)
        .map(|info| (info.name.clone(), info.collection.clone()))
        .unwrap_or_default();

    Ok(DomesticQuote {
        quote_type: QuoteType::Domestic,
        style_number: request.style_number.clone(),
        style_name,
        collection,
        quantity: request.quantity,
        front_decoration: request.front_decoration.clone(),
        left_decoration: request.left_decoration.clone(),
        right_decoration: request.right_decoration.clone(),
        back_decoration: request.back_decoration.clone(),
        shipping_speed: request.shipping_speed.clone(),
        include_rope: request.include_rope,
        price_breaks,
    })
}

fn price_break(
    rates: &DomesticRates,
    request: &DomesticQuoteRequest,
    quantity_break: u32,
) -> DomesticPriceBreak {
    let breaks = rates.quantity_breaks.as_slice();
    let decoration = |table: &RateTable, name: Option<&str>| {
        selection(name)
            .map(|method| price_at(table, method, quantity_break, breaks).or_zero())
            .unwrap_or(0.0)
    };

    let blank_price = price_at(
        &rates.blank_prices,
        &request.style_number,
        quantity_break,
        breaks,
    )
    .or_zero();
    let front_decoration_price = decoration(
        &rates.front_decoration_prices,
        request.front_decoration.as_deref(),
    );
    let left_decoration_price = decoration(
        &rates.additional_decoration_prices,
        request.left_decoration.as_deref(),
    );
    let right_decoration_price = decoration(
        &rates.additional_decoration_prices,
        request.right_decoration.as_deref(),
    );
    let back_decoration_price = decoration(
        &rates.additional_decoration_prices,
        request.back_decoration.as_deref(),
    );
    let rush_fee = flat_fee(&rates.rush_fees, &request.shipping_speed).or_zero();
    let rope_price = if request.include_rope {
        flat_fee(&rates.addons, ROPE_ADDON).or_zero()
    } else {
        0.0
    };

    let per_piece = blank_price
        + front_decoration_price
        + left_decoration_price
        + right_decoration_price
        + back_decoration_price
        + rush_fee
        + rope_price;
    let digitizing_fee = price_at(
        &rates.additional_charges,
        DIGITIZING_FEE,
        quantity_break,
        breaks,
    )
    .or_zero()
        * f64::from(request.num_dst_files);
    let subtotal = per_piece * f64::from(request.quantity);

    DomesticPriceBreak {
        quantity_break,
        blank_price,
        front_decoration_price,
        left_decoration_price,
        right_decoration_price,
        back_decoration_price,
        rush_fee,
        rope_price,
        per_piece_price: round_currency(per_piece),
        digitizing_fee,
        subtotal: round_currency(subtotal),
        total: round_currency(subtotal + digitizing_fee),
    }
}
