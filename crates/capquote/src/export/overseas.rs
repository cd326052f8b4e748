use super::{currency_cell, ExportError, QuoteSheet, SheetWriter, SHEET_TITLE};
use crate::pricing::money::format_quantity;
use crate::pricing::{selection, OverseasQuote};

pub const PER_PIECE_FOOTNOTE: &str = "* All prices shown are per piece at each quantity break";

/// Rate-card sheet showing the hat and shipping price at every break.
pub fn overseas_sheet(
    quote: &OverseasQuote,
    design_number: Option<&str>,
) -> Result<QuoteSheet, ExportError> {
    let mut writer = SheetWriter::new();
    writer.row([format!("{SHEET_TITLE} - Overseas Quote")])?;
    writer.blank()?;
    if let Some(design_number) = design_number {
        writer.detail("Design #:", design_number)?;
    }
    write_overseas_block(&mut writer, quote)?;
    writer.blank()?;
    writer.row([PER_PIECE_FOOTNOTE])?;

    let design_part = design_number
        .map(|design| format!("_{design}"))
        .unwrap_or_default();
    let hat_slug = quote.hat_type.to_lowercase().replace(' ', "_");
    Ok(QuoteSheet {
        filename: format!("overseas_quote{design_part}_{hat_slug}.csv"),
        content: writer.finish()?,
    })
}

pub(crate) fn write_overseas_block(
    writer: &mut SheetWriter,
    quote: &OverseasQuote,
) -> Result<(), ExportError> {
    writer.detail("Hat Type:", &quote.hat_type)?;
    writer.detail("Shipping:", &quote.shipping_method)?;

    let locations = [
        ("Front:", quote.front_decoration.as_deref()),
        ("Left:", quote.left_decoration.as_deref()),
        ("Right:", quote.right_decoration.as_deref()),
        ("Back:", quote.back_decoration.as_deref()),
        ("Visor:", quote.visor_decoration.as_deref()),
    ];
    for (label, method) in locations {
        if let Some(method) = selection(method) {
            writer.detail(label, method)?;
        }
    }
    if !quote.design_addons.is_empty() {
        writer.detail("Add-ons:", &quote.design_addons.join(", "))?;
    }
    if !quote.accessories.is_empty() {
        writer.detail("Accessories:", &quote.accessories.join(", "))?;
    }
    writer.blank()?;

    let mut header = vec!["Line Item".to_string()];
    header.extend(
        quote
            .price_breaks
            .iter()
            .map(|row| format!("{}+", format_quantity(row.quantity_break))),
    );
    writer.row(header)?;

    let mut hat = vec!["Hat".to_string()];
    hat.extend(quote.price_breaks.iter().map(|row| currency_cell(row.hat_subtotal)));
    writer.row(hat)?;

    let mut shipping = vec!["Shipping".to_string()];
    shipping.extend(
        quote
            .price_breaks
            .iter()
            .map(|row| currency_cell(row.shipping_price)),
    );
    writer.row(shipping)?;

    Ok(())
}
