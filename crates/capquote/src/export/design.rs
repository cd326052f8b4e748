use serde::Deserialize;

use super::{currency_cell, ExportError, QuoteSheet, SheetWriter, MOQ_NOTICE, SHEET_TITLE};
use crate::design_quotes::DesignQuoteRecord;
use crate::pricing::money::{format_quantity, from_cents};
use crate::pricing::{selection, QuoteType, DEFAULT_SHIPPING_METHOD, DEFAULT_SHIPPING_SPEED};

/// The fields of a cached row the sheet needs; both modes share them.
#[derive(Debug, Deserialize)]
struct CachedRow {
    quantity_break: u32,
    per_piece_price: Option<f64>,
    total: Option<f64>,
}

/// Sheet for a stored design quote, read from its cached pricing only.
///
/// Rows cached below MOQ render the MOQ notice; the quote is never
/// recalculated here.
pub fn design_quote_sheet(record: &DesignQuoteRecord) -> Result<QuoteSheet, ExportError> {
    let selections = &record.selections;
    let mut writer = SheetWriter::new();
    writer.row([format!("{SHEET_TITLE} - Design {} Quote", record.design_id.0)])?;
    writer.blank()?;

    writer.row(["Quote Details"])?;
    writer.detail("Quote Type:", selections.quote_type.label())?;
    writer.detail("Quantity:", &format_quantity(selections.quantity))?;
    match selections.quote_type {
        QuoteType::Domestic => {
            writer.detail(
                "Style Number:",
                selections.style_number.as_deref().unwrap_or("N/A"),
            )?;
            writer.detail(
                "Shipping:",
                selections
                    .shipping_speed
                    .as_deref()
                    .unwrap_or(DEFAULT_SHIPPING_SPEED),
            )?;
            if selections.include_rope == Some(true) {
                writer.detail("Rope:", "Yes")?;
            }
        }
        QuoteType::Overseas => {
            writer.detail("Hat Type:", selections.hat_type.as_deref().unwrap_or("N/A"))?;
            writer.detail(
                "Shipping:",
                selections
                    .shipping_method
                    .as_deref()
                    .unwrap_or(DEFAULT_SHIPPING_METHOD),
            )?;
        }
    }

    let locations = [
        ("Front Decoration:", selections.front_decoration.as_deref()),
        ("Left Decoration:", selections.left_decoration.as_deref()),
        ("Right Decoration:", selections.right_decoration.as_deref()),
        ("Back Decoration:", selections.back_decoration.as_deref()),
        ("Visor Decoration:", selections.visor_decoration.as_deref()),
    ];
    for (label, method) in locations {
        if let Some(method) = selection(method) {
            writer.detail(label, method)?;
        }
    }
    writer.blank()?;

    writer.row(["Pricing Summary"])?;
    match (record.cached.per_piece_cents, record.cached.total_cents) {
        (None, None) => writer.detail("Per Piece:", MOQ_NOTICE)?,
        (per_piece, total) => {
            if let Some(cents) = per_piece {
                writer.detail("Per Piece:", &currency_cell(Some(from_cents(cents))))?;
            }
            if let Some(cents) = total {
                writer.detail("Total:", &currency_cell(Some(from_cents(cents))))?;
            }
        }
    }

    let rows: Vec<CachedRow> =
        serde_json::from_value(record.cached.price_breaks.clone()).unwrap_or_default();
    if !rows.is_empty() {
        writer.blank()?;
        writer.row(["Price Breaks"])?;
        writer.row(["Quantity", "Per Piece", "Total"])?;
        for row in rows {
            let label = format!("{}+", format_quantity(row.quantity_break));
            match row.per_piece_price {
                Some(per_piece) => {
                    let total = row
                        .total
                        .unwrap_or(per_piece * f64::from(row.quantity_break));
                    writer.row([label, currency_cell(Some(per_piece)), currency_cell(Some(total))])?;
                }
                None => writer.row([label, currency_cell(None)])?,
            }
        }
    }

    Ok(QuoteSheet {
        filename: format!("design_{}_quote.csv", record.design_id.0),
        content: writer.finish()?,
    })
}
