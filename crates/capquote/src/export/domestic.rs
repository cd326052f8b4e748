use super::{currency_cell, ExportError, QuoteSheet, SheetWriter, SHEET_TITLE};
use crate::pricing::money::format_quantity;
use crate::pricing::{selection, DomesticQuote};

/// Line-item sheet for the applicable break of a domestic quote.
pub fn domestic_sheet(
    quote: &DomesticQuote,
    design_number: Option<&str>,
) -> Result<QuoteSheet, ExportError> {
    let mut writer = SheetWriter::new();
    writer.row([format!("{SHEET_TITLE} - Domestic Quote")])?;
    writer.blank()?;
    if let Some(design_number) = design_number {
        writer.detail("Design #:", design_number)?;
    }
    write_domestic_block(&mut writer, quote)?;

    let design_part = design_number
        .map(|design| format!("_{design}"))
        .unwrap_or_default();
    Ok(QuoteSheet {
        filename: format!(
            "domestic_quote{design_part}_{}_{}.csv",
            quote.style_number, quote.quantity
        ),
        content: writer.finish()?,
    })
}

pub(crate) fn write_domestic_block(
    writer: &mut SheetWriter,
    quote: &DomesticQuote,
) -> Result<(), ExportError> {
    let row = quote.applicable_break().ok_or(ExportError::NoPriceBreaks)?;
    let quantity = quote.quantity;

    writer.detail(
        "Style:",
        &format!("{} - {}", quote.style_number, quote.style_name),
    )?;
    writer.detail("Collection:", &quote.collection)?;
    writer.detail("Quantity:", &format_quantity(quantity))?;
    writer.detail("Shipping:", &quote.shipping_speed)?;
    writer.blank()?;

    let mut line_items = vec![("Blank Hat".to_string(), row.blank_price, quantity)];
    let locations = [
        ("Front", quote.front_decoration.as_deref(), row.front_decoration_price),
        ("Left", quote.left_decoration.as_deref(), row.left_decoration_price),
        ("Right", quote.right_decoration.as_deref(), row.right_decoration_price),
        ("Back", quote.back_decoration.as_deref(), row.back_decoration_price),
    ];
    for (location, method, price) in locations {
        if let Some(method) = selection(method) {
            line_items.push((format!("{location} Decoration ({method})"), price, quantity));
        }
    }
    if row.rush_fee > 0.0 {
        line_items.push(("Rush Fee".to_string(), row.rush_fee, quantity));
    }
    if quote.include_rope && row.rope_price > 0.0 {
        line_items.push(("Rope".to_string(), row.rope_price, quantity));
    }
    if row.digitizing_fee > 0.0 {
        line_items.push(("Digitizing Fee".to_string(), row.digitizing_fee, 1));
    }

    writer.row(["Line Item", "Per Piece", "Qty", "Total"])?;
    for (label, per_piece, qty) in line_items {
        writer.row([
            label,
            currency_cell(Some(per_piece)),
            qty.to_string(),
            currency_cell(Some(per_piece * f64::from(qty))),
        ])?;
    }
    writer.row([
        "Total".to_string(),
        currency_cell(Some(row.per_piece_price)),
        quantity.to_string(),
        currency_cell(Some(row.total)),
    ])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::parse_rows;
    use crate::pricing::{calculate_domestic, DomesticQuoteRequest, RateCard};

    fn quote(request: DomesticQuoteRequest) -> DomesticQuote {
        let card = RateCard::standard().expect("bundled rate card");
        calculate_domestic(&card.domestic, &request).expect("quotes")
    }

    #[test]
    fn lists_selected_line_items_and_total() {
        let quote = quote(DomesticQuoteRequest {
            front_decoration: Some("Embroidery".to_string()),
            back_decoration: Some("0".to_string()),
            include_rope: true,
            ..DomesticQuoteRequest::new("250", 300)
        });
        let sheet = domestic_sheet(&quote, Some("KC-1042")).expect("sheet renders");
        assert_eq!(sheet.filename, "domestic_quote_KC-1042_250_300.csv");

        let rows = parse_rows(&sheet.content);
        let labels: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
        assert!(labels.contains(&"Design #:"));
        assert!(labels.contains(&"Front Decoration (Embroidery)"));
        assert!(labels.contains(&"Rope"));
        assert!(labels.contains(&"Digitizing Fee"));
        assert!(!labels.iter().any(|label| label.starts_with("Back Decoration")));
        assert!(!labels.contains(&"Rush Fee"));

        let total = rows.last().expect("total row");
        let applicable = quote.applicable_break().expect("applicable row");
        assert_eq!(total[0], "Total");
        assert_eq!(total[2], "300");
        assert_eq!(total[3], currency_cell(Some(applicable.total)));

        let digitizing = rows
            .iter()
            .find(|row| row[0] == "Digitizing Fee")
            .expect("digitizing row");
        assert_eq!(digitizing[2], "1");
    }

    #[test]
    fn filename_omits_missing_design_number() {
        let quote = quote(DomesticQuoteRequest::new("410", 48));
        let sheet = domestic_sheet(&quote, None).expect("sheet renders");
        assert_eq!(sheet.filename, "domestic_quote_410_48.csv");
    }

    #[test]
    fn empty_quote_cannot_be_exported() {
        let mut quote = quote(DomesticQuoteRequest::new("410", 48));
        quote.price_breaks.clear();
        assert!(matches!(
            domestic_sheet(&quote, None),
            Err(ExportError::NoPriceBreaks)
        ));
    }
}
