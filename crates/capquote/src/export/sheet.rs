use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::domestic::write_domestic_block;
use super::overseas::write_overseas_block;
use super::{ExportError, QuoteSheet, SheetWriter, SHEET_TITLE};
use crate::pricing::{
    DomesticQuoteRequest, OverseasQuoteRequest, Quote, QuoteEngine, QuoteError, QuoteType,
};

/// Quantity assumed for overseas sheet entries that omit one.
pub const SHEET_OVERSEAS_QUANTITY: u32 = 5040;

/// One design's entry on a combined sheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteSheetItem {
    #[serde(rename = "type")]
    pub quote_type: QuoteType,
    pub design_number: String,
    /// Raw domestic or overseas request parameters.
    pub request: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteSheetRequest {
    pub quotes: Vec<QuoteSheetItem>,
}

#[derive(Debug, thiserror::Error)]
enum SheetItemError {
    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Renders several designs into one sheet.
///
/// An entry that cannot be priced is recorded as an error row; the rest of
/// the sheet is still produced.
pub fn combined_sheet(
    engine: &QuoteEngine,
    items: &[QuoteSheetItem],
) -> Result<QuoteSheet, ExportError> {
    if items.is_empty() {
        return Err(ExportError::NoQuotes);
    }

    let mut writer = SheetWriter::new();
    writer.row([format!("{SHEET_TITLE} - Combined Quote Sheet")])?;
    writer.blank()?;

    for item in items {
        writer.row([format!("Design: {}", item.design_number)])?;

        let failure = match price_item(engine, item) {
            Ok(quote) => match write_item(&mut writer, &quote) {
                Ok(()) => None,
                Err(ExportError::NoPriceBreaks) => Some(ExportError::NoPriceBreaks.to_string()),
                Err(err) => return Err(err),
            },
            Err(err) => Some(err.to_string()),
        };
        if let Some(message) = failure {
            warn!(design = %item.design_number, error = %message, "quote sheet entry skipped");
            writer.row([format!(
                "Error processing {}: {}",
                item.design_number, message
            )])?;
        }

        writer.blank()?;
        writer.blank()?;
    }

    Ok(QuoteSheet {
        filename: "quote_sheet.csv".to_string(),
        content: writer.finish()?,
    })
}

fn price_item(engine: &QuoteEngine, item: &QuoteSheetItem) -> Result<Quote, SheetItemError> {
    match item.quote_type {
        QuoteType::Domestic => {
            let request: DomesticQuoteRequest = serde_json::from_value(item.request.clone())?;
            request.validate()?;
            Ok(engine.domestic(&request)?.into())
        }
        QuoteType::Overseas => {
            let mut raw = item.request.clone();
            if let Some(fields) = raw.as_object_mut() {
                fields
                    .entry("quantity")
                    .or_insert_with(|| Value::from(SHEET_OVERSEAS_QUANTITY));
            }
            let request: OverseasQuoteRequest = serde_json::from_value(raw)?;
            request.validate()?;
            Ok(engine.overseas(&request)?.into())
        }
    }
}

fn write_item(writer: &mut SheetWriter, quote: &Quote) -> Result<(), ExportError> {
    writer.detail("Type:", quote.quote_type().label())?;
    match quote {
        Quote::Domestic(quote) => write_domestic_block(writer, quote),
        Quote::Overseas(quote) => write_overseas_block(writer, quote),
    }
}
