//! CSV quote sheets handed to customers and the sales team.

mod design;
mod domestic;
mod overseas;
mod sheet;

pub use design::design_quote_sheet;
pub use domestic::domestic_sheet;
pub use overseas::overseas_sheet;
pub use sheet::{combined_sheet, QuoteSheetItem, QuoteSheetRequest, SHEET_OVERSEAS_QUANTITY};

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::pricing::money::format_currency;

pub const SHEET_TITLE: &str = "King Cap";
pub const MOQ_NOTICE: &str = "Does not meet MOQ";

/// A rendered sheet ready to be written or streamed as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSheet {
    pub filename: String,
    pub content: Vec<u8>,
}

impl QuoteSheet {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

impl IntoResponse for QuoteSheet {
    fn into_response(self) -> Response {
        info!(filename = %self.filename, bytes = self.content.len(), "quote sheet exported");
        let disposition = self.content_disposition();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.content,
        )
            .into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write quote sheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush quote sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("No price breaks available")]
    NoPriceBreaks,
    #[error("No quotes provided")]
    NoQuotes,
}

/// Row-oriented CSV writer; rows may have differing widths.
pub(crate) struct SheetWriter {
    inner: csv::Writer<Vec<u8>>,
}

impl SheetWriter {
    pub(crate) fn new() -> Self {
        let inner = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        Self { inner }
    }

    pub(crate) fn row<I, T>(&mut self, fields: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.inner.write_record(fields)?;
        Ok(())
    }

    pub(crate) fn blank(&mut self) -> Result<(), ExportError> {
        self.row([""])
    }

    pub(crate) fn detail(&mut self, label: &str, value: &str) -> Result<(), ExportError> {
        self.row([label, value])
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>, ExportError> {
        self.inner
            .into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))
    }
}

/// Currency text for a cell, or the MOQ notice for an unpriced amount.
pub(crate) fn currency_cell(amount: Option<f64>) -> String {
    amount
        .map(format_currency)
        .unwrap_or_else(|| MOQ_NOTICE.to_string())
}

#[cfg(test)]
pub(crate) fn parse_rows(content: &[u8]) -> Vec<Vec<String>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content)
        .records()
        .map(|record| {
            record
                .expect("valid csv record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}
