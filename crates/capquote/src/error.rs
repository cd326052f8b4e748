use crate::config::ConfigError;
use crate::design_quotes::DesignQuoteError;
use crate::export::ExportError;
use crate::pricing::{QuoteError, RateCardError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    RateCard(RateCardError),
    Quote(QuoteError),
    Export(ExportError),
    DesignQuote(DesignQuoteError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::RateCard(err) => write!(f, "rate card error: {}", err),
            AppError::Quote(err) => write!(f, "{}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::DesignQuote(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::RateCard(err) => Some(err),
            AppError::Quote(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::DesignQuote(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Quote(_)
            | AppError::Export(ExportError::NoPriceBreaks)
            | AppError::Export(ExportError::NoQuotes)
            | AppError::DesignQuote(DesignQuoteError::Quote(_)) => StatusCode::BAD_REQUEST,
            AppError::DesignQuote(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RateCardError> for AppError {
    fn from(value: RateCardError) -> Self {
        Self::RateCard(value)
    }
}

impl From<QuoteError> for AppError {
    fn from(value: QuoteError) -> Self {
        Self::Quote(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<DesignQuoteError> for AppError {
    fn from(value: DesignQuoteError) -> Self {
        Self::DesignQuote(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design_quotes::RepositoryError;
    use crate::pricing::QuoteType;

    #[test]
    fn pricing_failures_are_client_errors() {
        let error = AppError::from(QuoteError::UnknownStyle("999".to_string()));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "Unknown style number: 999");

        let error = AppError::from(DesignQuoteError::Quote(QuoteError::MissingField {
            field: "hat_type",
            mode: QuoteType::Overseas,
        }));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_design_quote_is_not_found() {
        let error = AppError::from(DesignQuoteError::from(RepositoryError::NotFound));
        assert_eq!(error.status(), StatusCode::NOT_FOUND);

        let error = AppError::from(DesignQuoteError::from(RepositoryError::Unavailable(
            "offline".to_string(),
        )));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
