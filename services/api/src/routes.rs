use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use capquote::design_quotes::{design_quote_router, DesignQuoteRepository, DesignQuoteService};
use capquote::error::AppError;
use capquote::export::{
    combined_sheet, domestic_sheet, overseas_sheet, QuoteSheetRequest,
};
use capquote::pricing::{
    DomesticQuote, DomesticQuoteRequest, OverseasQuote, OverseasQuoteRequest, QuoteOptions,
};
use capquote::QuoteEngine;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_quote_routes<R>(service: Arc<DesignQuoteService<R>>) -> axum::Router
where
    R: DesignQuoteRepository + 'static,
{
    design_quote_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/quotes/options", get(options_endpoint))
        .route("/api/v1/quotes/domestic", post(domestic_quote_endpoint))
        .route("/api/v1/quotes/overseas", post(overseas_quote_endpoint))
        .route(
            "/api/v1/quotes/domestic/export",
            post(domestic_export_endpoint),
        )
        .route(
            "/api/v1/quotes/overseas/export",
            post(overseas_export_endpoint),
        )
        .route("/api/v1/quotes/sheet/export", post(sheet_export_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn options_endpoint(Extension(engine): Extension<QuoteEngine>) -> Json<QuoteOptions> {
    Json(engine.options())
}

pub(crate) async fn domestic_quote_endpoint(
    Extension(engine): Extension<QuoteEngine>,
    Json(request): Json<DomesticQuoteRequest>,
) -> Result<Json<DomesticQuote>, AppError> {
    request.validate()?;
    Ok(Json(engine.domestic(&request)?))
}

pub(crate) async fn overseas_quote_endpoint(
    Extension(engine): Extension<QuoteEngine>,
    Json(request): Json<OverseasQuoteRequest>,
) -> Result<Json<OverseasQuote>, AppError> {
    request.validate()?;
    Ok(Json(engine.overseas(&request)?))
}

pub(crate) async fn domestic_export_endpoint(
    Extension(engine): Extension<QuoteEngine>,
    Json(request): Json<DomesticQuoteRequest>,
) -> Result<Response, AppError> {
    request.validate()?;
    let quote = engine.domestic(&request)?;
    let sheet = domestic_sheet(&quote, request.design_number.as_deref())?;
    Ok(sheet.into_response())
}

pub(crate) async fn overseas_export_endpoint(
    Extension(engine): Extension<QuoteEngine>,
    Json(request): Json<OverseasQuoteRequest>,
) -> Result<Response, AppError> {
    request.validate()?;
    let quote = engine.overseas(&request)?;
    let sheet = overseas_sheet(&quote, request.design_number.as_deref())?;
    Ok(sheet.into_response())
}

pub(crate) async fn sheet_export_endpoint(
    Extension(engine): Extension<QuoteEngine>,
    Json(request): Json<QuoteSheetRequest>,
) -> Result<Response, AppError> {
    let sheet = combined_sheet(&engine, &request.quotes)?;
    Ok(sheet.into_response())
}
