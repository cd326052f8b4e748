use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState, InMemoryDesignQuoteRepository};
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use capquote::config::AppConfig;
use capquote::design_quotes::DesignQuoteService;
use capquote::error::AppError;
use capquote::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = build_engine(&config, args.rates)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryDesignQuoteRepository::default());
    let design_quotes = Arc::new(DesignQuoteService::new(repository, engine.clone()));

    let app = with_quote_routes(design_quotes)
        .layer(Extension(engine))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
