use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::{DesignId, DesignQuotePatch, QuoteSelections};
use super::repository::{DesignQuoteRepository, RepositoryError};
use super::service::{DesignQuoteError, DesignQuoteService};

/// Router exposing the quote attached to a design.
pub fn design_quote_router<R>(service: Arc<DesignQuoteService<R>>) -> Router
where
    R: DesignQuoteRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/designs/:design_id/quote",
            get(get_handler::<R>)
                .post(create_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/designs/:design_id/quote/export",
            get(export_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<DesignQuoteService<R>>>,
    Path(design_id): Path<String>,
) -> Response
where
    R: DesignQuoteRepository + 'static,
{
    match service.get(&DesignId(design_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<DesignQuoteService<R>>>,
    Path(design_id): Path<String>,
    axum::Json(selections): axum::Json<QuoteSelections>,
) -> Response
where
    R: DesignQuoteRepository + 'static,
{
    match service.create(DesignId(design_id), selections) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<DesignQuoteService<R>>>,
    Path(design_id): Path<String>,
    axum::Json(patch): axum::Json<DesignQuotePatch>,
) -> Response
where
    R: DesignQuoteRepository + 'static,
{
    match service.update(&DesignId(design_id), patch) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<DesignQuoteService<R>>>,
    Path(design_id): Path<String>,
) -> Response
where
    R: DesignQuoteRepository + 'static,
{
    match service.delete(&DesignId(design_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<DesignQuoteService<R>>>,
    Path(design_id): Path<String>,
) -> Response
where
    R: DesignQuoteRepository + 'static,
{
    match service.export(&DesignId(design_id)) {
        Ok(sheet) => sheet.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DesignQuoteError) -> Response {
    let status = match &error {
        DesignQuoteError::Quote(_) => StatusCode::BAD_REQUEST,
        DesignQuoteError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        DesignQuoteError::Repository(RepositoryError::Unavailable(_))
        | DesignQuoteError::Serialization(_)
        | DesignQuoteError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = if status == StatusCode::NOT_FOUND {
        "quote not found".to_string()
    } else {
        error.to_string()
    };
    (status, axum::Json(json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design_quotes::service::tests::build_service;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn request(method: Method, body: Option<Value>) -> Request<Body> {
        request_to(method, "/api/v1/designs/design-7/quote", body)
    }

    fn request_to(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn quote_lifecycle_over_http() {
        let router = design_quote_router(Arc::new(build_service()));

        let missing = router
            .clone()
            .oneshot(request(Method::GET, None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(missing).await["error"], "quote not found");

        let created = router
            .clone()
            .oneshot(request(
                Method::POST,
                Some(json!({
                    "quote_type": "domestic",
                    "style_number": "250",
                    "quantity": 300,
                    "front_decoration": "Embroidery",
                })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);
        let created = json_body(created).await;
        assert_eq!(created["design_id"], "design-7");
        assert!(created["cached_total"].is_number());

        let updated = router
            .clone()
            .oneshot(request(Method::PATCH, Some(json!({ "quantity": 600 }))))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let updated = json_body(updated).await;
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["quantity"], 600);

        let deleted = router
            .clone()
            .oneshot(request(Method::DELETE, None))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn invalid_selections_are_bad_requests() {
        let router = design_quote_router(Arc::new(build_service()));

        let response = router
            .oneshot(request(
                Method::POST,
                Some(json!({ "quote_type": "overseas", "quantity": 500 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "hat_type is required for overseas quotes"
        );
    }

    #[tokio::test]
    async fn export_streams_cached_quote_as_csv() {
        let router = design_quote_router(Arc::new(build_service()));
        let export_uri = "/api/v1/designs/design-7/quote/export";

        let missing = router
            .clone()
            .oneshot(request_to(Method::GET, export_uri, None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let created = router
            .clone()
            .oneshot(request(
                Method::POST,
                Some(json!({
                    "quote_type": "overseas",
                    "hat_type": "Classic",
                    "quantity": 200,
                    "front_decoration": "Rubber Patch",
                })),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);

        let response = router
            .oneshot(request_to(Method::GET, export_uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=design_design-7_quote.csv"
        );
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("King Cap - Design design-7 Quote"));
        assert!(text.contains("144+,Does not meet MOQ"));
    }
}
