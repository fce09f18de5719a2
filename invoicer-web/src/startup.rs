use axum::{Router, middleware::from_fn, routing::get, routing::post};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::{
    app::{health_check, index},
    invoice::{add_item, clear_items, generate_pdf, get_invoice, reset_invoice, update_invoice},
};
use crate::middleware::request_id_middleware;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/invoice", get(get_invoice).put(update_invoice))
        .route("/api/invoice/reset", post(reset_invoice))
        .route("/api/invoice/pdf", post(generate_pdf))
        .route("/api/items", post(add_item).delete(clear_items))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(crate::middleware::REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
