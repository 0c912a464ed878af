use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    api::{financials_json, transactions_json},
    app::{health_check, index},
    financials::{cost_per_sqm_handler, financials_handler, save_settings_handler},
    metrics::metrics,
    tabs::tab_handler,
    transactions::{filter_handler, reload_handler},
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/tabs/:tab", get(tab_handler))
        .route("/transactions", get(filter_handler))
        .route("/transactions/reload", post(reload_handler))
        .route("/financials", get(financials_handler))
        .route("/financials/settings", post(save_settings_handler))
        .route("/financials/cost-per-sqm", get(cost_per_sqm_handler))
        .route("/api/v1/transactions", get(transactions_json))
        .route("/api/v1/financials", get(financials_json))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
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
