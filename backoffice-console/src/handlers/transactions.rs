use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};

use super::failure;
use crate::aggregation::TransactionFilter;
use crate::render;
use crate::tabs::Tab;
use crate::AppState;

/// Refetch both collections, then render with the given filter.
pub async fn reload_handler(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    match state.transactions.reload().await {
        Ok(aggregate) => {
            let visible = filter.apply(&aggregate);
            Html(render::transactions_panel(filter, &visible)).into_response()
        }
        Err(err) => failure(Tab::Transactions.load_failure(), err),
    }
}

/// Re-filter the loaded aggregate. No backend calls.
pub async fn filter_handler(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Html<String> {
    let visible = state.transactions.filtered(filter).await;
    Html(render::transactions_panel(filter, &visible))
}
