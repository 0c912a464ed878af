use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::failure;
use crate::aggregation::TransactionFilter;
use crate::error::ConsoleError;
use crate::render;
use crate::tabs::Tab;
use crate::AppState;

/// Load and render one tab. Every tab has exactly one loader.
pub async fn tab_handler(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Ok(tab) = slug.parse::<Tab>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let rendered = match tab {
        Tab::Receipts => state
            .receipts
            .fetch_all()
            .await
            .map(|receipts| render::receipt_cards(&receipts))
            .map_err(ConsoleError::from),
        Tab::Payments => state
            .payments
            .fetch_all()
            .await
            .map(|payments| render::payment_cards(&payments))
            .map_err(ConsoleError::from),
        Tab::Transactions => state
            .transactions
            .reload()
            .await
            .map(|aggregate| render::transactions_panel(TransactionFilter::ALL, aggregate.as_slice())),
        Tab::Financials => state
            .financials
            .load()
            .await
            .map(|snapshot| render::financials_panel(&snapshot)),
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::warn!(tab = tab.slug(), error = %err, "Tab failed to load");
            failure(tab.load_failure(), err)
        }
    }
}
