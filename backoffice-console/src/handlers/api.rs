//! JSON views of the console state, for scripts and dashboards.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;

use crate::aggregation::{totals_of, Totals, TransactionFilter};
use crate::models::Transaction;
use crate::views::FinancialsSnapshot;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
}

/// The loaded aggregate, filtered. Loads it first when nothing is loaded yet.
pub async fn transactions_json(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let aggregate = match state.transactions.current().await {
        Some(aggregate) => aggregate,
        None => state.transactions.reload().await?,
    };

    let transactions = filter.apply(&aggregate);
    let totals = totals_of(&transactions);
    Ok(Json(TransactionsResponse {
        transactions,
        totals,
    }))
}

pub async fn financials_json(
    State(state): State<AppState>,
) -> Result<Json<FinancialsSnapshot>, AppError> {
    let snapshot = match state.financials.snapshot().await {
        Some(snapshot) => snapshot,
        None => state.financials.load().await?,
    };
    Ok(Json(snapshot))
}
