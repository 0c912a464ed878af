use std::sync::Arc;

use crate::aggregation::{load_aggregate, Aggregate, TransactionFilter};
use crate::error::ConsoleError;
use crate::models::{Payment, Receipt, Transaction};
use crate::services::RecordSource;
use crate::state::ConsoleState;

/// The merged transaction list. Owns the aggregate slot of [`ConsoleState`].
pub struct TransactionsView {
    receipts: Arc<dyn RecordSource<Receipt>>,
    payments: Arc<dyn RecordSource<Payment>>,
    state: Arc<ConsoleState>,
}

impl TransactionsView {
    pub fn new(
        receipts: Arc<dyn RecordSource<Receipt>>,
        payments: Arc<dyn RecordSource<Payment>>,
        state: Arc<ConsoleState>,
    ) -> Self {
        Self {
            receipts,
            payments,
            state,
        }
    }

    /// Refetch both collections and replace the aggregate.
    ///
    /// On failure the previous aggregate stays in place. When a newer reload
    /// finished first, the newer aggregate is kept and returned.
    #[tracing::instrument(skip(self))]
    pub async fn reload(&self) -> Result<Aggregate, ConsoleError> {
        let ticket = self.state.issue_ticket();

        let aggregate = load_aggregate(self.receipts.as_ref(), self.payments.as_ref())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load transactions"))?;

        if !self.state.store_aggregate(ticket, aggregate.clone()).await {
            tracing::debug!(?ticket, "Discarded transaction load superseded by a newer one");
        }

        tracing::info!(count = aggregate.len(), "Transactions loaded");
        Ok(self.state.aggregate().await.unwrap_or(aggregate))
    }

    pub async fn current(&self) -> Option<Aggregate> {
        self.state.aggregate().await
    }

    /// Visible subset of the last loaded aggregate. Never refetches.
    pub async fn filtered(&self, filter: TransactionFilter) -> Vec<Transaction> {
        filter.apply_to(self.state.aggregate().await.as_ref())
    }
}
