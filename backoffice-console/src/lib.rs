pub mod aggregation;
pub mod config;
pub mod error;
pub mod financials;
pub mod handlers;
pub mod models;
pub mod render;
pub mod services;
pub mod startup;
pub mod state;
pub mod tabs;
pub mod utils;
pub mod views;

use models::{Payment, Receipt};
use services::{BackendClient, CompanyApi, RecordSource, RestCompanyApi, RestRecordSource};
use state::ConsoleState;
use std::sync::Arc;
use views::{FinancialsView, TransactionsView};

/// Shared application state: the record sources and the views built on them.
#[derive(Clone)]
pub struct AppState {
    pub receipts: Arc<dyn RecordSource<Receipt>>,
    pub payments: Arc<dyn RecordSource<Payment>>,
    pub transactions: Arc<TransactionsView>,
    pub financials: Arc<FinancialsView>,
}

impl AppState {
    pub fn new(
        receipts: Arc<dyn RecordSource<Receipt>>,
        payments: Arc<dyn RecordSource<Payment>>,
        company: Arc<dyn CompanyApi>,
    ) -> Self {
        let console = Arc::new(ConsoleState::new());
        let transactions = Arc::new(TransactionsView::new(
            receipts.clone(),
            payments.clone(),
            console.clone(),
        ));
        let financials = Arc::new(FinancialsView::new(company, payments.clone(), console));

        Self {
            receipts,
            payments,
            transactions,
            financials,
        }
    }

    /// Every source backed by the same REST backend.
    pub fn from_backend(client: BackendClient) -> Self {
        Self::new(
            Arc::new(RestRecordSource::<Receipt>::new(client.clone())),
            Arc::new(RestRecordSource::<Payment>::new(client.clone())),
            Arc::new(RestCompanyApi::new(client)),
        )
    }
}
