use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::error::ConsoleError;
use crate::financials::{
    cost_per_square_meter, matches_summary, total_expenses, ExpenseTotal, SettingsForm,
};
use crate::models::fields::parse_decimal;
use crate::models::{CompanyInfo, Payment};
use crate::services::{CompanyApi, RecordSource};
use crate::state::ConsoleState;

/// What the financials panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialsSnapshot {
    pub company: CompanyInfo,
    pub expenses: ExpenseTotal,
    #[serde(with = "crate::models::fields::number_option")]
    pub cost_per_square_meter: Option<Decimal>,
}

impl FinancialsSnapshot {
    pub fn new(company: CompanyInfo, expenses: ExpenseTotal) -> Self {
        let cost_per_square_meter = cost_per_square_meter(expenses.total, company.square_meters).ok();
        Self {
            company,
            expenses,
            cost_per_square_meter,
        }
    }
}

/// Company settings and expense metrics. Owns the company and expense slots
/// of [`ConsoleState`].
pub struct FinancialsView {
    company: Arc<dyn CompanyApi>,
    payments: Arc<dyn RecordSource<Payment>>,
    state: Arc<ConsoleState>,
}

impl FinancialsView {
    pub fn new(
        company: Arc<dyn CompanyApi>,
        payments: Arc<dyn RecordSource<Payment>>,
        state: Arc<ConsoleState>,
    ) -> Self {
        Self {
            company,
            payments,
            state,
        }
    }

    /// Fetch the company record and all payments, both or neither. The
    /// backend's financial summary is fetched alongside and only compared
    /// against; its failure does not fail the load.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<FinancialsSnapshot, ConsoleError> {
        let ticket = self.state.issue_ticket();

        let (loaded, summary) = tokio::join!(
            async { tokio::try_join!(self.company.fetch_company(), self.payments.fetch_all()) },
            self.company.fetch_financial_summary()
        );
        let (company, payments) = loaded
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load financial data"))?;

        let expenses = total_expenses(&payments);
        match summary {
            Ok(summary) => {
                matches_summary(&expenses, &summary);
            }
            Err(e) => tracing::debug!(error = %e, "Financial summary unavailable"),
        }

        if !self
            .state
            .store_financials(ticket, company.clone(), expenses)
            .await
        {
            tracing::debug!(?ticket, "Discarded financials load superseded by a newer one");
        }

        Ok(self
            .snapshot()
            .await
            .unwrap_or_else(|| FinancialsSnapshot::new(company, expenses)))
    }

    pub async fn snapshot(&self) -> Option<FinancialsSnapshot> {
        let company = self.state.company().await?;
        let expenses = self.state.expenses().await?;
        Some(FinancialsSnapshot::new(company, expenses))
    }

    /// Validate and persist the financial inputs.
    ///
    /// Invalid input is rejected before any request is sent. A second save
    /// while one is in flight fails with [`ConsoleError::Busy`]. All other
    /// company fields are sent back unchanged.
    #[tracing::instrument(skip(self, form))]
    pub async fn save_settings(&self, form: &SettingsForm) -> Result<CompanyInfo, ConsoleError> {
        let settings = form.into_settings()?;
        let _saving = self.state.try_begin_save().ok_or(ConsoleError::Busy)?;

        let current = match self.state.company().await {
            Some(company) => company,
            None => self.company.fetch_company().await?,
        };

        let saved = self
            .company
            .update_company(&current.with_settings(&settings))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to save financial settings"))?;

        self.state.replace_company(saved.clone()).await;
        Ok(saved)
    }

    /// Expense total over square meters. `square_meters` is the operator's
    /// unsaved input; when absent or blank the saved value is used.
    pub async fn cost_per_square_meter(
        &self,
        square_meters: Option<&str>,
    ) -> Result<Decimal, ConsoleError> {
        let expenses = self
            .state
            .expenses()
            .await
            .ok_or(ConsoleError::NotLoaded("financial data"))?;

        let square_meters = match square_meters.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_decimal(raw),
            None => self.state.company().await.and_then(|c| c.square_meters),
        };

        Ok(cost_per_square_meter(expenses.total, square_meters)?)
    }
}
