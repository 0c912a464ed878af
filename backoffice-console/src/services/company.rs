use async_trait::async_trait;

use super::backend_client::{BackendClient, SourceError};
use super::metrics::record_backend_failure;
use crate::models::{CompanyInfo, FinancialSummary};

const COMPANY_PATH: &str = "/api/company";
const FINANCIAL_SUMMARY_PATH: &str = "/api/company/financial-summary";

/// The company record and its server-computed financial summary.
#[async_trait]
pub trait CompanyApi: Send + Sync {
    async fn fetch_company(&self) -> Result<CompanyInfo, SourceError>;
    async fn update_company(&self, company: &CompanyInfo) -> Result<CompanyInfo, SourceError>;
    async fn fetch_financial_summary(&self) -> Result<FinancialSummary, SourceError>;
}

pub struct RestCompanyApi {
    client: BackendClient,
}

impl RestCompanyApi {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompanyApi for RestCompanyApi {
    async fn fetch_company(&self) -> Result<CompanyInfo, SourceError> {
        self.client.get_json(COMPANY_PATH).await.inspect_err(|_| {
            record_backend_failure("company", "fetch");
        })
    }

    async fn update_company(&self, company: &CompanyInfo) -> Result<CompanyInfo, SourceError> {
        let saved: CompanyInfo = self
            .client
            .put_json(COMPANY_PATH, company)
            .await
            .inspect_err(|_| record_backend_failure("company", "update"))?;
        tracing::info!(
            starting_capital = ?saved.starting_capital,
            square_meters = ?saved.square_meters,
            "Saved company settings"
        );
        Ok(saved)
    }

    async fn fetch_financial_summary(&self) -> Result<FinancialSummary, SourceError> {
        self.client
            .get_json(FINANCIAL_SUMMARY_PATH)
            .await
            .inspect_err(|_| record_backend_failure("company", "financial_summary"))
    }
}
