use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fields;

/// The single company record, including the financial inputs edited on the
/// financials tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Tax office (ΔΟΥ).
    #[serde(default)]
    pub doy: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default, with = "fields::number_option")]
    pub starting_capital: Option<Decimal>,
    #[serde(default, with = "fields::number_option")]
    pub square_meters: Option<Decimal>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Fields this console does not model, sent back untouched on save.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CompanyInfo {
    /// Copy of this record carrying new financial inputs; everything else is
    /// preserved so the PUT does not clear other company fields.
    pub fn with_settings(&self, settings: &FinancialSettings) -> CompanyInfo {
        CompanyInfo {
            starting_capital: Some(settings.starting_capital),
            square_meters: Some(settings.square_meters),
            ..self.clone()
        }
    }
}

/// Validated financial inputs. Build one through
/// [`crate::financials::SettingsForm::into_settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSettings {
    pub starting_capital: Decimal,
    pub square_meters: Decimal,
}

/// `GET /api/company/financial-summary`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(default, deserialize_with = "fields::number_option::deserialize")]
    pub starting_capital: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::number_option::deserialize")]
    pub square_meters: Option<Decimal>,
    #[serde(default, deserialize_with = "fields::number_option::deserialize")]
    pub total_expenses: Option<Decimal>,
}
