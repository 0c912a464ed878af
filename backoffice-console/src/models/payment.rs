use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{fields, validate_positive_amount, Amount};

/// Money paid out.
///
/// Older records name the counterparty with a free-form `payeeName`; newer
/// ones link a customer (`customerId` + `customerName`). Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "fields::text")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "fields::text")]
    pub payee_name: String,
    #[serde(default, deserialize_with = "fields::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::text")]
    pub payment_number: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default, deserialize_with = "fields::text")]
    pub reason: String,
    #[serde(default, deserialize_with = "fields::text")]
    pub signature1: String,
    #[serde(default, deserialize_with = "fields::text")]
    pub signature2: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Payment {
    /// Who was paid: the linked customer when present, else the free-form payee.
    pub fn counterparty(&self) -> &str {
        if self.customer_name.trim().is_empty() {
            &self.payee_name
        } else {
            &self.customer_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Payee cannot be empty"))]
    pub payee_name: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Payment number cannot be empty"))]
    pub payment_number: String,
    #[serde(with = "fields::number")]
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    pub reason: String,
    pub signature1: String,
    pub signature2: String,
}
