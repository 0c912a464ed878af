use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{fields, validate_positive_amount, Amount};

/// Money received from a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    /// Snapshot of the customer's name when the receipt was issued.
    #[serde(default, deserialize_with = "fields::text")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "fields::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "fields::text")]
    pub receipt_number: String,
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

/// Body for creating or replacing a receipt. The receipt number comes from
/// `GET /api/receipts/next-number`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDraft {
    pub customer_id: Option<i64>,
    #[validate(length(min = 1, message = "Customer name cannot be empty"))]
    pub customer_name: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Receipt number cannot be empty"))]
    pub receipt_number: String,
    #[serde(with = "fields::number")]
    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Decimal,
    pub reason: String,
    pub signature1: String,
    pub signature2: String,
}
