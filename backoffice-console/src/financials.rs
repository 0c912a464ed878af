//! Derived financial metrics and validation of the editable inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::fields::parse_decimal;
use crate::models::{Amount, FinancialSettings, FinancialSummary, Payment};
use crate::services::metrics::record_malformed_amounts;

/// Sum of all payment amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseTotal {
    #[serde(with = "crate::models::fields::number")]
    pub total: Decimal,
    /// Payments whose amount was missing or unreadable and counted as zero.
    pub malformed: usize,
}

pub fn total_expenses(payments: &[Payment]) -> ExpenseTotal {
    let mut expenses = ExpenseTotal::default();

    for payment in payments {
        match &payment.amount {
            Amount::Value(amount) => match expenses.total.checked_add(*amount) {
                Some(total) => expenses.total = total,
                None => {
                    tracing::warn!(
                        payment_id = payment.id,
                        amount = %amount,
                        "Payment amount overflows the expense total; counted as zero"
                    );
                    expenses.malformed += 1;
                }
            },
            Amount::Missing => {
                tracing::warn!(payment_id = payment.id, "Payment has no amount; counted as zero");
                expenses.malformed += 1;
            }
            Amount::Malformed(raw) => {
                tracing::warn!(
                    payment_id = payment.id,
                    raw = %raw,
                    "Payment amount is not a valid decimal; counted as zero"
                );
                expenses.malformed += 1;
            }
        }
    }

    record_malformed_amounts("payment", expenses.malformed as u64);
    expenses
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetricError {
    #[error("square meters have not been set")]
    SquareMetersUnset,
    #[error("square meters must be greater than zero")]
    SquareMetersNotPositive,
    #[error("cost per square meter is out of range")]
    OutOfRange,
}

/// `total / square_meters`, only for a positive area.
pub fn cost_per_square_meter(
    total_expenses: Decimal,
    square_meters: Option<Decimal>,
) -> Result<Decimal, MetricError> {
    let square_meters = square_meters.ok_or(MetricError::SquareMetersUnset)?;
    if square_meters <= Decimal::ZERO {
        return Err(MetricError::SquareMetersNotPositive);
    }
    total_expenses
        .checked_div(square_meters)
        .ok_or(MetricError::OutOfRange)
}

/// Log when the backend's total disagrees with ours. Returns whether they
/// agree; a summary without a total counts as agreeing.
pub fn matches_summary(expenses: &ExpenseTotal, summary: &FinancialSummary) -> bool {
    match summary.total_expenses {
        Some(server_total) if server_total != expenses.total => {
            tracing::warn!(
                client_total = %expenses.total,
                server_total = %server_total,
                malformed = expenses.malformed,
                "Expense total differs from backend financial summary"
            );
            false
        }
        _ => true,
    }
}

/// The settings form as submitted. Both fields are raw text so that empty or
/// non-numeric input is reported per field instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SettingsForm {
    #[serde(default)]
    #[validate(custom(function = "validate_starting_capital"))]
    pub starting_capital: String,
    #[serde(default)]
    #[validate(custom(function = "validate_square_meters"))]
    pub square_meters: String,
}

impl SettingsForm {
    pub fn into_settings(&self) -> Result<FinancialSettings, ValidationErrors> {
        self.validate()?;

        let starting_capital = parse_decimal(&self.starting_capital)
            .ok_or_else(|| single_error("starting_capital", "decimal"))?;
        let square_meters = parse_decimal(&self.square_meters)
            .ok_or_else(|| single_error("square_meters", "decimal"))?;

        Ok(FinancialSettings {
            starting_capital,
            square_meters,
        })
    }
}

fn single_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    errors
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_starting_capital(raw: &str) -> Result<(), ValidationError> {
    match parse_decimal(raw) {
        None => Err(invalid(
            "decimal",
            "Παρακαλώ εισάγετε έγκυρο αρχικό κεφάλαιο (≥ 0)",
        )),
        Some(v) if v < Decimal::ZERO => Err(invalid(
            "non_negative",
            "Παρακαλώ εισάγετε έγκυρο αρχικό κεφάλαιο (≥ 0)",
        )),
        Some(_) => Ok(()),
    }
}

fn validate_square_meters(raw: &str) -> Result<(), ValidationError> {
    match parse_decimal(raw) {
        None => Err(invalid(
            "decimal",
            "Παρακαλώ εισάγετε έγκυρα τετραγωνικά μέτρα (> 0)",
        )),
        Some(v) if v <= Decimal::ZERO => Err(invalid(
            "positive",
            "Παρακαλώ εισάγετε έγκυρα τετραγωνικά μέτρα (> 0)",
        )),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate::test_support::payment;

    fn form(starting_capital: &str, square_meters: &str) -> SettingsForm {
        SettingsForm {
            starting_capital: starting_capital.to_string(),
            square_meters: square_meters.to_string(),
        }
    }

    #[test]
    fn sums_payments_and_divides_by_area() {
        let payments = vec![payment(1, "2024-01-01", 100), payment(2, "2024-01-02", 50)];

        let expenses = total_expenses(&payments);
        assert_eq!(expenses.total, Decimal::from(150));
        assert_eq!(expenses.malformed, 0);

        let cost = cost_per_square_meter(expenses.total, Some(Decimal::from(50))).unwrap();
        assert_eq!(cost, "3.0".parse::<Decimal>().unwrap());
    }

    #[test]
    fn sum_is_exact_for_cents() {
        let payments: Vec<Payment> = ["0.10", "0.20", "0.30"]
            .iter()
            .enumerate()
            .map(|(i, a)| {
                serde_json::from_value(serde_json::json!({"id": i, "amount": a})).unwrap()
            })
            .collect();
        assert_eq!(total_expenses(&payments).total, "0.60".parse::<Decimal>().unwrap());
    }

    #[test]
    fn malformed_amounts_count_as_zero_and_are_reported() {
        let mut broken = payment(3, "2024-01-03", 0);
        broken.amount = Amount::Malformed("\"abc\"".to_string());
        let mut missing = payment(4, "2024-01-04", 0);
        missing.amount = Amount::Missing;

        let expenses = total_expenses(&[payment(1, "2024-01-01", 100), broken, missing]);
        assert_eq!(expenses.total, Decimal::from(100));
        assert_eq!(expenses.malformed, 2);
    }

    #[test]
    fn overflowing_amount_counts_as_malformed() {
        let mut huge = payment(1, "2024-01-01", 0);
        huge.amount = Amount::Value(Decimal::MAX);
        let mut again = payment(2, "2024-01-02", 0);
        again.amount = Amount::Value(Decimal::MAX);

        let expenses = total_expenses(&[huge, again, payment(3, "2024-01-03", 0)]);
        assert_eq!(expenses.total, Decimal::MAX);
        assert_eq!(expenses.malformed, 1);
    }

    #[test]
    fn metric_undefined_without_positive_area() {
        let total = Decimal::from(150);
        assert_eq!(
            cost_per_square_meter(total, None),
            Err(MetricError::SquareMetersUnset)
        );
        assert_eq!(
            cost_per_square_meter(total, Some(Decimal::ZERO)),
            Err(MetricError::SquareMetersNotPositive)
        );
        assert_eq!(
            cost_per_square_meter(total, Some(Decimal::from(-3))),
            Err(MetricError::SquareMetersNotPositive)
        );
    }

    #[test]
    fn negative_capital_is_rejected_by_field() {
        let errors = form("-1", "10").into_settings().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("starting_capital"));
        assert!(!fields.contains_key("square_meters"));
    }

    #[test]
    fn zero_area_and_empty_capital_both_reported() {
        let errors = form("", "0").into_settings().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("starting_capital"));
        assert!(fields.contains_key("square_meters"));
    }

    #[test]
    fn valid_form_parses() {
        let settings = form("25000", "120,5").into_settings().unwrap();
        assert_eq!(settings.starting_capital, Decimal::from(25_000));
        assert_eq!(settings.square_meters, "120.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn summary_mismatch_is_detected() {
        let expenses = ExpenseTotal {
            total: Decimal::from(150),
            malformed: 0,
        };
        let agreeing = FinancialSummary {
            total_expenses: Some(Decimal::from(150)),
            ..Default::default()
        };
        let differing = FinancialSummary {
            total_expenses: Some(Decimal::from(170)),
            ..Default::default()
        };
        assert!(matches_summary(&expenses, &agreeing));
        assert!(!matches_summary(&expenses, &differing));
        assert!(matches_summary(&expenses, &FinancialSummary::default()));
    }
}
