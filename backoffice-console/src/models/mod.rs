pub mod amount;
pub mod company;
pub mod fields;
pub mod payment;
pub mod receipt;
pub mod transaction;

pub use amount::Amount;
pub use company::{CompanyInfo, FinancialSettings, FinancialSummary};
pub use payment::{Payment, PaymentDraft};
pub use receipt::{Receipt, ReceiptDraft};
pub use transaction::{Transaction, TransactionKind};

use rust_decimal::Decimal;
use validator::ValidationError;

pub(crate) fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        let mut err = ValidationError::new("positive");
        err.message = Some("Amount must be greater than zero".into());
        return Err(err);
    }
    Ok(())
}
