use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Amount, Payment, Receipt};

/// Which stream a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Receipt,
    Payment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Receipt => "receipt",
            Self::Payment => "payment",
        }
    }

    /// Label shown on the transaction card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Receipt => "Είσπραξη",
            Self::Payment => "Πληρωμή",
        }
    }

    /// Receipts are inflows, payments outflows.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Receipt => Decimal::ONE,
            Self::Payment => Decimal::NEGATIVE_ONE,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A receipt or payment as shown in the combined list. The stored amount is
/// never negative; the sign comes from the kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    Receipt(Receipt),
    Payment(Payment),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Receipt(_) => TransactionKind::Receipt,
            Transaction::Payment(_) => TransactionKind::Payment,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Transaction::Receipt(r) => r.id,
            Transaction::Payment(p) => p.id,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Transaction::Receipt(r) => r.date,
            Transaction::Payment(p) => p.date,
        }
    }

    pub fn amount(&self) -> &Amount {
        match self {
            Transaction::Receipt(r) => &r.amount,
            Transaction::Payment(p) => &p.amount,
        }
    }

    pub fn signed_amount(&self) -> Decimal {
        self.amount().value_or_zero() * self.kind().sign()
    }

    pub fn counterparty(&self) -> &str {
        match self {
            Transaction::Receipt(r) => &r.customer_name,
            Transaction::Payment(p) => p.counterparty(),
        }
    }

    pub fn number(&self) -> &str {
        match self {
            Transaction::Receipt(r) => &r.receipt_number,
            Transaction::Payment(p) => &p.payment_number,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Transaction::Receipt(r) => &r.reason,
            Transaction::Payment(p) => &p.reason,
        }
    }
}

impl From<Receipt> for Transaction {
    fn from(receipt: Receipt) -> Self {
        Transaction::Receipt(receipt)
    }
}

impl From<Payment> for Transaction {
    fn from(payment: Payment) -> Self {
        Transaction::Payment(payment)
    }
}
