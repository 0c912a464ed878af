use serde::Deserialize;

use super::Aggregate;
use crate::models::{Transaction, TransactionKind};

/// Per-kind visibility toggles for the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    #[serde(rename = "receipts", default = "shown")]
    pub show_receipts: bool,
    #[serde(rename = "payments", default = "shown")]
    pub show_payments: bool,
}

fn shown() -> bool {
    true
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self::ALL
    }
}

impl TransactionFilter {
    pub const ALL: Self = Self {
        show_receipts: true,
        show_payments: true,
    };

    pub const NONE: Self = Self {
        show_receipts: false,
        show_payments: false,
    };

    pub fn only(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Receipt => Self {
                show_receipts: true,
                show_payments: false,
            },
            TransactionKind::Payment => Self {
                show_receipts: false,
                show_payments: true,
            },
        }
    }

    pub fn includes(&self, kind: TransactionKind) -> bool {
        match kind {
            TransactionKind::Receipt => self.show_receipts,
            TransactionKind::Payment => self.show_payments,
        }
    }

    /// The visible subset, in aggregate order. Pure: never refetches or
    /// re-sorts.
    pub fn apply(&self, aggregate: &Aggregate) -> Vec<Transaction> {
        aggregate
            .iter()
            .filter(|t| self.includes(t.kind()))
            .cloned()
            .collect()
    }

    /// Like [`apply`](Self::apply), for an aggregate that may not have
    /// loaded yet.
    pub fn apply_to(&self, aggregate: Option<&Aggregate>) -> Vec<Transaction> {
        aggregate.map(|a| self.apply(a)).unwrap_or_default()
    }
}
