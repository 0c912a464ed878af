//! Receipts and payments merged into one date-ordered list.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

use crate::models::{Payment, Receipt, Transaction, TransactionKind};
use crate::services::{RecordSource, SourceError};

/// The merged transaction list, newest first. Immutable once built; clones
/// share the same backing slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    transactions: Arc<[Transaction]>,
}

/// Sums over an aggregate. Amounts that could not be read count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    #[serde(with = "crate::models::fields::number")]
    pub inflow: Decimal,
    #[serde(with = "crate::models::fields::number")]
    pub outflow: Decimal,
    #[serde(with = "crate::models::fields::number")]
    pub net: Decimal,
}

impl Aggregate {
    /// Tag and merge one receipt stream and one payment stream.
    pub fn build(receipts: Vec<Receipt>, payments: Vec<Payment>) -> Self {
        Self::from_streams([
            receipts.into_iter().map(Transaction::from).collect(),
            payments.into_iter().map(Transaction::from).collect(),
        ])
    }

    /// Concatenate already-tagged streams in the given order, then sort by
    /// date descending. The sort is stable: records sharing a date keep their
    /// concatenation order. Records without a date go last.
    pub fn from_streams<I>(streams: I) -> Self
    where
        I: IntoIterator<Item = Vec<Transaction>>,
    {
        let mut transactions: Vec<Transaction> = streams.into_iter().flatten().collect();
        transactions.sort_by(|a, b| b.date().cmp(&a.date()));

        Self {
            transactions: transactions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn count(&self, kind: TransactionKind) -> usize {
        self.iter().filter(|t| t.kind() == kind).count()
    }

    pub fn totals(&self) -> Totals {
        totals_of(self.iter())
    }
}

pub fn totals_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for t in transactions {
        let amount = t.amount().value_or_zero();
        let sum = match t.kind() {
            TransactionKind::Receipt => &mut totals.inflow,
            TransactionKind::Payment => &mut totals.outflow,
        };
        match sum.checked_add(amount) {
            Some(next) => *sum = next,
            None => tracing::warn!(
                kind = t.kind().as_str(),
                id = t.id(),
                amount = %amount,
                "Amount overflows the running total; left out"
            ),
        }
    }
    totals.net = totals.inflow - totals.outflow;
    totals
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Fetch both collections concurrently and merge them.
///
/// Both fetches must succeed: the first failure is returned and no aggregate
/// is produced, so callers keep whatever they displayed before.
pub async fn load_aggregate(
    receipts: &dyn RecordSource<Receipt>,
    payments: &dyn RecordSource<Payment>,
) -> Result<Aggregate, SourceError> {
    let (receipts, payments) = tokio::try_join!(receipts.fetch_all(), payments.fetch_all())?;

    tracing::debug!(
        receipts = receipts.len(),
        payments = payments.len(),
        "Merging transaction streams"
    );

    Ok(Aggregate::build(receipts, payments))
}


#[cfg(test)]
mod tests {
    use super::test_support::{payment, receipt};
    use super::*;
    use async_trait::async_trait;

    #[test]
    fn sorted_newest_first() {
        let aggregate = Aggregate::build(
            vec![receipt(1, "2024-01-05", 10), receipt(2, "2024-03-01", 20)],
            vec![payment(1, "2024-02-10", 30), payment(2, "2023-12-31", 40)],
        );

        let dates: Vec<_> = aggregate.iter().map(|t| t.date().unwrap().to_string()).collect();
        assert_eq!(dates, ["2024-03-01", "2024-02-10", "2024-01-05", "2023-12-31"]);
        assert!(aggregate
            .as_slice()
            .windows(2)
            .all(|w| w[0].date() >= w[1].date()));
    }

    #[test]
    fn equal_dates_keep_receipts_then_payments_in_source_order() {
        let aggregate = Aggregate::build(
            vec![receipt(1, "2024-01-10", 1), receipt(2, "2024-01-10", 2)],
            vec![payment(3, "2024-01-10", 3), payment(4, "2024-01-10", 4)],
        );

        let order: Vec<_> = aggregate.iter().map(|t| (t.kind(), t.id())).collect();
        assert_eq!(
            order,
            [
                (TransactionKind::Receipt, 1),
                (TransactionKind::Receipt, 2),
                (TransactionKind::Payment, 3),
                (TransactionKind::Payment, 4),
            ]
        );
    }

    #[test]
    fn keeps_every_record_exactly_once() {
        let receipts: Vec<_> = (1..=7).map(|i| receipt(i, "2024-05-01", 10)).collect();
        let payments: Vec<_> = (1..=4).map(|i| payment(i, "2024-04-01", 5)).collect();

        let aggregate = Aggregate::build(receipts, payments);

        assert_eq!(aggregate.len(), 11);
        assert_eq!(aggregate.count(TransactionKind::Receipt), 7);
        assert_eq!(aggregate.count(TransactionKind::Payment), 4);
    }

    #[test]
    fn empty_side_yields_the_other_side_sorted() {
        let aggregate = Aggregate::build(
            Vec::new(),
            vec![payment(1, "2024-01-01", 5), payment(2, "2024-06-01", 6)],
        );
        let ids: Vec<_> = aggregate.iter().map(|t| t.id()).collect();
        assert_eq!(ids, [2, 1]);

        assert!(Aggregate::build(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn undated_records_sort_last() {
        let mut undated = receipt(9, "2024-01-01", 1);
        undated.date = None;
        let aggregate = Aggregate::build(vec![undated, receipt(1, "2020-01-01", 1)], Vec::new());
        assert_eq!(aggregate.as_slice()[1].id(), 9);
    }

    #[test]
    fn totals_split_inflow_and_outflow() {
        let aggregate = Aggregate::build(
            vec![receipt(1, "2024-01-10", 200)],
            vec![payment(1, "2024-01-10", 80)],
        );
        let totals = aggregate.totals();
        assert_eq!(totals.inflow, Decimal::from(200));
        assert_eq!(totals.outflow, Decimal::from(80));
        assert_eq!(totals.net, Decimal::from(120));
    }

    #[test]
    fn overflowing_amount_is_left_out_of_totals() {
        let mut huge = receipt(1, "2024-01-10", 0);
        huge.amount = crate::models::Amount::Value(Decimal::MAX);
        let mut again = receipt(2, "2024-01-11", 0);
        again.amount = crate::models::Amount::Value(Decimal::MAX);

        let aggregate = Aggregate::build(vec![huge, again], vec![payment(1, "2024-01-10", 5)]);
        let totals = aggregate.totals();
        assert_eq!(totals.inflow, Decimal::MAX);
        assert_eq!(totals.outflow, Decimal::from(5));
        assert_eq!(totals.net, Decimal::MAX - Decimal::from(5));
    }

    struct Fixed<R>(Result<Vec<R>, u16>);

    #[async_trait]
    impl<R: crate::services::Record + Clone> RecordSource<R> for Fixed<R> {
        async fn fetch_all(&self) -> Result<Vec<R>, SourceError> {
            self.0.clone().map_err(|status| SourceError::Server {
                url: R::COLLECTION.to_string(),
                status,
                body: String::new(),
            })
        }
        async fn fetch_one(&self, _id: i64) -> Result<R, SourceError> {
            unimplemented!()
        }
        async fn create(&self, _draft: &R::Draft) -> Result<R, SourceError> {
            unimplemented!()
        }
        async fn update(&self, _id: i64, _draft: &R::Draft) -> Result<R, SourceError> {
            unimplemented!()
        }
        async fn delete(&self, _id: i64) -> Result<(), SourceError> {
            unimplemented!()
        }
        async fn next_number(&self) -> Result<String, SourceError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn join_fails_when_one_side_fails() {
        let receipts = Fixed(Ok(vec![receipt(1, "2024-01-10", 200)]));
        let payments: Fixed<Payment> = Fixed(Err(503));

        let err = load_aggregate(&receipts, &payments).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn join_merges_when_both_succeed() {
        let receipts = Fixed(Ok(vec![receipt(1, "2024-01-10", 200)]));
        let payments = Fixed(Ok(vec![payment(1, "2024-01-10", 80)]));

        let aggregate = load_aggregate(&receipts, &payments).await.unwrap();
        let kinds: Vec<_> = aggregate.iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, [TransactionKind::Receipt, TransactionKind::Payment]);
    }
}
