//! Record source adapters for receipts and payments.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use validator::Validate;

use super::backend_client::{BackendClient, SourceError};
use super::metrics::record_backend_failure;
use crate::models::{Payment, PaymentDraft, Receipt, ReceiptDraft, TransactionKind};

/// A backend collection of one record type.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    type Draft: Serialize + Validate + Send + Sync;

    /// Collection path, e.g. `/api/receipts`.
    const COLLECTION: &'static str;
    const KIND: TransactionKind;

    fn id(&self) -> i64;
}

impl Record for Receipt {
    type Draft = ReceiptDraft;

    const COLLECTION: &'static str = "/api/receipts";
    const KIND: TransactionKind = TransactionKind::Receipt;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Payment {
    type Draft = PaymentDraft;

    const COLLECTION: &'static str = "/api/payments";
    const KIND: TransactionKind = TransactionKind::Payment;

    fn id(&self) -> i64 {
        self.id
    }
}

/// CRUD access to one record collection. Every call either fully succeeds or
/// fails; drafts are validated before anything is sent.
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError>;
    async fn fetch_one(&self, id: i64) -> Result<R, SourceError>;
    async fn create(&self, draft: &R::Draft) -> Result<R, SourceError>;
    async fn update(&self, id: i64, draft: &R::Draft) -> Result<R, SourceError>;
    async fn delete(&self, id: i64) -> Result<(), SourceError>;
    /// Server-assigned next document number.
    async fn next_number(&self) -> Result<String, SourceError>;
}

pub struct RestRecordSource<R> {
    client: BackendClient,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> RestRecordSource<R> {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::COLLECTION, id)
    }

    fn observe<T>(operation: &'static str, result: Result<T, SourceError>) -> Result<T, SourceError> {
        if let Err(e) = &result {
            if !matches!(e, SourceError::Validation(_)) {
                record_backend_failure(R::KIND.as_str(), operation);
            }
        }
        result
    }
}

impl RestRecordSource<Receipt> {
    /// `GET /api/receipts/customer/{id}`
    pub async fn fetch_for_customer(&self, customer_id: i64) -> Result<Vec<Receipt>, SourceError> {
        let path = format!("{}/customer/{}", Receipt::COLLECTION, customer_id);
        Self::observe("fetch_for_customer", self.client.get_json(&path).await)
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for RestRecordSource<R> {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError> {
        let records: Vec<R> = Self::observe("fetch_all", self.client.get_json(R::COLLECTION).await)?;
        tracing::debug!(kind = R::KIND.as_str(), count = records.len(), "Fetched records");
        Ok(records)
    }

    async fn fetch_one(&self, id: i64) -> Result<R, SourceError> {
        Self::observe("fetch_one", self.client.get_json(&Self::item_path(id)).await)
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, SourceError> {
        draft.validate()?;
        let created: R = Self::observe(
            "create",
            self.client.post_json(R::COLLECTION, draft).await,
        )?;
        tracing::info!(kind = R::KIND.as_str(), id = created.id(), "Created record");
        Ok(created)
    }

    async fn update(&self, id: i64, draft: &R::Draft) -> Result<R, SourceError> {
        draft.validate()?;
        let updated = Self::observe(
            "update",
            self.client.put_json(&Self::item_path(id), draft).await,
        )?;
        tracing::info!(kind = R::KIND.as_str(), id, "Updated record");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), SourceError> {
        Self::observe("delete", self.client.delete(&Self::item_path(id)).await)?;
        tracing::info!(kind = R::KIND.as_str(), id, "Deleted record");
        Ok(())
    }

    async fn next_number(&self) -> Result<String, SourceError> {
        let path = format!("{}/next-number", R::COLLECTION);
        Self::observe("next_number", self.client.get_text(&path).await)
    }
}
