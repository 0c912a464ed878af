//! The console's shared, in-memory view state.
//!
//! Each slot has exactly one writer: the aggregate is written by
//! [`crate::views::TransactionsView::reload`], the company record and expense
//! total by [`crate::views::FinancialsView`]. Readers get clones and never see
//! a half-built value.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::aggregation::Aggregate;
use crate::financials::ExpenseTotal;
use crate::models::CompanyInfo;

/// Issued to a load when it starts. Only a result carrying a newer ticket than
/// the stored one may replace it, so a slow stale response cannot overwrite a
/// fresher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
struct Slot<T> {
    ticket: Option<LoadTicket>,
    value: Option<T>,
}

impl<T: Clone> Slot<T> {
    fn offer(&mut self, ticket: LoadTicket, value: T) -> bool {
        if self.ticket.is_some_and(|current| current > ticket) {
            return false;
        }
        self.ticket = Some(ticket);
        self.value = Some(value);
        true
    }
}

#[derive(Debug, Default)]
pub struct ConsoleState {
    next_ticket: AtomicU64,
    aggregate: RwLock<Slot<Aggregate>>,
    financials: RwLock<Slot<(CompanyInfo, Option<ExpenseTotal>)>>,
    saving: Mutex<()>,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_ticket(&self) -> LoadTicket {
        LoadTicket(self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub async fn aggregate(&self) -> Option<Aggregate> {
        self.aggregate.read().await.value.clone()
    }

    /// Store a freshly built aggregate. Returns `false` when a newer load has
    /// already been stored and this one was discarded.
    pub async fn store_aggregate(&self, ticket: LoadTicket, aggregate: Aggregate) -> bool {
        self.aggregate.write().await.offer(ticket, aggregate)
    }

    pub async fn company(&self) -> Option<CompanyInfo> {
        self.financials.read().await.value.as_ref().map(|(c, _)| c.clone())
    }

    pub async fn expenses(&self) -> Option<ExpenseTotal> {
        self.financials.read().await.value.as_ref().and_then(|(_, e)| *e)
    }

    pub async fn store_financials(
        &self,
        ticket: LoadTicket,
        company: CompanyInfo,
        expenses: ExpenseTotal,
    ) -> bool {
        self.financials
            .write()
            .await
            .offer(ticket, (company, Some(expenses)))
    }

    /// Replace the company record after a save, keeping the expense total as
    /// it was: still unloaded if no financials load has completed yet.
    /// Takes a fresh ticket so that loads started before the save cannot
    /// overwrite the saved values.
    pub async fn replace_company(&self, company: CompanyInfo) {
        let ticket = self.issue_ticket();
        let mut slot = self.financials.write().await;
        let expenses = slot.value.as_ref().and_then(|(_, e)| *e);
        slot.offer(ticket, (company, expenses));
    }

    /// Claim the single save slot, or `None` while another save runs.
    pub fn try_begin_save(&self) -> Option<MutexGuard<'_, ()>> {
        self.saving.try_lock().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate::test_support::receipt;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn newest_ticket_wins_regardless_of_completion_order() {
        let state = ConsoleState::new();
        let first = state.issue_ticket();
        let second = state.issue_ticket();

        let fresh = Aggregate::build(vec![receipt(2, "2024-02-01", 20)], Vec::new());
        let stale = Aggregate::build(vec![receipt(1, "2024-01-01", 10)], Vec::new());

        assert!(state.store_aggregate(second, fresh.clone()).await);
        assert!(!state.store_aggregate(first, stale).await);
        assert_eq!(state.aggregate().await, Some(fresh));
    }

    #[tokio::test]
    async fn nothing_loaded_initially() {
        let state = ConsoleState::new();
        assert!(state.aggregate().await.is_none());
        assert!(state.company().await.is_none());
        assert!(state.expenses().await.is_none());
    }

    #[tokio::test]
    async fn save_replaces_company_and_keeps_expenses() {
        let state = ConsoleState::new();
        let expenses = ExpenseTotal {
            total: Decimal::from(150),
            malformed: 0,
        };
        let ticket = state.issue_ticket();
        state
            .store_financials(ticket, CompanyInfo::default(), expenses)
            .await;

        let saved = CompanyInfo {
            square_meters: Some(Decimal::from(50)),
            ..Default::default()
        };
        state.replace_company(saved.clone()).await;

        assert_eq!(state.company().await, Some(saved));
        assert_eq!(state.expenses().await, Some(expenses));

        // A load issued before the save finishes late and is discarded.
        assert!(
            !state
                .store_financials(ticket, CompanyInfo::default(), expenses)
                .await
        );
    }

    #[tokio::test]
    async fn save_before_any_load_leaves_expenses_unloaded() {
        let state = ConsoleState::new();
        let saved = CompanyInfo {
            square_meters: Some(Decimal::from(50)),
            ..Default::default()
        };
        state.replace_company(saved.clone()).await;

        assert_eq!(state.company().await, Some(saved));
        assert!(state.expenses().await.is_none());

        // A later load fills the expense total in.
        let expenses = ExpenseTotal {
            total: Decimal::from(80),
            malformed: 0,
        };
        let ticket = state.issue_ticket();
        assert!(
            state
                .store_financials(ticket, CompanyInfo::default(), expenses)
                .await
        );
        assert_eq!(state.expenses().await, Some(expenses));
    }

    #[tokio::test]
    async fn only_one_save_at_a_time() {
        let state = ConsoleState::new();
        let guard = state.try_begin_save();
        assert!(guard.is_some());
        assert!(state.try_begin_save().is_none());
        drop(guard);
        assert!(state.try_begin_save().is_some());
    }
}
