pub mod financials;
pub mod transactions;

pub use financials::{FinancialsSnapshot, FinancialsView};
pub use transactions::TransactionsView;
