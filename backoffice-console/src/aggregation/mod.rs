pub mod aggregate;
pub mod filter;

pub use aggregate::{load_aggregate, totals_of, Aggregate, Totals};
pub use filter::TransactionFilter;
