pub mod backend_client;
pub mod company;
pub mod metrics;
pub mod records;

pub use backend_client::{BackendClient, SourceError};
pub use company::{CompanyApi, RestCompanyApi};
pub use records::{Record, RecordSource, RestRecordSource};
