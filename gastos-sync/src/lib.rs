//! gastos-sync: sequential draft submission, the import session and the gateway client

pub mod batch;
pub mod gateway;
pub mod session;

pub use batch::{BatchReport, ImportBatchResult, SubmissionFailure, submit_batch, submit_batch_with_progress};
pub use gateway::GatewayClient;
pub use session::{ImportSession, Submission};
