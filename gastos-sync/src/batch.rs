//! Sequential batch submission of expense drafts.
//!
//! Each draft is awaited before the next one starts, so progress is exact and
//! the gateway never sees more than one request from a batch at a time. A
//! failed draft is counted and the batch moves on; nothing is rolled back.

use std::future::Future;

use gastos_core::ExpenseDraft;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportBatchResult {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportBatchResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}

/// One draft the collaborator rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    /// Position of the draft in the submitted sequence
    pub index: usize,
    pub vendor: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub result: ImportBatchResult,
    pub failures: Vec<SubmissionFailure>,
}

/// Submit every draft in order through `submit_one`.
pub async fn submit_batch<'a, F, Fut>(drafts: &'a [ExpenseDraft], submit_one: F) -> BatchReport
where
    F: FnMut(&'a ExpenseDraft) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    submit_batch_with_progress(drafts, submit_one, |_, _| {}).await
}

/// Like [`submit_batch`], calling `on_progress(done, total)` after each draft.
pub async fn submit_batch_with_progress<'a, F, Fut, P>(
    drafts: &'a [ExpenseDraft],
    mut submit_one: F,
    mut on_progress: P,
) -> BatchReport
where
    F: FnMut(&'a ExpenseDraft) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
    P: FnMut(usize, usize),
{
    let total = drafts.len();
    let mut report = BatchReport::default();
    info!(total, "submitting expense drafts");

    for (index, draft) in drafts.iter().enumerate() {
        report.result.attempted += 1;
        match submit_one(draft).await {
            Ok(()) => report.result.succeeded += 1,
            Err(e) => {
                warn!(index, vendor = %draft.vendor, error = %format!("{e:#}"), "expense submission failed");
                report.result.failed += 1;
                report.failures.push(SubmissionFailure {
                    index,
                    vendor: draft.vendor.clone(),
                    error: format!("{e:#}"),
                });
            }
        }
        on_progress(index + 1, total);
    }

    info!(
        attempted = report.result.attempted,
        succeeded = report.result.succeeded,
        failed = report.result.failed,
        "batch finished"
    );
    report
}
