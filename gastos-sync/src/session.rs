//! Review flow for one statement import: parse -> review -> submit -> clear.
//!
//! Every transition consumes the session and returns the next one, so drafts
//! that are being submitted can no longer be reviewed or submitted again.

use gastos_core::ExpenseDraft;
use gastos_ingest::{ParsedStatement, SkippedRow};

use crate::batch::BatchReport;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportSession {
    #[default]
    Idle,
    /// Drafts parsed and waiting for the user
    Reviewing(ParsedStatement),
    /// Drafts were sent and cleared; only the report is left
    Submitted(BatchReport),
}

impl ImportSession {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Replace whatever the session holds with a freshly parsed statement.
    pub fn load(self, parsed: ParsedStatement) -> Self {
        Self::Reviewing(parsed)
    }

    pub fn drafts(&self) -> &[ExpenseDraft] {
        match self {
            Self::Reviewing(parsed) => &parsed.drafts,
            _ => &[],
        }
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        match self {
            Self::Reviewing(parsed) => &parsed.skipped,
            _ => &[],
        }
    }

    pub fn report(&self) -> Option<&BatchReport> {
        match self {
            Self::Submitted(report) => Some(report),
            _ => None,
        }
    }

    /// Take the drafts out for submission.
    ///
    /// Gives the session back unchanged when there is nothing to submit.
    pub fn begin_submit(self) -> Result<Submission, ImportSession> {
        match self {
            Self::Reviewing(parsed) if !parsed.drafts.is_empty() => Ok(Submission {
                drafts: parsed.drafts,
            }),
            other => Err(other),
        }
    }

    /// Drop drafts and report.
    pub fn clear(self) -> Self {
        Self::Idle
    }
}

/// Drafts in flight. Only [`Submission::finish`] leads back to a session.
#[derive(Debug)]
pub struct Submission {
    drafts: Vec<ExpenseDraft>,
}

impl Submission {
    pub fn drafts(&self) -> &[ExpenseDraft] {
        &self.drafts
    }

    /// Record the outcome. Drafts are cleared whatever the outcome was.
    pub fn finish(self, report: BatchReport) -> ImportSession {
        ImportSession::Submitted(report)
    }
}
