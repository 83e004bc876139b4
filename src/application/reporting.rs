use serde::{Deserialize, Serialize};

use crate::domain::{Period, ReportSummary};

/// What the reports view shows: the selected period and the report table.
/// The period is echoed back only; it filters nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
    pub period: Period,
    pub summaries: Vec<ReportSummary>,
}

impl ReportView {
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Record counts for the session status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub cash_entries: i64,
    pub vault_movements: i64,
}
