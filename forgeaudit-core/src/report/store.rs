//! Session-keyed in-memory report storage
//!
//! Each session owns one mutable report; renderers always receive a
//! cloned snapshot so concurrent edits cannot race a render in progress.
//! No durability: dropping the store drops every report.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::report::Report;

/// Session key used when the caller does not supply one
pub const DEFAULT_SESSION: &str = "default";

/// In-memory store mapping session identifiers to reports
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: RwLock<HashMap<String, Report>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consistent snapshot of a session's report. Unknown sessions yield
    /// an all-empty report without creating an entry.
    pub async fn snapshot(&self, session: &str) -> Report {
        self.reports
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    /// Apply a field mutation to a session's report, creating the
    /// session on first write. Last write wins per field.
    pub async fn update<F>(&self, session: &str, mutate: F)
    where
        F: FnOnce(&mut Report),
    {
        let mut reports = self.reports.write().await;
        let report = reports.entry(session.to_string()).or_default();
        mutate(report);
    }

    /// Replace a session's report wholesale
    pub async fn replace(&self, session: &str, report: Report) {
        self.reports
            .write()
            .await
            .insert(session.to_string(), report);
    }

    /// Reset a session's report to the all-empty state
    pub async fn clear(&self, session: &str) {
        self.reports.write().await.remove(session);
    }
}
