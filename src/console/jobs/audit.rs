use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    StatusChanged,
    ProgressUpdated,
    Completed,
    Deleted,
    Reordered,
}

impl AuditAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
            Self::StatusChanged => "Status Changed",
            Self::ProgressUpdated => "Progress Updated",
            Self::Completed => "Completed",
            Self::Deleted => "Deleted",
            Self::Reordered => "Reordered",
        }
    }
}

/// One immutable line in a job's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub id: String,
    pub job_id: JobId,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    pub details: String,
    pub actor: String,
}

/// Append-only history of store mutations. Entries are never edited or
/// removed, including after the referenced job is deleted.
#[derive(Debug, Default)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
    sequence: u64,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        job_id: JobId,
        action: AuditAction,
        details: impl Into<String>,
        actor: &str,
        timestamp: DateTime<Utc>,
    ) {
        self.sequence += 1;
        self.entries.push(AuditEntry {
            id: format!("audit-{:06}", self.sequence),
            job_id,
            action,
            timestamp,
            details: details.into(),
            actor: actor.to_owned(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// History for one job in creation order; empty is a valid answer.
    pub fn entries_for(&self, job_id: &JobId) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .filter(|entry| &entry.job_id == job_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
