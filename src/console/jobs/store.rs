use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use super::audit::{AuditAction, AuditTrail};
use super::domain::{Job, JobDraft, JobId, JobPriority, JobStatus, JobType};
use super::lifecycle::{self, LifecycleError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error("new jobs must start as draft or active, not {}", .0.label())]
    InvalidInitialStatus(JobStatus),
    #[error("draft is missing a deadline")]
    MissingDeadline,
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Partial update merged onto an existing job by [`JobStore::update`].
///
/// Status and progress are deliberately absent: those writes go through
/// [`JobStore::set_status`] and [`JobStore::set_progress`], which enforce
/// the lifecycle rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub kind: Option<JobType>,
    pub description: Option<String>,
    pub priority: Option<JobPriority>,
    pub deadline: Option<NaiveDate>,
    pub resources: Option<Vec<String>>,
    pub assigned_to: Option<Vec<String>>,
}

impl From<JobDraft> for JobPatch {
    fn from(draft: JobDraft) -> Self {
        Self {
            title: Some(draft.title),
            company: Some(draft.company),
            location: Some(draft.location),
            department: Some(draft.department),
            kind: Some(draft.kind),
            description: Some(draft.description),
            priority: Some(draft.priority),
            deadline: draft.deadline,
            resources: Some(draft.resources),
            assigned_to: Some(draft.assigned_to),
        }
    }
}

/// Canonical in-memory collection of jobs.
///
/// The `Vec` order is the manual (drag) order; every mutation lands here and
/// nowhere else, and each one appends exactly one audit entry per touched job.
#[derive(Debug, Default)]
pub struct JobStore {
    records: Vec<Job>,
    sequence: u64,
    trail: AuditTrail,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> JobId {
        self.sequence += 1;
        JobId(format!("job-{:06}", self.sequence))
    }

    fn record_mut(&mut self, id: &JobId) -> Result<&mut Job, StoreError> {
        self.records
            .iter_mut()
            .find(|job| &job.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Commit a validated draft. Progress always starts at zero; the only
    /// admissible initial statuses are draft and active.
    pub fn create(
        &mut self,
        draft: JobDraft,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Job, StoreError> {
        if !matches!(draft.status, JobStatus::Draft | JobStatus::Active) {
            return Err(StoreError::InvalidInitialStatus(draft.status));
        }
        let deadline = draft.deadline.ok_or(StoreError::MissingDeadline)?;

        let id = self.next_id();
        let job = Job {
            id: id.clone(),
            title: draft.title,
            company: draft.company,
            location: draft.location,
            department: draft.department,
            kind: draft.kind,
            description: draft.description,
            priority: draft.priority,
            deadline,
            resources: draft.resources,
            assigned_to: draft.assigned_to,
            status: draft.status,
            progress: 0,
            created_at: now,
            updated_at: now,
        };
        self.records.push(job.clone());
        self.trail.record(
            id.clone(),
            AuditAction::Created,
            format!("created with status {}", job.status.label()),
            actor,
            now,
        );
        info!(job = %id, status = job.status.label(), "job created");
        Ok(job)
    }

    /// Merge a patch onto an existing record and refresh `updated_at`.
    pub fn update(
        &mut self,
        id: &JobId,
        patch: JobPatch,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Job, StoreError> {
        let job = self.record_mut(id)?;

        if let Some(title) = patch.title {
            job.title = title;
        }
        if let Some(company) = patch.company {
            job.company = company;
        }
        if let Some(location) = patch.location {
            job.location = location;
        }
        if let Some(department) = patch.department {
            job.department = department;
        }
        if let Some(kind) = patch.kind {
            job.kind = kind;
        }
        if let Some(description) = patch.description {
            job.description = description;
        }
        if let Some(priority) = patch.priority {
            job.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            job.deadline = deadline;
        }
        if let Some(resources) = patch.resources {
            job.resources = resources;
        }
        if let Some(assigned_to) = patch.assigned_to {
            job.assigned_to = assigned_to;
        }
        job.updated_at = now;
        let updated = job.clone();

        self.trail
            .record(id.clone(), AuditAction::Updated, "details updated", actor, now);
        debug!(job = %id, "job updated");
        Ok(updated)
    }

    /// Granular status change, checked against the lifecycle table.
    pub fn set_status(
        &mut self,
        id: &JobId,
        status: JobStatus,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Job, StoreError> {
        let job = self.record_mut(id)?;
        lifecycle::check_transition(job.status, status)?;
        job.status = status;
        job.updated_at = now;
        let updated = job.clone();

        let (action, details) = if status == JobStatus::Completed {
            (AuditAction::Completed, "marked completed".to_owned())
        } else {
            (
                AuditAction::StatusChanged,
                format!("status changed to {}", status.label()),
            )
        };
        self.trail.record(id.clone(), action, details, actor, now);
        info!(job = %id, status = status.label(), "status changed");
        Ok(updated)
    }

    /// Bulk transitions write the target status directly; the coordinator
    /// constrains targets to active and paused, so the per-entity transition
    /// table is not consulted here.
    pub(crate) fn force_status(
        &mut self,
        id: &JobId,
        status: JobStatus,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Job, StoreError> {
        let job = self.record_mut(id)?;
        job.status = status;
        job.updated_at = now;
        let updated = job.clone();

        self.trail.record(
            id.clone(),
            AuditAction::StatusChanged,
            format!("status changed to {}", status.label()),
            actor,
            now,
        );
        Ok(updated)
    }

    /// Granular progress edit, clamped to 0..=100 and only legal while the
    /// job is active or paused. Hitting 100 does not complete the job.
    pub fn set_progress(
        &mut self,
        id: &JobId,
        progress: u8,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Job, StoreError> {
        let job = self.record_mut(id)?;
        if !lifecycle::accepts_progress(job.status) {
            return Err(LifecycleError::ProgressLocked { status: job.status }.into());
        }
        job.progress = progress.min(100);
        job.updated_at = now;
        let updated = job.clone();

        self.trail.record(
            id.clone(),
            AuditAction::ProgressUpdated,
            format!("progress set to {}%", updated.progress),
            actor,
            now,
        );
        debug!(job = %id, progress = updated.progress, "progress updated");
        Ok(updated)
    }

    /// Remove every matching id in one pass. Missing ids are ignored so a
    /// stale selection never fails the operation. Returns the removed count.
    pub fn delete_many(
        &mut self,
        ids: &BTreeSet<JobId>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> usize {
        let mut removed = Vec::new();
        self.records.retain(|job| {
            if ids.contains(&job.id) {
                removed.push(job.id.clone());
                false
            } else {
                true
            }
        });
        for id in &removed {
            self.trail
                .record(id.clone(), AuditAction::Deleted, "job deleted", actor, now);
        }
        if !removed.is_empty() {
            info!(count = removed.len(), "jobs deleted");
        }
        removed.len()
    }

    /// Splice the dragged job back in immediately before the target,
    /// leaving every other record's relative order untouched. A drag onto
    /// itself or an unknown id is a silent no-op.
    pub fn move_before(
        &mut self,
        dragged: &JobId,
        target: &JobId,
        actor: &str,
        now: DateTime<Utc>,
    ) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.records.iter().position(|job| &job.id == dragged) else {
            return false;
        };
        if !self.records.iter().any(|job| &job.id == target) {
            return false;
        }

        let mut job = self.records.remove(from);
        job.updated_at = now;
        let to = self
            .records
            .iter()
            .position(|job| &job.id == target)
            .unwrap_or(self.records.len());
        self.records.insert(to, job);

        self.trail.record(
            dragged.clone(),
            AuditAction::Reordered,
            format!("moved before {target}"),
            actor,
            now,
        );
        debug!(job = %dragged, before = %target, "job reordered");
        true
    }

    pub fn get(&self, id: &JobId) -> Option<&Job> {
        self.records.iter().find(|job| &job.id == id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.get(id).is_some()
    }

    /// Snapshot of the collection in canonical order. Callers receive clones
    /// and cannot corrupt internal storage through the returned values.
    pub fn list(&self) -> Vec<Job> {
        self.records.to_vec()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }
}
