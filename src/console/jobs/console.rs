use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use super::audit::AuditEntry;
use super::bulk::{apply_bulk, BulkAction, BulkOutcome};
use super::domain::{Job, JobDraft, JobId, JobPriority, JobStatus, JobType};
use super::filter::{visible_jobs, JobFilters, SortSpec};
use super::lifecycle;
use super::refresh::RefreshInterval;
use super::selection::Selection;
use super::store::{JobPatch, JobStore, StoreError};
use super::validation::{validate_draft, ValidationReport};

/// Source of the current instant; a seam so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Selection edits the collaborator layer can request.
#[derive(Debug, Clone)]
pub enum SelectionCommand {
    Toggle(JobId),
    SelectAllVisible,
    Replace(BTreeSet<JobId>),
    Clear,
}

/// Everything the UI can ask the engine to do.
#[derive(Debug, Clone)]
pub enum Command {
    Create(JobDraft),
    Update { id: JobId, draft: JobDraft },
    SetStatus { id: JobId, status: JobStatus },
    SetProgress { id: JobId, progress: u8 },
    Delete(Vec<JobId>),
    Bulk(BulkAction),
    Move { dragged: JobId, target: JobId },
    SetFilters(JobFilters),
    SetSort(SortSpec),
    Selection(SelectionCommand),
    SetRefreshInterval(RefreshInterval),
    Tick,
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One visible row, with display labels and the derived expiry overlay.
#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub department: String,
    pub kind: JobType,
    pub kind_label: String,
    pub description: String,
    pub priority: JobPriority,
    pub priority_label: String,
    pub deadline: NaiveDate,
    pub resources: Vec<String>,
    pub assigned_to: Vec<String>,
    pub status: JobStatus,
    pub display_status: JobStatus,
    pub display_status_label: String,
    pub expired: bool,
    pub progress: u8,
    pub selected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    fn from_job(job: &Job, selected: bool, today: NaiveDate) -> Self {
        let expired = lifecycle::is_expired(job.status, job.deadline, today);
        let display_status = if expired {
            JobStatus::Expired
        } else {
            job.status
        };
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            department: job.department.clone(),
            kind: job.kind,
            kind_label: job.kind.label().to_string(),
            description: job.description.clone(),
            priority: job.priority,
            priority_label: job.priority.label().to_string(),
            deadline: job.deadline,
            resources: job.resources.clone(),
            assigned_to: job.assigned_to.clone(),
            status: job.status,
            display_status,
            display_status_label: display_status.label().to_string(),
            expired,
            progress: job.progress,
            selected,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Read-only projection handed to subscribers after every dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleSnapshot {
    pub jobs: Vec<JobRow>,
    pub total_jobs: usize,
    pub selected: BTreeSet<JobId>,
    pub all_visible_selected: bool,
    pub draft_errors: ValidationReport,
    pub filters: JobFilters,
    pub sort: SortSpec,
    pub refresh_interval: RefreshInterval,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub last_bulk_outcome: Option<BulkOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type SnapshotListener = Box<dyn Fn(&ConsoleSnapshot) + Send>;

/// The engine facade: owns canonical state, executes commands one at a time,
/// and recomputes the derived view after each one.
pub struct JobConsole {
    store: JobStore,
    filters: JobFilters,
    sort: SortSpec,
    selection: Selection,
    draft_errors: ValidationReport,
    refresh_interval: RefreshInterval,
    last_refreshed: Option<DateTime<Utc>>,
    last_bulk_outcome: Option<BulkOutcome>,
    actor: String,
    clock: Box<dyn Clock>,
    subscribers: Vec<(SubscriberId, SnapshotListener)>,
    next_subscriber: u64,
}

impl JobConsole {
    pub fn new(actor: impl Into<String>) -> Self {
        Self::with_clock(actor, SystemClock)
    }

    pub fn with_clock(actor: impl Into<String>, clock: impl Clock + 'static) -> Self {
        Self {
            store: JobStore::new(),
            filters: JobFilters::default(),
            sort: SortSpec::default(),
            selection: Selection::new(),
            draft_errors: ValidationReport::default(),
            refresh_interval: RefreshInterval::default(),
            last_refreshed: None,
            last_bulk_outcome: None,
            actor: actor.into(),
            clock: Box::new(clock),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Run one command to completion, then notify subscribers with the new
    /// snapshot. Validation failures are not errors: they land in the
    /// snapshot's `draft_errors` and the commit simply does not happen.
    pub fn dispatch(&mut self, command: Command) -> Result<ConsoleSnapshot, ConsoleError> {
        let now = self.clock.now();
        let today = self.clock.today();

        match command {
            Command::Create(draft) => {
                let report = validate_draft(&draft, today);
                if report.is_valid() {
                    self.draft_errors = ValidationReport::default();
                    self.store.create(draft, &self.actor, now)?;
                } else {
                    debug!(fields = report.errors().len(), "draft rejected");
                    self.draft_errors = report;
                }
            }
            Command::Update { id, draft } => {
                let report = validate_draft(&draft, today);
                if report.is_valid() {
                    self.draft_errors = ValidationReport::default();
                    self.store
                        .update(&id, JobPatch::from(draft), &self.actor, now)?;
                } else {
                    debug!(job = %id, fields = report.errors().len(), "edit rejected");
                    self.draft_errors = report;
                }
            }
            Command::SetStatus { id, status } => {
                self.store.set_status(&id, status, &self.actor, now)?;
            }
            Command::SetProgress { id, progress } => {
                self.store.set_progress(&id, progress, &self.actor, now)?;
            }
            Command::Delete(ids) => {
                let ids: BTreeSet<JobId> = ids.into_iter().collect();
                self.store.delete_many(&ids, &self.actor, now);
                let remaining: BTreeSet<JobId> =
                    self.store.list().into_iter().map(|job| job.id).collect();
                self.selection.retain_known(&remaining);
            }
            Command::Bulk(action) => {
                let outcome =
                    apply_bulk(&mut self.store, &mut self.selection, action, &self.actor, now);
                self.last_bulk_outcome = Some(outcome);
            }
            Command::Move { dragged, target } => {
                self.store.move_before(&dragged, &target, &self.actor, now);
            }
            Command::SetFilters(filters) => {
                self.filters = filters;
            }
            Command::SetSort(sort) => {
                self.sort = sort;
            }
            Command::Selection(selection) => match selection {
                SelectionCommand::Toggle(id) => self.selection.toggle(id),
                SelectionCommand::SelectAllVisible => {
                    let visible = visible_jobs(&self.store.list(), &self.filters, self.sort);
                    self.selection.select_all(&visible);
                }
                SelectionCommand::Replace(ids) => self.selection.replace(ids),
                SelectionCommand::Clear => self.selection.clear(),
            },
            Command::SetRefreshInterval(interval) => {
                self.refresh_interval = interval;
            }
            Command::Tick => {
                self.last_refreshed = Some(now);
            }
        }

        let snapshot = self.snapshot();
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Recompute the derived view from current state.
    pub fn snapshot(&self) -> ConsoleSnapshot {
        let today = self.clock.today();
        let visible = visible_jobs(&self.store.list(), &self.filters, self.sort);
        let jobs = visible
            .iter()
            .map(|job| JobRow::from_job(job, self.selection.contains(&job.id), today))
            .collect();

        ConsoleSnapshot {
            jobs,
            total_jobs: self.store.len(),
            selected: self.selection.ids().clone(),
            all_visible_selected: self.selection.is_all_visible(&visible),
            draft_errors: self.draft_errors.clone(),
            filters: self.filters.clone(),
            sort: self.sort,
            refresh_interval: self.refresh_interval,
            last_refreshed: self.last_refreshed,
            last_bulk_outcome: self.last_bulk_outcome,
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriberId
    where
        F: Fn(&ConsoleSnapshot) + Send + 'static,
    {
        self.next_subscriber += 1;
        let id = SubscriberId(self.next_subscriber);
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn notify(&self, snapshot: &ConsoleSnapshot) {
        for (_, listener) in &self.subscribers {
            listener(snapshot);
        }
    }

    pub fn audit_entries_for(&self, id: &JobId) -> Vec<&AuditEntry> {
        self.store.trail().entries_for(id)
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn refresh_interval(&self) -> RefreshInterval {
        self.refresh_interval
    }
}
