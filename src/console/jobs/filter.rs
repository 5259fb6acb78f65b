use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::{Job, JobPriority, JobStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFilter {
    #[default]
    All,
    Only(JobPriority),
}

/// Predicates applied to the collection before sorting. All three are ANDed,
/// so the outcome does not depend on the order they are applied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilters {
    pub search: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl JobFilters {
    pub fn matches(&self, job: &Job) -> bool {
        self.matches_search(job) && self.matches_status(job) && self.matches_priority(job)
    }

    /// Case-insensitive substring match over title, company, and description.
    fn matches_search(&self, job: &Job) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        job.title.to_lowercase().contains(&term)
            || job.company.to_lowercase().contains(&term)
            || job.description.to_lowercase().contains(&term)
    }

    fn matches_status(&self, job: &Job) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => job.status == status,
        }
    }

    fn matches_priority(&self, job: &Job) -> bool {
        match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => job.priority == priority,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Priority,
    Deadline,
    Status,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Deadline,
            direction: SortDirection::Ascending,
        }
    }
}

/// Priority compares by severity rank so ascending surfaces "high" first;
/// status intentionally compares its label text, not a severity ranking.
fn compare(field: SortField, a: &Job, b: &Job) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::Deadline => a.deadline.cmp(&b.deadline),
        SortField::Status => a.status.label().cmp(b.status.label()),
        SortField::Progress => a.progress.cmp(&b.progress),
    }
}

/// Derive the visible view: filter, then stable-sort a cloned sequence.
/// The source collection and its canonical order are never touched.
pub fn visible_jobs(jobs: &[Job], filters: &JobFilters, sort: SortSpec) -> Vec<Job> {
    let mut view: Vec<Job> = jobs
        .iter()
        .filter(|job| filters.matches(job))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare(sort.field, a, b);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    view
}
