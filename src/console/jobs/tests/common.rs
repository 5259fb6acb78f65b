use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::console::jobs::console::{Clock, JobConsole};
use crate::console::jobs::domain::{Job, JobDraft, JobId, JobPriority, JobStatus, JobType};
use crate::console::jobs::store::JobStore;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date")
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock {
    pub now: DateTime<Utc>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

pub(super) fn draft(title: &str) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        company: "Northwind Labs".to_string(),
        location: "Remote".to_string(),
        department: "Engineering".to_string(),
        kind: JobType::FullTime,
        description: "Own the hiring pipeline tooling".to_string(),
        priority: JobPriority::Medium,
        deadline: Some(today() + Duration::days(14)),
        resources: vec!["Onboarding brief".to_string()],
        assigned_to: vec!["dana".to_string()],
        status: JobStatus::Draft,
    }
}

pub(super) fn active_draft(title: &str) -> JobDraft {
    JobDraft {
        status: JobStatus::Active,
        ..draft(title)
    }
}

pub(super) fn console() -> JobConsole {
    JobConsole::with_clock("admin", FixedClock { now: now() })
}

/// Store pre-loaded with one active job per title, in the given order.
pub(super) fn seeded_store(titles: &[&str]) -> (JobStore, Vec<Job>) {
    let mut store = JobStore::new();
    let jobs = titles
        .iter()
        .map(|title| {
            store
                .create(active_draft(title), "admin", now())
                .expect("seed job creates")
        })
        .collect();
    (store, jobs)
}

pub(super) fn ids(jobs: &[Job]) -> Vec<JobId> {
    jobs.iter().map(|job| job.id.clone()).collect()
}
