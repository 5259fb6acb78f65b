use chrono::NaiveDate;

use super::domain::JobStatus;

/// Errors raised when a status or progress write breaks the lifecycle rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot transition job from {} to {}", .from.label(), .to.label())]
    IllegalTransition { from: JobStatus, to: JobStatus },
    #[error("progress can only change while a job is active or paused (currently {})", .status.label())]
    ProgressLocked { status: JobStatus },
}

/// Legal single-entity transitions: draft publishes to active, active and
/// paused swap freely, and either of those can settle to completed or failed.
/// Expired is never a transition target; it is a display overlay.
pub fn can_transition(from: JobStatus, to: JobStatus) -> bool {
    use JobStatus::*;

    matches!(
        (from, to),
        (Draft, Active)
            | (Active, Paused)
            | (Paused, Active)
            | (Active, Completed)
            | (Paused, Completed)
            | (Active, Failed)
            | (Paused, Failed)
    )
}

pub fn check_transition(from: JobStatus, to: JobStatus) -> Result<(), LifecycleError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(LifecycleError::IllegalTransition { from, to })
    }
}

/// Progress is only meaningful while a job is being worked.
pub const fn accepts_progress(status: JobStatus) -> bool {
    matches!(status, JobStatus::Active | JobStatus::Paused)
}

/// Derived display condition: the deadline lapsed and the job never completed.
/// The store does not write this back as a status.
pub fn is_expired(status: JobStatus, deadline: NaiveDate, today: NaiveDate) -> bool {
    deadline < today && status != JobStatus::Completed
}
