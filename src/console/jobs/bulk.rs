use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::JobStatus;
use super::selection::Selection;
use super::store::JobStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Activate,
    Pause,
    Delete,
}

impl BulkAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Activate => "Activate",
            Self::Pause => "Pause",
            Self::Delete => "Delete",
        }
    }
}

/// Summary of one bulk pass: how many entities changed and how many
/// selected ids pointed at nothing (stale selection entries).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkOutcome {
    pub affected: usize,
    pub skipped: usize,
}

/// Apply one action to every selected entity, then clear the selection
/// unconditionally. Missing ids are skipped, never errors, so a selection
/// that went stale between render and dispatch still completes.
pub fn apply_bulk(
    store: &mut JobStore,
    selection: &mut Selection,
    action: BulkAction,
    actor: &str,
    now: DateTime<Utc>,
) -> BulkOutcome {
    if selection.is_empty() {
        return BulkOutcome::default();
    }

    let requested = selection.len();
    let outcome = match action {
        BulkAction::Activate => set_statuses(store, selection, JobStatus::Active, actor, now),
        BulkAction::Pause => set_statuses(store, selection, JobStatus::Paused, actor, now),
        BulkAction::Delete => {
            let affected = store.delete_many(selection.ids(), actor, now);
            BulkOutcome {
                affected,
                skipped: requested - affected,
            }
        }
    };

    selection.clear();
    info!(
        action = action.label(),
        affected = outcome.affected,
        skipped = outcome.skipped,
        "bulk action applied"
    );
    outcome
}

fn set_statuses(
    store: &mut JobStore,
    selection: &Selection,
    status: JobStatus,
    actor: &str,
    now: DateTime<Utc>,
) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();
    for id in selection.ids() {
        match store.force_status(id, status, actor, now) {
            Ok(_) => outcome.affected += 1,
            Err(_) => outcome.skipped += 1,
        }
    }
    outcome
}
