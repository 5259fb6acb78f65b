use std::collections::BTreeSet;

use super::domain::{Job, JobId};

/// The set of jobs a bulk action will touch. Derived from the visible view
/// by the caller; the engine only stores ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<JobId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: JobId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = JobId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn select_all(&mut self, visible: &[Job]) {
        self.ids = visible.iter().map(|job| job.id.clone()).collect();
    }

    pub fn retain_known(&mut self, known: &BTreeSet<JobId>) {
        self.ids.retain(|id| known.contains(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<JobId> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The select-all checkbox state: true iff the selection is exactly the
    /// non-empty visible set. Always recomputed against the current view so
    /// a filter change can never leave a stale "all selected" answer.
    pub fn is_all_visible(&self, visible: &[Job]) -> bool {
        !visible.is_empty()
            && visible.len() == self.ids.len()
            && visible.iter().all(|job| self.ids.contains(&job.id))
    }
}
