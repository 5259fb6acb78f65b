use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::JobDraft;

pub const TITLE_MAX_CHARS: usize = 100;

/// Form fields a validation failure can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    Title,
    Company,
    Location,
    Department,
    Description,
    Deadline,
    Resources,
    AssignedTo,
}

impl JobField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Company => "company",
            Self::Location => "location",
            Self::Department => "department",
            Self::Description => "description",
            Self::Deadline => "deadline",
            Self::Resources => "resources",
            Self::AssignedTo => "assigned_to",
        }
    }
}

/// Field-level validation outcome; empty iff the draft can be committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: BTreeMap<JobField, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<JobField, String> {
        &self.errors
    }

    pub fn message_for(&self, field: JobField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn flag(&mut self, field: JobField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

fn non_blank_count(entries: &[String]) -> usize {
    entries.iter().filter(|entry| !entry.trim().is_empty()).count()
}

/// Check every rule independently so a submission with several problems
/// reports all of them at once.
pub fn validate_draft(draft: &JobDraft, today: NaiveDate) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.title.trim().is_empty() {
        report.flag(JobField::Title, "Title is required");
    } else if draft.title.chars().count() > TITLE_MAX_CHARS {
        report.flag(JobField::Title, "Title must be 100 characters or fewer");
    }

    if draft.company.trim().is_empty() {
        report.flag(JobField::Company, "Company is required");
    }

    if draft.location.trim().is_empty() {
        report.flag(JobField::Location, "Location is required");
    }

    if draft.department.trim().is_empty() {
        report.flag(JobField::Department, "Department is required");
    }

    if draft.description.trim().is_empty() {
        report.flag(JobField::Description, "Description is required");
    }

    match draft.deadline {
        None => report.flag(JobField::Deadline, "Deadline is required"),
        Some(deadline) if deadline < today => {
            report.flag(JobField::Deadline, "Deadline cannot be in the past");
        }
        Some(_) => {}
    }

    if non_blank_count(&draft.resources) == 0 {
        report.flag(JobField::Resources, "At least one resource is required");
    }

    if non_blank_count(&draft.assigned_to) == 0 {
        report.flag(JobField::AssignedTo, "At least one assignee is required");
    }

    report
}
