use chrono::NaiveDate;

use super::common::{draft, today};
use crate::console::jobs::validation::{validate_draft, JobField, TITLE_MAX_CHARS};

#[test]
fn a_complete_draft_passes() {
    let report = validate_draft(&draft("Platform Engineer"), today());
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors());
}

#[test]
fn every_violated_rule_is_reported_at_once() {
    let mut bad = draft("");
    bad.description = "ok".to_string();
    bad.deadline = Some(NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"));
    bad.resources = vec![String::new()];
    bad.assigned_to = vec!["x".to_string()];
    bad.department = String::new();
    bad.company = String::new();
    bad.location = String::new();

    let report = validate_draft(&bad, today());

    let fields: Vec<JobField> = report.errors().keys().copied().collect();
    assert_eq!(
        fields,
        vec![
            JobField::Title,
            JobField::Company,
            JobField::Location,
            JobField::Department,
            JobField::Deadline,
            JobField::Resources,
        ],
        "exactly the six violated fields, nothing else"
    );
    assert!(report.message_for(JobField::Description).is_none());
    assert!(report.message_for(JobField::AssignedTo).is_none());
}

#[test]
fn title_over_one_hundred_chars_is_rejected() {
    let mut long = draft("x");
    long.title = "x".repeat(TITLE_MAX_CHARS + 1);
    let report = validate_draft(&long, today());
    assert_eq!(
        report.message_for(JobField::Title),
        Some("Title must be 100 characters or fewer")
    );

    long.title = "x".repeat(TITLE_MAX_CHARS);
    assert!(validate_draft(&long, today()).is_valid());
}

#[test]
fn deadline_today_is_accepted_yesterday_is_not() {
    let mut d = draft("Deadline check");
    d.deadline = Some(today());
    assert!(validate_draft(&d, today()).is_valid());

    d.deadline = Some(today().pred_opt().expect("valid date"));
    let report = validate_draft(&d, today());
    assert_eq!(
        report.message_for(JobField::Deadline),
        Some("Deadline cannot be in the past")
    );
}

#[test]
fn blank_entries_do_not_count_toward_resources_or_assignees() {
    let mut d = draft("Blank lists");
    d.resources = vec!["  ".to_string(), "\t".to_string()];
    d.assigned_to = vec![String::new()];
    let report = validate_draft(&d, today());
    assert!(report.message_for(JobField::Resources).is_some());
    assert!(report.message_for(JobField::AssignedTo).is_some());

    d.resources = vec!["  ".to_string(), "brief".to_string()];
    d.assigned_to = vec!["  lee  ".to_string()];
    assert!(validate_draft(&d, today()).is_valid());
}

#[test]
fn whitespace_only_required_strings_are_flagged() {
    let mut d = draft("   ");
    d.description = " \n ".to_string();
    let report = validate_draft(&d, today());
    assert_eq!(report.message_for(JobField::Title), Some("Title is required"));
    assert_eq!(
        report.message_for(JobField::Description),
        Some("Description is required")
    );
}
