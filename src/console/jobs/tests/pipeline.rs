use chrono::Duration;

use super::common::{now, seeded_store, today};
use crate::console::jobs::domain::{Job, JobPriority, JobStatus};
use crate::console::jobs::filter::{
    visible_jobs, JobFilters, PriorityFilter, SortDirection, SortField, SortSpec, StatusFilter,
};
use crate::console::jobs::store::JobPatch;

fn sort(field: SortField, direction: SortDirection) -> SortSpec {
    SortSpec { field, direction }
}

fn titles(jobs: &[Job]) -> Vec<&str> {
    jobs.iter().map(|job| job.title.as_str()).collect()
}

/// Mixed fixture: varying statuses, priorities, deadlines, and text.
fn mixed_jobs() -> Vec<Job> {
    let (mut store, jobs) = seeded_store(&[
        "Backend Engineer",
        "Frontend Engineer",
        "Data Analyst",
        "Office Manager",
    ]);

    store
        .update(
            &jobs[0].id,
            JobPatch {
                company: Some("Acme Search".to_string()),
                priority: Some(JobPriority::High),
                deadline: Some(today() + Duration::days(3)),
                ..JobPatch::default()
            },
            "admin",
            now(),
        )
        .expect("backend updates");
    store
        .update(
            &jobs[1].id,
            JobPatch {
                description: Some("Ship the search experience".to_string()),
                priority: Some(JobPriority::Low),
                deadline: Some(today() + Duration::days(1)),
                ..JobPatch::default()
            },
            "admin",
            now(),
        )
        .expect("frontend updates");
    store
        .update(
            &jobs[2].id,
            JobPatch {
                priority: Some(JobPriority::High),
                deadline: Some(today() + Duration::days(3)),
                ..JobPatch::default()
            },
            "admin",
            now(),
        )
        .expect("analyst updates");
    store
        .set_status(&jobs[3].id, JobStatus::Paused, "admin", now())
        .expect("office manager pauses");

    store.list()
}

#[test]
fn search_matches_title_company_and_description_case_insensitively() {
    let jobs = mixed_jobs();
    let filters = JobFilters {
        search: "SEARCH".to_string(),
        ..JobFilters::default()
    };

    let visible = visible_jobs(&jobs, &filters, SortSpec::default());
    let found = titles(&visible);

    assert!(found.contains(&"Backend Engineer"), "company match");
    assert!(found.contains(&"Frontend Engineer"), "description match");
    assert!(!found.contains(&"Data Analyst"));
}

#[test]
fn predicates_commute() {
    let jobs = mixed_jobs();
    let search_only = JobFilters {
        search: "engineer".to_string(),
        ..JobFilters::default()
    };
    let status_only = JobFilters {
        status: StatusFilter::Only(JobStatus::Active),
        ..JobFilters::default()
    };
    let priority_only = JobFilters {
        priority: PriorityFilter::Only(JobPriority::High),
        ..JobFilters::default()
    };
    let combined = JobFilters {
        search: "engineer".to_string(),
        status: StatusFilter::Only(JobStatus::Active),
        priority: PriorityFilter::Only(JobPriority::High),
    };
    let keep_order = SortSpec::default();

    let one = visible_jobs(
        &visible_jobs(
            &visible_jobs(&jobs, &search_only, keep_order),
            &status_only,
            keep_order,
        ),
        &priority_only,
        keep_order,
    );
    let other = visible_jobs(
        &visible_jobs(
            &visible_jobs(&jobs, &priority_only, keep_order),
            &search_only,
            keep_order,
        ),
        &status_only,
        keep_order,
    );
    let direct = visible_jobs(&jobs, &combined, keep_order);

    assert_eq!(titles(&one), titles(&other));
    assert_eq!(titles(&one), titles(&direct));
    assert_eq!(titles(&direct), vec!["Backend Engineer"]);
}

#[test]
fn pipeline_never_mutates_the_source_collection() {
    let jobs = mixed_jobs();
    let original = titles(&jobs)
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let _ = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Title, SortDirection::Descending),
    );

    assert_eq!(
        titles(&jobs),
        original.iter().map(String::as_str).collect::<Vec<_>>()
    );
}

#[test]
fn priority_sorts_by_severity_not_alphabet() {
    let jobs = mixed_jobs();
    let ascending = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Priority, SortDirection::Ascending),
    );

    assert_eq!(
        ascending[0].priority,
        JobPriority::High,
        "ascending surfaces high first"
    );
    assert_eq!(ascending.last().expect("non-empty").priority, JobPriority::Low);

    let descending = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Priority, SortDirection::Descending),
    );
    assert_eq!(descending[0].priority, JobPriority::Low);
}

#[test]
fn status_sorts_by_label_text() {
    let jobs = mixed_jobs();
    let ascending = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Status, SortDirection::Ascending),
    );

    let labels: Vec<&str> = ascending.iter().map(|job| job.status.label()).collect();
    let mut expected = labels.clone();
    expected.sort_unstable();
    assert_eq!(labels, expected, "plain lexicographic label order");
}

#[test]
fn equal_keys_keep_their_filtered_order() {
    let jobs = mixed_jobs();

    // Backend and Data Analyst share priority high and the same deadline.
    for field in [SortField::Priority, SortField::Deadline, SortField::Progress] {
        let sorted = visible_jobs(&jobs, &JobFilters::default(), sort(field, SortDirection::Ascending));
        let backend = sorted
            .iter()
            .position(|job| job.title == "Backend Engineer")
            .expect("backend visible");
        let analyst = sorted
            .iter()
            .position(|job| job.title == "Data Analyst")
            .expect("analyst visible");
        assert!(
            backend < analyst,
            "stable sort keeps insertion order for equal {field:?} keys"
        );
    }
}

#[test]
fn deadline_sorts_chronologically_and_direction_inverts() {
    let jobs = mixed_jobs();
    let ascending = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Deadline, SortDirection::Ascending),
    );
    assert_eq!(ascending[0].title, "Frontend Engineer", "earliest deadline first");

    let descending = visible_jobs(
        &jobs,
        &JobFilters::default(),
        sort(SortField::Deadline, SortDirection::Descending),
    );
    assert_eq!(
        descending.last().expect("non-empty").title,
        "Frontend Engineer"
    );
}

#[test]
fn blank_search_matches_everything() {
    let jobs = mixed_jobs();
    let filters = JobFilters {
        search: "   ".to_string(),
        ..JobFilters::default()
    };
    assert_eq!(
        visible_jobs(&jobs, &filters, SortSpec::default()).len(),
        jobs.len()
    );
}
