//! Filter bar semantics and chart reshaping

use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::fixtures::{sample_submissions, submission};
use crate::common::logging::{init_test_logging, log_test_step};
use submission_dashboard::filters::{
    filter_submissions, mistake_slices, percentage, recent_submissions, task_types, StatusFilter,
    SubmissionFilter, TaskTypeFilter, UNKNOWN_REASON,
};
use submission_dashboard::models::{MistakeReasons, Submission};

fn names(rows: &[&Submission]) -> Vec<String> {
    rows.iter().filter_map(|s| s.name.clone()).collect()
}

fn filters_under_test() -> Vec<SubmissionFilter> {
    let mut out = Vec::new();
    for term in ["", "sara", "BIL", "min", "nobody"] {
        for status in [StatusFilter::All, StatusFilter::Accepted, StatusFilter::Rejected] {
            for task_type in [
                TaskTypeFilter::All,
                TaskTypeFilter::Only("Mining".to_string()),
                TaskTypeFilter::Only("Slicing".to_string()),
            ] {
                out.push(SubmissionFilter { term: term.to_string(), status, task_type });
            }
        }
    }
    out
}

#[test]
fn test_rejected_scenario() {
    let submissions = vec![submission("A", "X", "Accepted"), submission("B", "Y", "Rejected")];
    let filter = SubmissionFilter { status: StatusFilter::Rejected, ..Default::default() };
    assert_eq!(names(&filter_submissions(&submissions, &filter)), vec!["B".to_string()]);
}

#[test]
fn test_results_are_an_ordered_subset_satisfying_every_predicate() {
    init_test_logging();
    log_test_step("Checking filter results against each predicate");

    let submissions = sample_submissions();
    for filter in filters_under_test() {
        let rows = filter_submissions(&submissions, &filter);

        // Subsequence of the input, in order
        let mut positions = rows
            .iter()
            .map(|row| submissions.iter().position(|s| std::ptr::eq(s, *row)).expect("row comes from input"));
        let mut last = None;
        for position in &mut positions {
            assert!(last.map_or(true, |l| position > l), "order broken for {:?}", filter);
            last = Some(position);
        }

        for row in &rows {
            if let Some(label) = filter.status.required_label() {
                assert_eq!(row.review_status.as_deref(), Some(label));
            }
            if let TaskTypeFilter::Only(task_type) = &filter.task_type {
                assert_eq!(row.task_type.as_deref(), Some(task_type.as_str()));
            }
            if !filter.term.is_empty() {
                let needle = filter.term.to_lowercase();
                let hit = [&row.name, &row.task_type, &row.miner_name]
                    .into_iter()
                    .flatten()
                    .any(|v| v.to_lowercase().contains(&needle));
                assert!(hit, "{:?} does not contain {:?}", row.name, filter.term);
            }
        }
    }
}

#[test]
fn test_identity_filter_keeps_everything() {
    let submissions = sample_submissions();
    let filter = SubmissionFilter::default();
    assert!(filter.is_identity());
    assert_eq!(filter_submissions(&submissions, &filter).len(), submissions.len());
}

#[test]
fn test_search_is_case_insensitive_over_three_fields() {
    let submissions = sample_submissions();
    let by_term = |term: &str| {
        let filter = SubmissionFilter { term: term.to_string(), ..Default::default() };
        names(&filter_submissions(&submissions, &filter))
    };

    // "bil" hits Bilal's name and Omar's miner field
    assert_eq!(by_term("bil"), vec!["Bilal".to_string(), "Omar".to_string()]);
    assert_eq!(by_term("SARA"), vec!["Sara".to_string(), "sara".to_string()]);
    assert_eq!(by_term("qc"), vec!["Hina".to_string()]);
}

#[test]
fn test_status_match_is_exact() {
    let submissions = sample_submissions();
    let filter = SubmissionFilter { status: StatusFilter::Accepted, ..Default::default() };
    // lowercase "accepted" does not count
    assert_eq!(names(&filter_submissions(&submissions, &filter)), vec!["Bilal".to_string(), "Zain".to_string()]);
}

#[test]
fn test_task_type_enumeration() {
    let types = task_types(&sample_submissions());
    assert_eq!(types, vec!["Mining".to_string(), "Slicing".to_string(), "QC".to_string()]);

    // Cycling visits each type once, then wraps to all
    let mut filter = TaskTypeFilter::All;
    let mut seen = Vec::new();
    for _ in 0..types.len() {
        filter = filter.next(&types);
        seen.push(filter.to_string());
    }
    assert_eq!(seen, types);
    assert_eq!(filter.next(&types), TaskTypeFilter::All);
}

#[test]
fn test_mistake_slices_keep_sum_and_name_blank_reason() {
    let reasons = MistakeReasons::from_iter([("Misread guideline", 4u64), ("", 2), ("Rushed", 1)]);
    let slices = mistake_slices(&reasons);

    assert_eq!(slices.iter().map(|s| s.value).sum::<u64>(), reasons.total());
    assert_eq!(slices[1].name, UNKNOWN_REASON);
    assert_eq!(slices[0].name, "Misread guideline");
    assert!(mistake_slices(&MistakeReasons::default()).is_empty());
}

#[test]
fn test_percentage_and_recent_limit() {
    assert_eq!(percentage(0, 0), 0);
    assert_eq!(percentage(1, 3), 33);
    assert_eq!(percentage(2, 3), 67);

    let many = vec![Submission::default(); 25];
    assert_eq!(recent_submissions(&many).len(), 10);
    assert_eq!(recent_submissions(&many[..4]).len(), 4);
}

#[test]
fn test_status_filter_cli_values() {
    assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
    assert_eq!(StatusFilter::parse("Rejected"), Some(StatusFilter::Rejected));
    assert_eq!(StatusFilter::parse("pending"), None);
    assert_eq!(TaskTypeFilter::parse("Mining"), TaskTypeFilter::Only("Mining".to_string()));
}
