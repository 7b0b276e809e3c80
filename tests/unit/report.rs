//! Text reports printed by the command line mode

use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::fixtures::sample_submissions;
use submission_dashboard::dashboard::{AdminData, RoleDashboard, ViewState};
use submission_dashboard::filters::{SubmissionFilter, TaskTypeFilter};
use submission_dashboard::models::{TaskTypeBreakdown, TeamSummary};
use submission_dashboard::report::{submissions_report, summary_report};

fn admin_dashboard() -> RoleDashboard {
    RoleDashboard::Admin(ViewState::Ready(AdminData {
        summary: Some(TeamSummary {
            total_submissions: 8,
            unique_members: 3,
            accepted_count: 6,
            rejected_count: 2,
            changed_count: 1,
            most_common_mistake: Some("Misread guideline".to_string()),
            reviewer_with_most_rejected: Some("Omar".to_string()),
        }),
        submissions: sample_submissions(),
        rejection_by_task_type: vec![
            TaskTypeBreakdown { task_type: "Mining".to_string(), accepted: 3, rejected: 1, ..Default::default() },
            TaskTypeBreakdown {
                task_type: "Slicing".to_string(),
                accepted: 2,
                rejected: 1,
                total: Some(3),
                rejection_rate: Some(33.33),
            },
        ],
        ..Default::default()
    }))
}

#[test]
fn test_admin_summary_lines() {
    let report = summary_report(&admin_dashboard()).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Total Team Members: 3",
            "Total Submissions: 8",
            "Acceptance Rate: 75% (6 accepted / 2 rejected)",
            "Tasks Changed: 1",
            "Most Common Mistake: Misread guideline",
            "Reviewer with Most Rejections: Omar",
            "  Mining: 3 accepted, 1 rejected (25% rejected)",
            "  Slicing: 2 accepted, 1 rejected (33.33% rejected)",
        ]
    );
}

#[test]
fn test_submissions_report_by_task_type() {
    let filter = SubmissionFilter { task_type: TaskTypeFilter::Only("Slicing".to_string()), ..Default::default() };
    let report = submissions_report(&admin_dashboard(), &filter, &[]).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Submissions (2 of 6)");
    assert!(lines[1].contains("\tSara\tSlicing\t"));
    assert!(lines[2].ends_with("\taccepted"));
}
