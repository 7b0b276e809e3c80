//! Plain-text reports for the non-interactive command line mode.

use anyhow::{anyhow, Result};
use std::fmt::Write;

use crate::api::TrackerApi;
use crate::dashboard::{RoleDashboard, ViewState};
use crate::filters::{self, percentage, SubmissionFilter};
use crate::models::{SessionUser, Submission};
use crate::session::{self, SessionState};
use crate::utils::{display_date, display_timestamp};

/// Sign in with `email` when given, otherwise reuse whatever session the backend reports
pub async fn authenticate(api: &dyn TrackerApi, email: Option<&str>) -> Result<SessionUser> {
    match email {
        Some(email) => session::sign_in(api, email).await.map_err(|e| anyhow!("{}", e)),
        None => match session::verify_session(api).await {
            SessionState::Authenticated(user) => Ok(user),
            SessionState::Unauthenticated => Err(anyhow!("Not signed in; pass --email to sign in")),
        },
    }
}

/// Summary cards for the loaded dashboard, one `label: value` per line
pub fn summary_report(dashboard: &RoleDashboard) -> Result<String> {
    let mut out = String::new();
    match dashboard {
        RoleDashboard::Admin(state) => {
            let data = ready(state)?;
            let s = data.summary_or_default();
            writeln!(out, "Total Team Members: {}", s.unique_members)?;
            writeln!(out, "Total Submissions: {}", s.total_submissions)?;
            writeln!(
                out,
                "Acceptance Rate: {}% ({} accepted / {} rejected)",
                data.acceptance_rate(),
                s.accepted_count,
                s.rejected_count
            )?;
            writeln!(out, "Tasks Changed: {}", s.changed_count)?;
            writeln!(out, "Most Common Mistake: {}", s.most_common_mistake.as_deref().unwrap_or("No data available"))?;
            writeln!(
                out,
                "Reviewer with Most Rejections: {}",
                s.reviewer_with_most_rejected.as_deref().unwrap_or("No data available")
            )?;
            for row in &data.rejection_by_task_type {
                writeln!(
                    out,
                    "  {}: {} accepted, {} rejected ({}% rejected)",
                    row.task_type,
                    row.accepted,
                    row.rejected,
                    row.rejection_percent()
                )?;
            }
        }
        RoleDashboard::Reviewer(state) => {
            let data = ready(state)?;
            let s = data.summary_or_default();
            writeln!(out, "Total Submitted: {}", s.total_submitted)?;
            writeln!(out, "Accepted Tasks: {} (vs {} rejected)", s.accepted_count, s.rejected_count)?;
            writeln!(out, "Leader Reviewed: {}", s.leader_reviewed)?;
            writeln!(out, "QC Alignment: {} aligned / {} misaligned", s.fully_aligned, s.misaligned)?;
            writeln!(out, "Tasks Changed by Leader: {}", s.changed_by_leader)?;
            writeln!(
                out,
                "Last Submission: {}",
                display_date(s.last_submission.as_deref()).unwrap_or_else(|| "No submissions yet".to_string())
            )?;
            let slices = data.mistake_slices();
            let total: u64 = slices.iter().map(|slice| slice.value).sum();
            for slice in &slices {
                writeln!(out, "  {}: {} ({}%)", slice.name, slice.value, percentage(slice.value, total))?;
            }
        }
    }
    Ok(out)
}

/// The caller's visible submissions after filtering, one row each. Each of
/// `columns` names another sheet header to append to every row.
pub fn submissions_report(
    dashboard: &RoleDashboard,
    filter: &SubmissionFilter,
    columns: &[String],
) -> Result<String> {
    let submissions: &[Submission] = match dashboard {
        RoleDashboard::Admin(state) => &ready(state)?.submissions,
        RoleDashboard::Reviewer(state) => &ready(state)?.submissions,
    };
    let rows = filters::filter_submissions(submissions, filter);

    let mut out = String::new();
    if rows.is_empty() {
        writeln!(out, "No submissions found matching your filters")?;
        return Ok(out);
    }
    writeln!(out, "Submissions ({} of {})", rows.len(), submissions.len())?;
    for submission in rows {
        write!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            display_timestamp(submission.timestamp.as_deref()),
            submission.name.as_deref().unwrap_or("Unknown"),
            submission.task_type.as_deref().unwrap_or(""),
            submission.miner_name.as_deref().unwrap_or(""),
            submission.leader_name.as_deref().unwrap_or("None"),
            submission.status_label()
        )?;
        for label in columns {
            write!(out, "\t{}", submission.field(label).unwrap_or_default())?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn ready<T>(state: &ViewState<T>) -> Result<&T> {
    match state {
        ViewState::Ready(data) => Ok(data),
        ViewState::Failed(message) => Err(anyhow!("{}", message)),
        ViewState::Loading => Err(anyhow!("Dashboard data is still loading")),
    }
}
