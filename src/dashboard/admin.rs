use tracing::{error, info};

use super::ViewState;
use crate::api::TrackerApi;
use crate::filters::{self, percentage, SubmissionFilter};
use crate::models::{Submission, TaskTypeBreakdown, TeamMember, TeamSummary, TrendPoint};

pub const LOAD_ERROR: &str = "Failed to load admin dashboard data";

/// Snapshot behind the admin dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminData {
    pub summary: Option<TeamSummary>,
    pub submissions: Vec<Submission>,
    pub members: Vec<TeamMember>,
    pub rejection_by_task_type: Vec<TaskTypeBreakdown>,
    pub submission_trend: Vec<TrendPoint>,
}

impl AdminData {
    pub fn summary_or_default(&self) -> TeamSummary {
        self.summary.clone().unwrap_or_default()
    }

    /// Whole-number acceptance rate, 0 when nothing was submitted
    pub fn acceptance_rate(&self) -> u64 {
        let summary = self.summary.as_ref();
        percentage(
            summary.map_or(0, |s| s.accepted_count),
            summary.map_or(0, |s| s.total_submissions),
        )
    }

    pub fn task_types(&self) -> Vec<String> {
        filters::task_types(&self.submissions)
    }

    pub fn filtered(&self, filter: &SubmissionFilter) -> Vec<&Submission> {
        filters::filter_submissions(&self.submissions, filter)
    }
}

/// Fetch everything the admin dashboard shows
pub async fn load(api: &dyn TrackerApi) -> ViewState<AdminData> {
    let fetched = futures::try_join!(
        api.team_summary(),
        api.all_submissions(),
        api.team_members(),
        api.rejection_by_task_type(),
        api.submission_trend()
    );

    match fetched {
        Ok((summary, submissions, members, rejection_by_task_type, submission_trend)) => {
            let data = AdminData {
                summary,
                submissions: submissions.unwrap_or_default(),
                members: members.unwrap_or_default(),
                rejection_by_task_type: rejection_by_task_type.unwrap_or_default(),
                submission_trend: submission_trend.unwrap_or_default(),
            };
            info!(
                "Admin dashboard loaded: {} submissions, {} members",
                data.submissions.len(),
                data.members.len()
            );
            ViewState::Ready(data)
        }
        Err(e) => {
            error!(endpoint = e.endpoint(), "Error fetching admin data: {}", e);
            ViewState::Failed(LOAD_ERROR.to_string())
        }
    }
}
