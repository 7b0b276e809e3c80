use tracing::{error, info};

use super::ViewState;
use crate::api::TrackerApi;
use crate::filters::{self, MistakeSlice};
use crate::models::{ReviewerSummary, Submission};

pub const LOAD_ERROR: &str = "Failed to load dashboard data";

/// Snapshot behind a reviewer's own dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewerData {
    pub summary: Option<ReviewerSummary>,
    pub submissions: Vec<Submission>,
}

impl ReviewerData {
    pub fn summary_or_default(&self) -> ReviewerSummary {
        self.summary.clone().unwrap_or_default()
    }

    pub fn mistake_slices(&self) -> Vec<MistakeSlice> {
        self.summary
            .as_ref()
            .map(|s| filters::mistake_slices(&s.mistake_reasons))
            .unwrap_or_default()
    }

    pub fn recent(&self) -> &[Submission] {
        filters::recent_submissions(&self.submissions)
    }
}

/// Fetch the caller's analytics and submissions
pub async fn load(api: &dyn TrackerApi) -> ViewState<ReviewerData> {
    match futures::try_join!(api.my_summary(), api.my_submissions()) {
        Ok((summary, submissions)) => {
            let data = ReviewerData { summary, submissions: submissions.unwrap_or_default() };
            info!("Reviewer dashboard loaded: {} submissions", data.submissions.len());
            ViewState::Ready(data)
        }
        Err(e) => {
            error!(endpoint = e.endpoint(), "Error fetching user data: {}", e);
            ViewState::Failed(LOAD_ERROR.to_string())
        }
    }
}
