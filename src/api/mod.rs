use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ReviewerSummary, SessionUser, Submission, TaskTypeBreakdown, TeamMember, TeamSummary, TrendPoint,
    VerifyResponse,
};

pub mod tracker_client;
pub use tracker_client::TrackerClient;

/// Backend routes, relative to the configured base URL
pub mod endpoints {
    pub const VERIFY: &str = "/api/auth/verify";
    pub const SIGN_IN: &str = "/api/auth/signin";
    pub const SIGN_OUT: &str = "/api/auth/signout";
    pub const TEAM_SUMMARY: &str = "/api/analytics/summary";
    pub const MY_SUMMARY: &str = "/api/analytics/my";
    pub const SUBMISSIONS: &str = "/api/submissions";
    pub const MY_SUBMISSIONS: &str = "/api/submissions/my";
    pub const USERS: &str = "/api/users";
    pub const REJECTION_BY_TASK_TYPE: &str = "/api/analytics/charts/rejection-by-task-type";
    pub const SUBMISSION_TREND: &str = "/api/analytics/charts/submission-trend";
}

/// Ways a backend call can go wrong
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: u16,
        message: Option<String>,
    },
    #[error("{endpoint} returned malformed JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot build URL for {endpoint}: {source}")]
    InvalidUrl {
        endpoint: &'static str,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    pub fn endpoint(&self) -> &'static str {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. }
            | FetchError::InvalidUrl { endpoint, .. } => endpoint,
        }
    }
}

/// Everything the dashboard needs from the tracker backend.
///
/// Data reads return `Ok(None)` when the backend answers with a non-success
/// status; only transport and decoding problems are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrackerApi: Send + Sync {
    async fn verify_session(&self) -> Result<Option<VerifyResponse>, FetchError>;
    async fn sign_in(&self, email: &str) -> Result<SessionUser, FetchError>;
    async fn sign_out(&self) -> Result<(), FetchError>;

    async fn team_summary(&self) -> Result<Option<TeamSummary>, FetchError>;
    async fn my_summary(&self) -> Result<Option<ReviewerSummary>, FetchError>;
    async fn all_submissions(&self) -> Result<Option<Vec<Submission>>, FetchError>;
    async fn my_submissions(&self) -> Result<Option<Vec<Submission>>, FetchError>;
    async fn team_members(&self) -> Result<Option<Vec<TeamMember>>, FetchError>;
    async fn rejection_by_task_type(&self) -> Result<Option<Vec<TaskTypeBreakdown>>, FetchError>;
    async fn submission_trend(&self) -> Result<Option<Vec<TrendPoint>>, FetchError>;
}
