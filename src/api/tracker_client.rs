use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use super::{endpoints, FetchError, TrackerApi};
use crate::models::{
    Config, ReviewerSummary, SessionUser, SignInResponse, Submission, TaskTypeBreakdown, TeamMember,
    TeamSummary, TrendPoint, VerifyResponse,
};

/// HTTP client for the submission tracker backend.
///
/// The session lives in a cookie, so the client keeps a cookie jar for its
/// whole lifetime and every request carries it.
pub struct TrackerClient {
    client: Client,
    base_url: Url,
}

impl TrackerClient {
    /// Create a new tracker client
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, endpoint: &'static str) -> Result<Url, FetchError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|source| FetchError::InvalidUrl { endpoint, source })
    }

    async fn read_json<T: DeserializeOwned>(endpoint: &'static str, response: Response) -> Result<T, FetchError> {
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;
        debug!("{} response received: {} bytes", endpoint, body.len());
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    /// GET a JSON resource. A non-success status yields `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<Option<T>, FetchError> {
        let url = self.url_for(endpoint)?;
        debug!("Making request to: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} responded with status {}, leaving it empty", endpoint, status);
            return Ok(None);
        }

        Self::read_json(endpoint, response).await.map(Some)
    }

    /// Pull the backend's `{"error": "..."}` message out of a failed response, if any
    async fn error_message(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        serde_json::from_str::<SignInResponse>(&body).ok()?.error
    }
}

#[async_trait]
impl TrackerApi for TrackerClient {
    async fn verify_session(&self) -> Result<Option<VerifyResponse>, FetchError> {
        self.get_json(endpoints::VERIFY).await
    }

    async fn sign_in(&self, email: &str) -> Result<SessionUser, FetchError> {
        let endpoint = endpoints::SIGN_IN;
        let url = self.url_for(endpoint)?;

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(FetchError::Status { endpoint, status: status.as_u16(), message });
        }

        let body: SignInResponse = Self::read_json(endpoint, response).await?;
        match body.user {
            Some(user) => {
                info!("Signed in as {} ({})", user.email, user.role);
                Ok(user)
            }
            None => Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
                message: body.error,
            }),
        }
    }

    async fn sign_out(&self) -> Result<(), FetchError> {
        let endpoint = endpoints::SIGN_OUT;
        let url = self.url_for(endpoint)?;

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status: status.as_u16(), message: None });
        }
        Ok(())
    }

    async fn team_summary(&self) -> Result<Option<TeamSummary>, FetchError> {
        self.get_json(endpoints::TEAM_SUMMARY).await
    }

    async fn my_summary(&self) -> Result<Option<ReviewerSummary>, FetchError> {
        self.get_json(endpoints::MY_SUMMARY).await
    }

    async fn all_submissions(&self) -> Result<Option<Vec<Submission>>, FetchError> {
        self.get_json(endpoints::SUBMISSIONS).await
    }

    async fn my_submissions(&self) -> Result<Option<Vec<Submission>>, FetchError> {
        self.get_json(endpoints::MY_SUBMISSIONS).await
    }

    async fn team_members(&self) -> Result<Option<Vec<TeamMember>>, FetchError> {
        self.get_json(endpoints::USERS).await
    }

    async fn rejection_by_task_type(&self) -> Result<Option<Vec<TaskTypeBreakdown>>, FetchError> {
        self.get_json(endpoints::REJECTION_BY_TASK_TYPE).await
    }

    async fn submission_trend(&self) -> Result<Option<Vec<TrendPoint>>, FetchError> {
        self.get_json(endpoints::SUBMISSION_TREND).await
    }
}
