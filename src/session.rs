//! Session handling against the tracker's cookie-based auth endpoints.
//!
//! None of these calls can fail from the caller's point of view: a broken
//! verify means "not signed in", a broken sign-out still signs out locally,
//! and sign-in problems come back as a message for the login screen.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{FetchError, TrackerApi};
use crate::models::SessionUser;

/// Who is using the dashboard right now
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(SessionUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Inline message shown on the login screen
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignInError {
    #[error("Email is required")]
    MissingEmail,
    #[error("{0}")]
    Rejected(String),
    #[error("Sign in failed")]
    Failed,
    #[error("Unable to reach the server")]
    Unreachable,
}

/// Ask the backend who owns the current cookie
pub async fn verify_session(api: &dyn TrackerApi) -> SessionState {
    match api.verify_session().await {
        Ok(Some(body)) => match (body.authenticated, body.user) {
            (true, Some(user)) => {
                info!("Session verified for {} ({})", user.email, user.role);
                SessionState::Authenticated(user)
            }
            (true, None) => {
                warn!("Verify reported an authenticated session without a user");
                SessionState::Unauthenticated
            }
            (false, _) => SessionState::Unauthenticated,
        },
        Ok(None) => SessionState::Unauthenticated,
        Err(e) => {
            error!("Auth check failed: {}", e);
            SessionState::Unauthenticated
        }
    }
}

/// Sign in by email
pub async fn sign_in(api: &dyn TrackerApi, email: &str) -> Result<SessionUser, SignInError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SignInError::MissingEmail);
    }

    api.sign_in(email).await.map_err(|e| {
        warn!("Sign in for {} failed: {}", email, e);
        match e {
            FetchError::Status { message: Some(message), .. } if !message.trim().is_empty() => {
                SignInError::Rejected(message)
            }
            FetchError::Transport { .. } => SignInError::Unreachable,
            _ => SignInError::Failed,
        }
    })
}

/// Tell the backend to drop the session. Local state is cleared whatever it answers.
pub async fn sign_out(api: &dyn TrackerApi) -> SessionState {
    if let Err(e) = api.sign_out().await {
        error!("Logout error: {}", e);
    }
    SessionState::Unauthenticated
}
