//! Per-view data loading.
//!
//! Each dashboard view fetches its resources once when it is mounted. The
//! fetches are independent, so they run concurrently and the view moves from
//! `Loading` to `Ready` or `Failed` when they have all finished.

use crate::api::TrackerApi;
use crate::models::SessionUser;

pub mod admin;
pub mod reviewer;

pub use admin::AdminData;
pub use reviewer::ReviewerData;

/// Load state of one view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The role-specific dashboard picked for a session
#[derive(Debug, Clone, PartialEq)]
pub enum RoleDashboard {
    Admin(ViewState<AdminData>),
    Reviewer(ViewState<ReviewerData>),
}

impl RoleDashboard {
    /// Unloaded dashboard for `user`'s role
    pub fn for_user(user: &SessionUser) -> Self {
        if user.role.sees_team_data() {
            RoleDashboard::Admin(ViewState::Loading)
        } else {
            RoleDashboard::Reviewer(ViewState::Loading)
        }
    }

    /// Pick the dashboard for `user`'s role and load it
    pub async fn load(api: &dyn TrackerApi, user: &SessionUser) -> Self {
        match Self::for_user(user) {
            RoleDashboard::Admin(_) => RoleDashboard::Admin(admin::load(api).await),
            RoleDashboard::Reviewer(_) => RoleDashboard::Reviewer(reviewer::load(api).await),
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            RoleDashboard::Admin(state) => state.is_loading(),
            RoleDashboard::Reviewer(state) => state.is_loading(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RoleDashboard::Admin(state) => state.error(),
            RoleDashboard::Reviewer(state) => state.error(),
        }
    }
}
