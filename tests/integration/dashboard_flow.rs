//! Loading the role dashboards from a mock tracker backend

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::backend::{client_for, serve_json, serve_status};
use crate::common::fixtures::{admin_user, reviewer_user, submission_json};
use crate::common::logging::{init_test_logging, log_test_step};
use submission_dashboard::api::{endpoints, TrackerClient};
use submission_dashboard::dashboard::{admin, reviewer, RoleDashboard, ViewState};
use submission_dashboard::models::Config;

async fn serve_admin_backend(server: &MockServer) {
    serve_json(
        server,
        endpoints::TEAM_SUMMARY,
        json!({
            "total_submissions": 2,
            "unique_members": 2,
            "accepted_count": 1,
            "rejected_count": 1,
            "changed_count": 0,
            "most_common_mistake": "Misread guideline",
            "reviewer_with_most_rejected": null,
        }),
    )
    .await;
    serve_json(
        server,
        endpoints::SUBMISSIONS,
        json!([submission_json("A", "X", "Accepted"), submission_json("B", "Y", "Rejected")]),
    )
    .await;
    serve_json(
        server,
        endpoints::REJECTION_BY_TASK_TYPE,
        json!([{ "task_type": "X", "accepted": 1, "rejected": 0 }, { "task_type": "Y", "accepted": 0, "rejected": 1 }]),
    )
    .await;
    serve_json(server, endpoints::SUBMISSION_TREND, json!([{ "date": "2025-01-15", "count": 2 }])).await;
}

#[test_log::test(tokio::test)]
async fn test_admin_load_with_one_forbidden_endpoint() {
    init_test_logging();
    log_test_step("Admin load where /api/users is forbidden");

    let server = MockServer::start().await;
    serve_admin_backend(&server).await;
    serve_status(&server, endpoints::USERS, 403).await;

    let dashboard = RoleDashboard::load(&client_for(&server), &admin_user()).await;
    let data = match dashboard {
        RoleDashboard::Admin(ViewState::Ready(data)) => data,
        other => panic!("expected a ready admin dashboard, got {:?}", other),
    };

    assert!(data.members.is_empty());
    assert_eq!(data.submissions.len(), 2);
    assert_eq!(data.rejection_by_task_type.len(), 2);
    assert_eq!(data.submission_trend.len(), 1);
    assert_eq!(data.acceptance_rate(), 50);
    assert_eq!(data.task_types(), vec!["X".to_string(), "Y".to_string()]);
}

#[test_log::test(tokio::test)]
async fn test_admin_load_with_malformed_body_fails() {
    let server = MockServer::start().await;
    serve_admin_backend(&server).await;
    Mock::given(method("GET"))
        .and(path(endpoints::USERS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dashboard = RoleDashboard::load(&client_for(&server), &admin_user()).await;
    assert_eq!(dashboard.error(), Some(admin::LOAD_ERROR));
    assert_matches!(dashboard, RoleDashboard::Admin(ViewState::Failed(_)));
}

#[test_log::test(tokio::test)]
async fn test_admin_load_with_every_endpoint_down() {
    let server = MockServer::start().await;
    for endpoint in [
        endpoints::TEAM_SUMMARY,
        endpoints::SUBMISSIONS,
        endpoints::USERS,
        endpoints::REJECTION_BY_TASK_TYPE,
        endpoints::SUBMISSION_TREND,
    ] {
        serve_status(&server, endpoint, 500).await;
    }

    let state = admin::load(&client_for(&server)).await;
    let data = state.ready().expect("non-success statuses are not errors");
    assert_eq!(data.summary, None);
    assert_eq!(data.acceptance_rate(), 0);
}

#[test_log::test(tokio::test)]
async fn test_reviewer_load_only_touches_own_endpoints() {
    let server = MockServer::start().await;
    serve_json(
        &server,
        endpoints::MY_SUMMARY,
        json!({ "total_submitted": 1, "mistake_reasons": { "": 1 }, "last_submission": "2025-01-15 09:30:00" }),
    )
    .await;
    serve_json(&server, endpoints::MY_SUBMISSIONS, json!([submission_json("A", "X", "")])).await;
    for endpoint in [endpoints::TEAM_SUMMARY, endpoints::SUBMISSIONS, endpoints::USERS] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
    }

    let dashboard = RoleDashboard::load(&client_for(&server), &reviewer_user()).await;
    let data = match &dashboard {
        RoleDashboard::Reviewer(ViewState::Ready(data)) => data,
        other => panic!("expected a ready reviewer dashboard, got {:?}", other),
    };

    assert_eq!(data.submissions.len(), 1);
    assert_eq!(data.submissions[0].status_label(), "Pending");
    let slices = data.mistake_slices();
    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].name, "Unknown");
}

#[test_log::test(tokio::test)]
async fn test_reviewer_load_unreachable_backend() {
    // Nothing listens on port 1
    let config = Config::with_base_url("http://127.0.0.1:1").unwrap();
    let client = TrackerClient::new(&config).unwrap();

    let state = reviewer::load(&client).await;
    assert_eq!(state, ViewState::Failed(reviewer::LOAD_ERROR.to_string()));
}
