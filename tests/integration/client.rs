//! Session flow against a mock tracker backend

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::backend::{client_for, serve_status};
use crate::common::fixtures::REVIEWER_EMAIL;
use crate::common::logging::{init_test_logging, log_test_data, log_test_step};
use submission_dashboard::api::{endpoints, TrackerApi, TrackerClient};
use submission_dashboard::models::{Config, Role};
use submission_dashboard::session::{self, SessionState, SignInError};

fn unreachable_client() -> TrackerClient {
    // Nothing listens on port 1
    let config = Config::with_base_url("http://127.0.0.1:1").unwrap();
    TrackerClient::new(&config).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_verify_401_is_unauthenticated() {
    let server = MockServer::start().await;
    serve_status(&server, endpoints::VERIFY, 401).await;

    let state = session::verify_session(&client_for(&server)).await;
    assert_eq!(state, SessionState::Unauthenticated);
}

#[test_log::test(tokio::test)]
async fn test_verify_unreachable_is_unauthenticated() {
    let state = session::verify_session(&unreachable_client()).await;
    assert!(!state.is_authenticated());
}

#[test_log::test(tokio::test)]
async fn test_sign_in_cookie_is_sent_on_later_requests() {
    init_test_logging();
    log_test_step("Signing in and reading the caller's summary with the session cookie");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::SIGN_IN))
        .and(body_json(json!({ "email": REVIEWER_EMAIL })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/; HttpOnly")
                .set_body_json(json!({ "user": { "email": REVIEWER_EMAIL, "role": "user" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoints::MY_SUMMARY))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_submitted": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = session::sign_in(&client, &format!("  {}  ", REVIEWER_EMAIL)).await.unwrap();
    assert_eq!(user.role, Role::Reviewer);

    let summary = client.my_summary().await.unwrap().expect("summary served");
    log_test_data("Summary", &summary);
    assert_eq!(summary.total_submitted, 4);
}

#[test_log::test(tokio::test)]
async fn test_sign_in_rejection_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::SIGN_IN))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "User not found" })))
        .mount(&server)
        .await;

    let err = session::sign_in(&client_for(&server), "stranger@example.com").await.unwrap_err();
    assert_eq!(err, SignInError::Rejected("User not found".to_string()));
    assert_eq!(err.to_string(), "User not found");
}

#[test_log::test(tokio::test)]
async fn test_sign_in_without_message_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::SIGN_IN))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = session::sign_in(&client_for(&server), REVIEWER_EMAIL).await.unwrap_err();
    assert_eq!(err.to_string(), "Sign in failed");
}

#[test_log::test(tokio::test)]
async fn test_sign_in_problems_before_or_without_a_backend() {
    let err = session::sign_in(&unreachable_client(), "   ").await.unwrap_err();
    assert_eq!(err, SignInError::MissingEmail);

    let err = session::sign_in(&unreachable_client(), REVIEWER_EMAIL).await.unwrap_err();
    assert_matches!(err, SignInError::Unreachable);
}

#[test_log::test(tokio::test)]
async fn test_blank_role_cell_signs_in_as_reviewer() {
    let server = MockServer::start().await;
    let user = json!({ "email": REVIEWER_EMAIL, "role": null });
    Mock::given(method("POST"))
        .and(path(endpoints::SIGN_IN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(endpoints::VERIFY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "authenticated": true, "user": user })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let signed_in = session::sign_in(&client, REVIEWER_EMAIL).await.unwrap();
    assert_eq!(signed_in.role, Role::Reviewer);

    let state = session::verify_session(&client).await;
    assert_eq!(state.user().map(|u| u.role), Some(Role::Reviewer));
}

#[test_log::test(tokio::test)]
async fn test_sign_out_clears_state_even_when_unreachable() {
    let state = session::sign_out(&unreachable_client()).await;
    assert_eq!(state, SessionState::Unauthenticated);
}

#[test_log::test(tokio::test)]
async fn test_sign_out_posts_to_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoints::SIGN_OUT))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(session::sign_out(&client_for(&server)).await, SessionState::Unauthenticated);
}
