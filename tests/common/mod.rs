//! Common test utilities and helpers

/// Test data builders
pub mod fixtures {
    use serde_json::{json, Value};
    use submission_dashboard::models::{Role, SessionUser, Submission};

    pub const REVIEWER_EMAIL: &str = "me116268@meti.services";
    pub const ADMIN_EMAIL: &str = "lead@meti.services";

    /// Submission with the fields the filter bar looks at
    pub fn submission(name: &str, task_type: &str, status: &str) -> Submission {
        Submission {
            name: Some(name.to_string()),
            task_type: Some(task_type.to_string()),
            review_status: Some(status.to_string()),
            ..Default::default()
        }
    }

    /// A mixed batch covering every outcome and a few task types
    pub fn sample_submissions() -> Vec<Submission> {
        vec![
            Submission { miner_name: Some("Ayesha".to_string()), ..submission("Bilal", "Mining", "Accepted") },
            submission("Sara", "Slicing", "Rejected"),
            Submission { miner_name: Some("Bilal".to_string()), ..submission("Omar", "Mining", "Rejected") },
            Submission { review_status: None, ..submission("Hina", "QC", "") },
            Submission { task_type: None, ..submission("Zain", "", "Accepted") },
            submission("sara", "Slicing", "accepted"),
        ]
    }

    pub fn reviewer_user() -> SessionUser {
        SessionUser { email: REVIEWER_EMAIL.to_string(), role: Role::Reviewer, name: None }
    }

    pub fn admin_user() -> SessionUser {
        SessionUser { email: ADMIN_EMAIL.to_string(), role: Role::Admin, name: Some("Team Lead".to_string()) }
    }

    /// A submission row as the backend serialises it from the sheet
    pub fn submission_json(name: &str, task_type: &str, status: &str) -> Value {
        json!({
            "Timestamp": "Wed, 15 Jan 2025 09:30:00 GMT",
            "Name": name,
            "Task Type": task_type,
            "Miner/ Slicer Name": "Ayesha",
            "Leader Name": null,
            "Is this rejected (Slice / Miner)": status,
            "Is this Changed (Slice / Miner)": "No",
            "Email Address": "me116268@meti.services",
        })
    }
}

/// Mock tracker backend helpers
pub mod backend {
    use serde_json::Value;
    use submission_dashboard::api::TrackerClient;
    use submission_dashboard::models::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Client pointed at the mock server
    pub fn client_for(server: &MockServer) -> TrackerClient {
        let config = Config::with_base_url(&server.uri()).expect("mock server uri is a valid base");
        TrackerClient::new(&config).expect("client builds")
    }

    /// Serve `body` with HTTP 200 for `GET endpoint`
    pub async fn serve_json(server: &MockServer, endpoint: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    /// Answer `GET endpoint` with a bare status code
    pub async fn serve_status(server: &MockServer, endpoint: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }
}

/// Logging utilities for tests
pub mod logging {
    use std::sync::Once;
    use tracing::{debug, info};

    static INIT: Once = Once::new();

    /// Initialize test logging
    pub fn init_test_logging() {
        INIT.call_once(|| {
            // Another test may already have installed a subscriber
            let _ = tracing::subscriber::set_global_default(
                tracing_subscriber::fmt()
                    .with_env_filter("submission_dashboard=debug,main=debug")
                    .with_test_writer()
                    .finish(),
            );
        });
    }

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
