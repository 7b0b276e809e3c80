use std::time::Duration;

use url::Url;

pub mod analytics;
pub mod session;
pub mod submission;

pub use analytics::{MistakeReasons, ReviewerSummary, TaskTypeBreakdown, TeamSummary, TrendPoint};
pub use session::{Role, SessionUser, SignInResponse, TeamMember, VerifyResponse};
pub use submission::{ReviewOutcome, Submission};

/// Default backend location when `TRACKER_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let base_url = std::env::var("TRACKER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let request_timeout = match std::env::var("TRACKER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| anyhow::anyhow!("TRACKER_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'", raw))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            base_url: Self::parse_base_url(&base_url)?,
            request_timeout,
            user_agent: std::env::var("TRACKER_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
        })
    }

    /// Build a configuration pointing at `base_url` with everything else defaulted
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        Ok(Config {
            base_url: Self::parse_base_url(base_url)?,
            request_timeout: None,
            user_agent: default_user_agent(),
        })
    }

    /// Parse a base URL, normalising it so endpoint paths can be joined onto it
    pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(raw.trim())
            .map_err(|e| anyhow::anyhow!("Invalid tracker base URL '{}': {}", raw, e))?;
        if url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Tracker base URL '{}' cannot carry API paths", raw));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

fn default_user_agent() -> String {
    format!("submission-dashboard/{}", env!("CARGO_PKG_VERSION"))
}

/// Lenient decoding for spreadsheet-backed JSON values.
///
/// The backend serialises sheet cells as they come: `null`, `""`, numbers or
/// strings. Both `null` and the empty string mean the cell is blank.
pub(crate) mod text {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other) => Some(other.to_string()),
        })
    }

    pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional(deserializer)?.unwrap_or_default())
    }
}
