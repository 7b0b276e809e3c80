use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::text;

pub const NAME_FIELD: &str = "Name";
pub const TASK_TYPE_FIELD: &str = "Task Type";
pub const MINER_FIELD: &str = "Miner/ Slicer Name";
pub const LEADER_FIELD: &str = "Leader Name";
pub const REVIEW_STATUS_FIELD: &str = "Is this rejected (Slice / Miner)";
pub const CHANGED_FIELD: &str = "Is this Changed (Slice / Miner)";
pub const TIMESTAMP_FIELD: &str = "Timestamp";

/// One row of the team's review form, as served by the backend.
///
/// Field names on the wire are the sheet's column headers and are kept
/// verbatim. Columns this client does not read are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(rename = "Name", default, deserialize_with = "text::optional")]
    pub name: Option<String>,
    #[serde(rename = "Task Type", default, deserialize_with = "text::optional")]
    pub task_type: Option<String>,
    #[serde(rename = "Miner/ Slicer Name", default, deserialize_with = "text::optional")]
    pub miner_name: Option<String>,
    #[serde(rename = "Leader Name", default, deserialize_with = "text::optional")]
    pub leader_name: Option<String>,
    #[serde(rename = "Is this rejected (Slice / Miner)", default, deserialize_with = "text::optional")]
    pub review_status: Option<String>,
    #[serde(rename = "Is this Changed (Slice / Miner)", default, deserialize_with = "text::optional")]
    pub changed: Option<String>,
    #[serde(
        rename = "In your opinion, what is the reason for reviewer mistake?",
        alias = "In you opinion, What is the reason for reviewer mistake?",
        default,
        deserialize_with = "text::optional"
    )]
    pub mistake_reason: Option<String>,
    #[serde(
        rename = "Are the QC and Reviewer aligned on the same answer",
        alias = "Are The Qc And the reviewer allign on the same answer",
        default,
        deserialize_with = "text::optional"
    )]
    pub qc_alignment: Option<String>,
    #[serde(rename = "Timestamp", default, deserialize_with = "text::optional")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Review result shown for a submission.
///
/// `Pending` is never sent by the backend; it stands in for a blank or
/// unrecognised outcome cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Accepted,
    Rejected,
    Pending,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewOutcome::Accepted => "Accepted",
            ReviewOutcome::Rejected => "Rejected",
            ReviewOutcome::Pending => "Pending",
        }
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Submission {
    pub fn outcome(&self) -> ReviewOutcome {
        match self.review_status.as_deref() {
            Some("Accepted") => ReviewOutcome::Accepted,
            Some("Rejected") => ReviewOutcome::Rejected,
            _ => ReviewOutcome::Pending,
        }
    }

    /// Badge text: the raw outcome cell, or "Pending" when blank
    pub fn status_label(&self) -> &str {
        self.review_status.as_deref().unwrap_or("Pending")
    }

    /// Look up any column by its sheet header
    pub fn field(&self, label: &str) -> Option<String> {
        let known = match label {
            NAME_FIELD => &self.name,
            TASK_TYPE_FIELD => &self.task_type,
            MINER_FIELD => &self.miner_name,
            LEADER_FIELD => &self.leader_name,
            REVIEW_STATUS_FIELD => &self.review_status,
            CHANGED_FIELD => &self.changed,
            TIMESTAMP_FIELD => &self.timestamp,
            _ => {
                return match self.extra.get(label)? {
                    Value::Null => None,
                    Value::String(s) if s.is_empty() => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                };
            }
        };
        known.clone()
    }
}
