use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::text;

/// Team-wide counters from `/api/analytics/summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSummary {
    pub total_submissions: u64,
    pub unique_members: u64,
    pub accepted_count: u64,
    pub rejected_count: u64,
    pub changed_count: u64,
    #[serde(deserialize_with = "text::optional")]
    pub most_common_mistake: Option<String>,
    #[serde(deserialize_with = "text::optional")]
    pub reviewer_with_most_rejected: Option<String>,
}

/// Caller-scoped counters from `/api/analytics/my`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewerSummary {
    pub total_submitted: u64,
    pub accepted_count: u64,
    pub rejected_count: u64,
    pub leader_reviewed: u64,
    pub changed_by_leader: u64,
    pub fully_aligned: u64,
    pub misaligned: u64,
    #[serde(deserialize_with = "text::optional")]
    pub last_submission: Option<String>,
    pub mistake_reasons: MistakeReasons,
}

/// Reason label → count, in the order the backend listed them.
///
/// The backend sends a JSON object sorted by frequency, so this keeps the
/// pairs as a list instead of a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MistakeReasons(pub Vec<(String, u64)>);

impl MistakeReasons {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(reason, count)| (reason.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for MistakeReasons {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        MistakeReasons(iter.into_iter().map(|(reason, count)| (reason.into(), count)).collect())
    }
}

impl Serialize for MistakeReasons {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(reason, count)| (reason, count)))
    }
}

impl<'de> Deserialize<'de> for MistakeReasons {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReasonsVisitor;

        impl<'de> Visitor<'de> for ReasonsVisitor {
            type Value = MistakeReasons;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of mistake reasons to counts")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(MistakeReasons::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(MistakeReasons::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut reasons = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((reason, count)) = map.next_entry::<String, u64>()? {
                    reasons.push((reason, count));
                }
                Ok(MistakeReasons(reasons))
            }
        }

        deserializer.deserialize_any(ReasonsVisitor)
    }
}

/// One bar group of the rejection-by-task-type chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskTypeBreakdown {
    #[serde(alias = "category", default, deserialize_with = "text::required")]
    pub task_type: String,
    #[serde(default)]
    pub accepted: u64,
    #[serde(default)]
    pub rejected: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_rate: Option<f64>,
}

impl TaskTypeBreakdown {
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.accepted + self.rejected)
    }

    /// Share of rejected tasks in percent, as the backend rounded it when it sent one
    pub fn rejection_percent(&self) -> f64 {
        self.rejection_rate
            .unwrap_or_else(|| crate::filters::percentage(self.rejected, self.total()) as f64)
    }
}

/// Daily submission count for the trend line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub count: u64,
}
