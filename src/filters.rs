//! Derived collections for the dashboard views.
//!
//! Everything here is pure: the views call these on every input change and
//! render whatever comes back.

use std::collections::HashSet;
use std::fmt;

use crate::models::{MistakeReasons, Submission};

/// Label used for a mistake reason the backend left blank
pub const UNKNOWN_REASON: &str = "Unknown";

/// How many submissions the reviewer's recent list shows
pub const RECENT_SUBMISSIONS_LIMIT: usize = 10;

/// Status selector of the submissions table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Accepted,
    Rejected,
}

impl StatusFilter {
    /// `None` means every submission passes
    pub fn required_label(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Accepted => Some("Accepted"),
            StatusFilter::Rejected => Some("Rejected"),
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Accepted,
            StatusFilter::Accepted => StatusFilter::Rejected,
            StatusFilter::Rejected => StatusFilter::All,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(StatusFilter::All),
            "Accepted" => Some(StatusFilter::Accepted),
            "Rejected" => Some(StatusFilter::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.required_label().unwrap_or("All Status"))
    }
}

/// Task-type selector of the submissions table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TaskTypeFilter {
    #[default]
    All,
    Only(String),
}

impl TaskTypeFilter {
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            TaskTypeFilter::All
        } else {
            TaskTypeFilter::Only(raw.to_string())
        }
    }

    /// Step to the next entry of `options`, wrapping back to `All` after the last one
    pub fn next(&self, options: &[String]) -> Self {
        let position = match self {
            TaskTypeFilter::All => None,
            TaskTypeFilter::Only(current) => options.iter().position(|o| o == current),
        };
        let next_index = position.map_or(0, |i| i + 1);
        options
            .get(next_index)
            .map(|o| TaskTypeFilter::Only(o.clone()))
            .unwrap_or(TaskTypeFilter::All)
    }
}

impl fmt::Display for TaskTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskTypeFilter::All => f.write_str("All Task Types"),
            TaskTypeFilter::Only(task_type) => f.write_str(task_type),
        }
    }
}

/// The three conjunctive predicates of the submissions table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub term: String,
    pub status: StatusFilter,
    pub task_type: TaskTypeFilter,
}

impl SubmissionFilter {
    pub fn is_identity(&self) -> bool {
        self.term.is_empty() && self.status == StatusFilter::All && self.task_type == TaskTypeFilter::All
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        self.matches_term(submission) && self.matches_status(submission) && self.matches_task_type(submission)
    }

    fn matches_term(&self, submission: &Submission) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let needle = self.term.to_lowercase();
        [&submission.name, &submission.task_type, &submission.miner_name]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&needle))
    }

    fn matches_status(&self, submission: &Submission) -> bool {
        match self.status.required_label() {
            None => true,
            Some(label) => submission.review_status.as_deref() == Some(label),
        }
    }

    fn matches_task_type(&self, submission: &Submission) -> bool {
        match &self.task_type {
            TaskTypeFilter::All => true,
            TaskTypeFilter::Only(task_type) => submission.task_type.as_deref() == Some(task_type.as_str()),
        }
    }
}

/// Submissions passing `filter`, in their original order
pub fn filter_submissions<'a>(submissions: &'a [Submission], filter: &SubmissionFilter) -> Vec<&'a Submission> {
    submissions.iter().filter(|s| filter.matches(s)).collect()
}

/// Distinct non-empty task types, first-seen order
pub fn task_types(submissions: &[Submission]) -> Vec<String> {
    let mut seen = HashSet::new();
    submissions
        .iter()
        .filter_map(|s| s.task_type.as_deref())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

/// One slice of the reviewer-mistake chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeSlice {
    pub name: String,
    pub value: u64,
}

/// Reshape reason counts into chart slices, naming blank reasons "Unknown"
pub fn mistake_slices(reasons: &MistakeReasons) -> Vec<MistakeSlice> {
    reasons
        .iter()
        .map(|(reason, count)| MistakeSlice {
            name: if reason.is_empty() { UNKNOWN_REASON.to_string() } else { reason.to_string() },
            value: count,
        })
        .collect()
}

/// `round(part / whole * 100)`, or 0 when `whole` is 0
pub fn percentage(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u64
}

/// Head of the list for the reviewer's recent submissions panel
pub fn recent_submissions(submissions: &[Submission]) -> &[Submission] {
    &submissions[..submissions.len().min(RECENT_SUBMISSIONS_LIMIT)]
}
