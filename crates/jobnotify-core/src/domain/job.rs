//! Job statuses and aggregated outcomes.

use serde::{Deserialize, Serialize};

/// Status reported for a workflow job.
///
/// Unrecognized values are kept verbatim in `Other` so a single job can be
/// reported with whatever status the workflow passed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Success,
    Failure,
    Cancelled,
    Other(String),
}

impl JobStatus {
    /// Parse a raw status string. Matching is exact and case-sensitive.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => JobStatus::Success,
            "failure" => JobStatus::Failure,
            "cancelled" => JobStatus::Cancelled,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Success => "success",
            JobStatus::Failure => "failure",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Other(raw) => raw,
        }
    }

    /// Whether this is one of the three statuses that take part in aggregation.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, JobStatus::Other(_))
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        JobStatus::parse(&raw)
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single job's name and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    pub name: String,
    pub status: JobStatus,
}

impl JobResult {
    pub fn new(name: impl Into<String>, status: JobStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// The single (name, status) pair that represents a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedOutcome {
    /// A job name, or [`AggregatedOutcome::WORKFLOW`] when several jobs share the winning status.
    pub name: String,
    pub status: JobStatus,
}

impl AggregatedOutcome {
    /// Placeholder name used when more than one job carries the winning status.
    pub const WORKFLOW: &'static str = "workflow";

    pub fn new(name: impl Into<String>, status: JobStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

impl From<JobResult> for AggregatedOutcome {
    fn from(job: JobResult) -> Self {
        Self {
            name: job.name,
            status: job.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(JobStatus::parse("success"), JobStatus::Success);
        assert_eq!(JobStatus::parse("failure"), JobStatus::Failure);
        assert_eq!(JobStatus::parse("cancelled"), JobStatus::Cancelled);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let status = JobStatus::parse("Success");
        assert_eq!(status, JobStatus::Other("Success".to_string()));
        assert!(!status.is_recognized());
        assert_eq!(status.as_str(), "Success");
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        let json = serde_json::to_string(&JobStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");

        let other: JobStatus = serde_json::from_str("\"skipped\"").unwrap();
        assert_eq!(other, JobStatus::Other("skipped".to_string()));
    }
}
