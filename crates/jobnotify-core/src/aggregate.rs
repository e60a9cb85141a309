//! Reduction of parallel job statuses to one outcome.
//!
//! Priority is `failure` > `cancelled` > `success`. Statuses outside those
//! three are ignored when several jobs are aggregated.

use crate::domain::{AggregatedOutcome, JobResult, JobStatus};

/// Split comma-separated names and statuses into trimmed lists.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Aggregate raw comma-separated inputs into a single outcome.
///
/// A single job, or name/status lists of different lengths, short-circuit to
/// the first pair unchanged.
pub fn aggregate(raw_names: &str, raw_statuses: &str) -> AggregatedOutcome {
    let names = split_list(raw_names);
    let statuses = split_list(raw_statuses);

    if names.len() == 1 || names.len() != statuses.len() {
        // `str::split` always yields at least one element.
        let name = names.into_iter().next().unwrap_or_default();
        let status = statuses.into_iter().next().unwrap_or_default();
        return AggregatedOutcome::new(name, JobStatus::parse(&status));
    }

    let jobs: Vec<JobResult> = names
        .into_iter()
        .zip(statuses)
        .map(|(name, status)| JobResult::new(name, JobStatus::parse(&status)))
        .collect();
    aggregate_jobs(&jobs)
}

/// Priority reduction over two or more jobs.
///
/// When no status is recognized the success branch is taken with an empty
/// group, which yields `("workflow", success)`.
pub fn aggregate_jobs(jobs: &[JobResult]) -> AggregatedOutcome {
    if let [only] = jobs {
        return only.clone().into();
    }

    let group = |status: JobStatus| {
        jobs.iter()
            .filter(|job| job.status == status)
            .map(|job| job.name.as_str())
            .collect::<Vec<_>>()
    };

    let failed = group(JobStatus::Failure);
    let cancelled = group(JobStatus::Cancelled);

    let (members, status) = if !failed.is_empty() {
        (failed, JobStatus::Failure)
    } else if !cancelled.is_empty() {
        (cancelled, JobStatus::Cancelled)
    } else {
        (group(JobStatus::Success), JobStatus::Success)
    };

    let name = match members.as_slice() {
        [single] => (*single).to_string(),
        _ => AggregatedOutcome::WORKFLOW.to_string(),
    };

    AggregatedOutcome::new(name, status)
}
