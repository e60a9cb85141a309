//! Action inputs.
//!
//! Inputs follow the GitHub Actions convention: an input named `job_name` is
//! read from the `INPUT_JOB_NAME` environment variable. Values are trimmed and
//! a required input that is absent or blank fails the run.

use std::collections::BTreeMap;

use crate::error::{NotifyError, Result};

pub const JOB_NAME: &str = "job_name";
pub const JOB_STATUS: &str = "job_status";
pub const SLACK_WEBHOOK_URL: &str = "slack_webhook_url";

/// A provider of raw input values.
pub trait InputSource {
    /// Raw, untrimmed value for `name`, if one is set.
    fn raw(&self, name: &str) -> Option<String>;

    /// Trimmed value; `None` when unset or blank.
    fn get(&self, name: &str) -> Option<String> {
        self.raw(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value, failing with [`NotifyError::MissingInput`] when unset or blank.
    fn require(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| NotifyError::missing_input(name))
    }
}

/// Environment variable holding an input, e.g. `job name` -> `INPUT_JOB_NAME`.
pub fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Reads inputs from `INPUT_*` process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputSource;

impl InputSource for EnvInputSource {
    fn raw(&self, name: &str) -> Option<String> {
        std::env::var(input_env_var(name)).ok()
    }
}

/// In-memory inputs keyed by input name.
#[derive(Debug, Clone, Default)]
pub struct MapInputSource {
    values: BTreeMap<String, String>,
}

impl MapInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Set `name` only when a value is given.
    pub fn with_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }
}

impl InputSource for MapInputSource {
    fn raw(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Consults `primary` first and falls back to `fallback` for unset or blank values.
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> Layered<A, B> {
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: InputSource, B: InputSource> InputSource for Layered<A, B> {
    fn raw(&self, name: &str) -> Option<String> {
        self.primary
            .get(name)
            .or_else(|| self.fallback.raw(name))
    }
}

/// The three required inputs of a notification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyInputs {
    /// Comma-separated job names.
    pub job_name: String,
    /// Comma-separated job statuses, positionally matching `job_name`.
    pub job_status: String,
    pub webhook_url: String,
}

/// Resolve all required inputs, stopping at the first one that is missing.
pub fn resolve_inputs(source: &dyn InputSource) -> Result<NotifyInputs> {
    Ok(NotifyInputs {
        job_name: source.require(JOB_NAME)?,
        job_status: source.require(JOB_STATUS)?,
        webhook_url: source.require(SLACK_WEBHOOK_URL)?,
    })
}
