//! Ambient workflow-run context.
//!
//! GitHub Actions exposes the run metadata through `GITHUB_*` environment
//! variables and a JSON webhook event written to `GITHUB_EVENT_PATH`. The
//! context is read once per invocation and never mutated afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NotifyError, Result};

pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
pub const ENV_SHA: &str = "GITHUB_SHA";
pub const ENV_ACTOR: &str = "GITHUB_ACTOR";
pub const ENV_REF: &str = "GITHUB_REF";
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";

/// A user attached to a commit in the webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// The `head_commit` object of a push event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadCommit {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: Option<CommitUser>,
    #[serde(default)]
    pub committer: Option<CommitUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadOwner {
    #[serde(default)]
    pub login: Option<String>,
}

/// The `repository` object of a webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRepository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<PayloadOwner>,
}

/// The subset of the webhook event this tool reads. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
    #[serde(default)]
    pub repository: Option<PayloadRepository>,
}

impl EventPayload {
    /// Load the event file. A path that does not exist yields an empty payload.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "event payload file does not exist");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let payload =
            serde_json::from_str(&content).map_err(|source| NotifyError::InvalidEventPayload {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "loaded event payload");
        Ok(payload)
    }

    fn repository_owner_and_name(&self) -> Option<(String, String)> {
        let repository = self.repository.as_ref()?;
        let owner = repository.owner.as_ref()?.login.clone()?;
        let name = repository.name.clone()?;
        Some((owner, name))
    }
}

/// Metadata about the workflow run being reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub repo_owner: String,
    pub repo_name: String,
    pub run_id: Option<u64>,
    pub sha: Option<String>,
    pub actor: Option<String>,
    pub git_ref: Option<String>,
    pub payload: EventPayload,
}

impl RunContext {
    pub fn new(repo_owner: &str, repo_name: &str) -> Self {
        RunContext {
            repo_owner: repo_owner.to_string(),
            repo_name: repo_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_run_id(mut self, run_id: u64) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn with_sha(mut self, sha: &str) -> Self {
        self.sha = Some(sha.to_string());
        self
    }

    pub fn with_actor(mut self, actor: &str) -> Self {
        self.actor = Some(actor.to_string());
        self
    }

    pub fn with_ref(mut self, git_ref: &str) -> Self {
        self.git_ref = Some(git_ref.to_string());
        self
    }

    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Read the context from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the context through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. The repository comes from
    /// `GITHUB_REPOSITORY` when present, otherwise from the event payload.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let payload = match var(ENV_EVENT_PATH) {
            Some(path) => EventPayload::load(Path::new(&path))?,
            None => EventPayload::default(),
        };

        let (repo_owner, repo_name) = match var(ENV_REPOSITORY) {
            Some(repository) => {
                let mut parts = repository.split('/');
                let owner = parts.next().unwrap_or_default().to_string();
                let name = parts.next().unwrap_or_default().to_string();
                (owner, name)
            }
            None => payload.repository_owner_and_name().ok_or_else(|| {
                NotifyError::MissingContext(format!(
                    "{ENV_REPOSITORY} must be set like 'owner/repo'"
                ))
            })?,
        };

        let run_id = var(ENV_RUN_ID).and_then(|id| id.trim().parse::<u64>().ok());

        Ok(RunContext {
            repo_owner,
            repo_name,
            run_id,
            sha: var(ENV_SHA),
            actor: var(ENV_ACTOR),
            git_ref: var(ENV_REF),
            payload,
        })
    }
}
