//! Message rendering.
//!
//! Turns an [`AggregatedOutcome`] plus the [`RunContext`] into Slack mrkdwn.
//! Links use the `<URL|TEXT>` markup.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{
    AggregatedOutcome, ColorTag, CommitUser, EventPayload, JobStatus, RenderedMessage, RunContext,
};

const GITHUB_URL: &str = "https://github.com";

/// Shown in place of the commit label when no SHA is known.
pub const UNKNOWN_COMMIT_LABEL: &str = "???????";

/// Shown in place of a missing actor or commit author.
pub const UNKNOWN_USER: &str = "unknown";

/// Upper-case the first character of a status, e.g. `failure` -> `Failure`.
pub fn status_to_label(status: &str) -> String {
    let mut chars = status.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Attachment color for a raw status; empty for anything unrecognized.
pub fn status_to_color(status: &str) -> &'static str {
    ColorTag::for_status(&JobStatus::parse(status)).as_str()
}

/// First eight characters of a SHA, or `???????` when there is none.
pub fn commit_label(sha: Option<&str>) -> String {
    match sha {
        Some(sha) if !sha.is_empty() => sha.chars().take(8).collect(),
        _ => UNKNOWN_COMMIT_LABEL.to_string(),
    }
}

fn ref_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"refs/.+?/").expect("ref prefix pattern is valid"))
}

/// Remove the first `refs/<segment>/` from a ref, e.g. `refs/heads/main` -> `main`.
pub fn strip_ref(git_ref: &str) -> String {
    ref_prefix().replace(git_ref, "").into_owned()
}

fn link(url: &str, text: &str) -> String {
    format!("<{url}|{text}>")
}

/// URLs and labels derived from the run context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLinks {
    pub repo: String,
    pub repo_url: String,
    pub run_url: String,
    pub commit_label: String,
    pub commit_url: String,
    pub actor: String,
    pub ref_label: String,
    pub ref_url: String,
}

impl RunLinks {
    pub fn from_context(ctx: &RunContext) -> Self {
        let repo = format!("{}/{}", ctx.repo_owner, ctx.repo_name);
        let repo_url = format!("{GITHUB_URL}/{repo}");

        let run_url = ctx
            .run_id
            .map(|id| format!("{repo_url}/actions/runs/{id}"))
            .unwrap_or_default();

        let sha = ctx.sha.as_deref().filter(|s| !s.is_empty());
        let commit_url = sha
            .map(|sha| format!("{repo_url}/commit/{sha}"))
            .unwrap_or_default();

        let actor = ctx
            .actor
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN_USER)
            .to_string();

        let ref_label = ctx.git_ref.as_deref().map(strip_ref).unwrap_or_default();
        // Built even when the ref is unknown.
        let ref_url = format!("{repo_url}/tree/{ref_label}");

        RunLinks {
            commit_label: commit_label(sha),
            repo,
            repo_url,
            run_url,
            commit_url,
            actor,
            ref_label,
            ref_url,
        }
    }
}

/// The title line: who ran what, on which commit, in which repo and ref.
pub fn render_title(outcome: &AggregatedOutcome, links: &RunLinks) -> String {
    [
        format!("{}:", status_to_label(outcome.status.as_str())),
        format!("{}'s", links.actor),
        link(&links.run_url, &outcome.name),
        format!("({})", link(&links.commit_url, &links.commit_label)),
        "in".to_string(),
        link(&links.repo_url, &links.repo),
        format!("({})", link(&links.ref_url, &links.ref_label)),
    ]
    .join(" ")
}

/// The head-commit line, or an empty string when the event has no usable commit.
pub fn render_commit_line(payload: &EventPayload) -> String {
    let Some(commit) = payload.head_commit.as_ref() else {
        return String::new();
    };
    let id = commit.id.as_deref().filter(|s| !s.is_empty());
    let url = commit.url.as_deref().filter(|s| !s.is_empty());
    let (Some(id), Some(url)) = (id, url) else {
        return String::new();
    };

    fn username(user: &Option<CommitUser>) -> Option<&str> {
        user.as_ref()
            .and_then(|u| u.username.as_deref())
            .filter(|name| !name.is_empty())
    }
    let author = username(&commit.author)
        .or_else(|| username(&commit.committer))
        .unwrap_or(UNKNOWN_USER);

    let short_id: String = id.chars().take(8).collect();
    format!(
        "- {} ({} by {})",
        commit.message.as_deref().unwrap_or_default(),
        link(url, &short_id),
        author
    )
}

/// Render the complete message for an outcome.
pub fn render(outcome: &AggregatedOutcome, ctx: &RunContext) -> RenderedMessage {
    let links = RunLinks::from_context(ctx);
    let title = render_title(outcome, &links);
    let commit_line = render_commit_line(&ctx.payload);

    let text = if commit_line.is_empty() {
        title
    } else {
        format!("{title}\n{commit_line}")
    };

    RenderedMessage {
        color: ColorTag::for_status(&outcome.status),
        text,
        footer: links.repo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeadCommit;
    use pretty_assertions::assert_eq;

    fn full_context() -> RunContext {
        RunContext::new("octo", "widgets")
            .with_run_id(99)
            .with_sha("0123456789abcdef0123456789abcdef01234567")
            .with_actor("mona")
            .with_ref("refs/heads/main")
    }

    fn head_commit(author: Option<&str>, committer: Option<&str>) -> EventPayload {
        let user = |name: Option<&str>| {
            name.map(|n| CommitUser {
                username: Some(n.to_string()),
                ..Default::default()
            })
        };
        EventPayload {
            head_commit: Some(HeadCommit {
                id: Some("abcdef0123456789".to_string()),
                url: Some("https://github.com/octo/widgets/commit/abcdef0123456789".to_string()),
                message: Some("Fix the widget".to_string()),
                author: user(author),
                committer: user(committer),
            }),
            repository: None,
        }
    }

    #[test]
    fn test_status_to_label() {
        assert_eq!(status_to_label("failure"), "Failure");
        assert_eq!(status_to_label("success"), "Success");
        assert_eq!(status_to_label("skipped"), "Skipped");
        assert_eq!(status_to_label(""), "");
    }

    #[test]
    fn test_status_to_color() {
        assert_eq!(status_to_color("success"), "good");
        assert_eq!(status_to_color("failure"), "danger");
        assert_eq!(status_to_color("cancelled"), "warning");
        assert_eq!(status_to_color("unknown"), "");
    }

    #[test]
    fn test_commit_label() {
        assert_eq!(commit_label(Some("0123456789abcdef")), "01234567");
        assert_eq!(commit_label(Some("abc")), "abc");
        assert_eq!(commit_label(Some("")), "???????");
        assert_eq!(commit_label(None), "???????");
    }

    #[test]
    fn test_strip_ref() {
        assert_eq!(strip_ref("refs/heads/main"), "main");
        assert_eq!(strip_ref("refs/heads/feature/login"), "feature/login");
        assert_eq!(strip_ref("refs/tags/v1.2.0"), "v1.2.0");
        assert_eq!(strip_ref("refs/pull/12/merge"), "12/merge");
        assert_eq!(strip_ref("main"), "main");
    }

    #[test]
    fn test_links_from_full_context() {
        let links = RunLinks::from_context(&full_context());
        assert_eq!(links.repo, "octo/widgets");
        assert_eq!(links.repo_url, "https://github.com/octo/widgets");
        assert_eq!(links.run_url, "https://github.com/octo/widgets/actions/runs/99");
        assert_eq!(links.commit_label, "01234567");
        assert_eq!(
            links.commit_url,
            "https://github.com/octo/widgets/commit/0123456789abcdef0123456789abcdef01234567"
        );
        assert_eq!(links.actor, "mona");
        assert_eq!(links.ref_label, "main");
        assert_eq!(links.ref_url, "https://github.com/octo/widgets/tree/main");
    }

    #[test]
    fn test_links_from_sparse_context() {
        let links = RunLinks::from_context(&RunContext::new("octo", "widgets"));
        assert_eq!(links.run_url, "");
        assert_eq!(links.commit_label, "???????");
        assert_eq!(links.commit_url, "");
        assert_eq!(links.actor, "unknown");
        assert_eq!(links.ref_label, "");
        assert_eq!(links.ref_url, "https://github.com/octo/widgets/tree/");
    }

    #[test]
    fn test_title_line() {
        let outcome = AggregatedOutcome::new("build", JobStatus::Success);
        let title = render_title(&outcome, &RunLinks::from_context(&full_context()));
        assert_eq!(
            title,
            "Success: mona's <https://github.com/octo/widgets/actions/runs/99|build> \
             (<https://github.com/octo/widgets/commit/0123456789abcdef0123456789abcdef01234567|01234567>) \
             in <https://github.com/octo/widgets|octo/widgets> \
             (<https://github.com/octo/widgets/tree/main|main>)"
        );
    }

    #[test]
    fn test_commit_line_prefers_author() {
        assert_eq!(
            render_commit_line(&head_commit(Some("mona"), Some("hubot"))),
            "- Fix the widget (<https://github.com/octo/widgets/commit/abcdef0123456789|abcdef01> by mona)"
        );
    }

    #[test]
    fn test_commit_line_falls_back_to_committer_then_unknown() {
        assert!(render_commit_line(&head_commit(None, Some("hubot"))).ends_with("by hubot)"));
        assert!(render_commit_line(&head_commit(None, None)).ends_with("by unknown)"));
    }

    #[test]
    fn test_commit_line_requires_id_and_url() {
        let mut payload = head_commit(Some("mona"), None);
        if let Some(commit) = payload.head_commit.as_mut() {
            commit.url = None;
        }
        assert_eq!(render_commit_line(&payload), "");
        assert_eq!(render_commit_line(&EventPayload::default()), "");
    }

    #[test]
    fn test_render_without_commit_is_title_only() {
        let outcome = AggregatedOutcome::new("deploy", JobStatus::Cancelled);
        let message = render(&outcome, &full_context());

        assert_eq!(message.color, ColorTag::Warning);
        assert_eq!(message.footer, "octo/widgets");
        assert!(message.text.starts_with("Cancelled: mona's <"));
        assert!(!message.text.contains('\n'));
    }

    #[test]
    fn test_render_with_commit_appends_line() {
        let outcome = AggregatedOutcome::new("workflow", JobStatus::Failure);
        let ctx = full_context().with_payload(head_commit(Some("mona"), None));
        let message = render(&outcome, &ctx);

        let lines: Vec<&str> = message.text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Failure: mona's <"));
        assert!(lines[0].contains("|workflow>"));
        assert!(lines[1].starts_with("- Fix the widget"));
        assert_eq!(message.color, ColorTag::Danger);
    }
}
