//! Webhook event payloads and their resolution into [`Event`] variants.
//!
//! GitHub writes the payload of the triggering event to the file named by
//! `GITHUB_EVENT_PATH`. Only the handful of fields used for the notification
//! are deserialized; everything else in the document is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ContextError;

const TAG_PREFIX: &str = "refs/tags/";
const BRANCH_PREFIX: &str = "refs/heads/";

#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub ref_type: Option<String>,
    pub compare: Option<String>,
    pub pull_request: Option<PullRequestPayload>,
    pub release: Option<ReleasePayload>,
    pub head_commit: Option<HeadCommitPayload>,
    pub repository: Option<RepositoryPayload>,
    pub sender: Option<Sender>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    pub title: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ReleasePayload {
    pub name: Option<String>,
    pub tag_name: String,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HeadCommitPayload {
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub html_url: Option<String>,
    pub pushed_at: Option<PushedAt>,
}

/// The user that triggered the event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sender {
    pub login: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// `repository.pushed_at` is epoch seconds in push payloads and an RFC 3339
/// string everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PushedAt {
    EpochSeconds(i64),
    Timestamp(DateTime<Utc>),
}

impl PushedAt {
    pub fn timestamp_millis(self) -> i64 {
        match self {
            PushedAt::EpochSeconds(secs) => secs.saturating_mul(1000),
            PushedAt::Timestamp(at) => at.timestamp_millis(),
        }
    }
}

/// The triggering event, reduced to what the message needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PullRequest {
        number: u64,
        title: String,
        url: String,
    },
    Release {
        title: String,
        url: String,
    },
    TagPush {
        name: String,
        compare: Option<String>,
        url: String,
    },
    CommitPush {
        message: String,
        url: String,
    },
    Schedule,
    BranchCreate {
        name: String,
        url: String,
    },
    BranchDelete {
        name: String,
    },
    Unsupported {
        kind: String,
        ref_type: Option<String>,
    },
}

impl Event {
    /// Resolve an event from its name and payload.
    ///
    /// `context_ref` is the `GITHUB_REF` of the run and `repo_url` the
    /// repository's web URL, both used to derive branch and tag links.
    pub fn resolve(
        kind: &str,
        payload: &EventPayload,
        context_ref: &str,
        repo_url: &str,
    ) -> Result<Self, ContextError> {
        let event = match kind {
            "pull_request" => {
                let pr = payload
                    .pull_request
                    .as_ref()
                    .ok_or(ContextError::MissingField {
                        event: "pull_request",
                        field: "pull_request",
                    })?;
                Event::PullRequest {
                    number: pr.number,
                    title: pr.title.clone(),
                    url: pr.html_url.clone(),
                }
            }
            "release" => {
                let release = payload.release.as_ref().ok_or(ContextError::MissingField {
                    event: "release",
                    field: "release",
                })?;
                let title = release
                    .name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(&release.tag_name);
                Event::Release {
                    title: title.to_string(),
                    url: release.html_url.clone(),
                }
            }
            "push" => {
                let git_ref = payload.git_ref.as_deref().unwrap_or(context_ref);
                if git_ref.contains("tags") {
                    let name = git_ref.strip_prefix(TAG_PREFIX).unwrap_or(git_ref);
                    Event::TagPush {
                        name: name.to_string(),
                        compare: payload.compare.clone(),
                        url: format!("{repo_url}/releases/tag/{name}"),
                    }
                } else {
                    match &payload.head_commit {
                        Some(commit) => Event::CommitPush {
                            message: commit.message.clone(),
                            url: commit.url.clone(),
                        },
                        // Pushes that delete a branch carry no head commit.
                        None => unsupported(kind, None),
                    }
                }
            }
            "schedule" => Event::Schedule,
            "create" if is_branch(payload) => {
                let git_ref = if context_ref.is_empty() {
                    payload.git_ref.as_deref().unwrap_or_default()
                } else {
                    context_ref
                };
                let name = git_ref.strip_prefix(BRANCH_PREFIX).unwrap_or(git_ref);
                Event::BranchCreate {
                    name: name.to_string(),
                    url: format!("{repo_url}/tree/{name}"),
                }
            }
            "delete" if is_branch(payload) => {
                let name = payload.git_ref.clone().ok_or(ContextError::MissingField {
                    event: "delete",
                    field: "ref",
                })?;
                Event::BranchDelete { name }
            }
            "create" | "delete" => unsupported(kind, payload.ref_type.clone()),
            other => unsupported(other, None),
        };
        Ok(event)
    }

    pub fn is_schedule(&self) -> bool {
        matches!(self, Event::Schedule)
    }
}

fn is_branch(payload: &EventPayload) -> bool {
    payload.ref_type.as_deref() == Some("branch")
}

fn unsupported(kind: &str, ref_type: Option<String>) -> Event {
    Event::Unsupported {
        kind: kind.to_string(),
        ref_type,
    }
}
