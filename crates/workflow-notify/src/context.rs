use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::error::ContextError;
use crate::event::{Event, EventPayload, PushedAt, Sender};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Everything known about the workflow run being reported.
///
/// Built once from the runner environment (or directly in tests) and passed
/// by reference to the formatter and notifier.
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    pub server_url: String,
    pub repository: String,
    pub run_id: String,
    pub job: String,
    pub workflow: String,
    pub sha: String,
    pub git_ref: String,
    pub event_name: String,
    pub event: Event,
    pub sender: Option<Sender>,
    pub pushed_at: Option<PushedAt>,
}

impl WorkflowContext {
    /// Read the context from the GitHub Actions environment.
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    ///
    /// `GITHUB_REPOSITORY`, `GITHUB_RUN_ID` and `GITHUB_EVENT_NAME` are
    /// required. Without `GITHUB_EVENT_PATH` the payload is treated as empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ContextError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let required = |key: &'static str| var(key).ok_or(ContextError::MissingVar(key));

        let repository = required("GITHUB_REPOSITORY")?;
        let run_id = required("GITHUB_RUN_ID")?;
        let event_name = required("GITHUB_EVENT_NAME")?;

        let payload = match var("GITHUB_EVENT_PATH") {
            Some(path) => read_payload(PathBuf::from(path))?,
            None => EventPayload::default(),
        };

        Self::from_payload(
            ContextVars {
                server_url: var("GITHUB_SERVER_URL"),
                repository,
                run_id,
                job: var("GITHUB_JOB").unwrap_or_default(),
                workflow: var("GITHUB_WORKFLOW").unwrap_or_default(),
                sha: var("GITHUB_SHA").unwrap_or_default(),
                git_ref: var("GITHUB_REF").unwrap_or_default(),
                event_name,
            },
            payload,
        )
    }

    pub fn from_payload(vars: ContextVars, payload: EventPayload) -> Result<Self, ContextError> {
        let server_url = vars
            .server_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string();

        let repo_url = payload
            .repository
            .as_ref()
            .and_then(|r| r.html_url.clone())
            .unwrap_or_else(|| format!("{server_url}/{}", vars.repository));

        let event = Event::resolve(&vars.event_name, &payload, &vars.git_ref, &repo_url)?;
        debug!(event_name = %vars.event_name, ?event, "resolved workflow event");

        Ok(Self {
            server_url,
            repository: vars.repository,
            run_id: vars.run_id,
            job: vars.job,
            workflow: vars.workflow,
            sha: vars.sha,
            git_ref: vars.git_ref,
            event_name: vars.event_name,
            event,
            sender: payload.sender,
            pushed_at: payload.repository.and_then(|r| r.pushed_at),
        })
    }

    pub fn run_url(&self) -> String {
        format!(
            "{}/{}/actions/runs/{}",
            self.server_url, self.repository, self.run_id
        )
    }

    pub fn repository_url(&self) -> String {
        format!("{}/{}", self.server_url, self.repository)
    }
}

/// Plain environment values, before the payload is attached.
#[derive(Debug, Clone, Default)]
pub struct ContextVars {
    pub server_url: Option<String>,
    pub repository: String,
    pub run_id: String,
    pub job: String,
    pub workflow: String,
    pub sha: String,
    pub git_ref: String,
    pub event_name: String,
}

fn read_payload(path: PathBuf) -> Result<EventPayload, ContextError> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) => return Err(ContextError::ReadPayload { path, source }),
    };
    Ok(serde_json::from_str(&contents)?)
}
