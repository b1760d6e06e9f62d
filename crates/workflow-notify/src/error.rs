use std::path::PathBuf;

use thiserror::Error;

/// Failure to assemble a [`WorkflowContext`](crate::context::WorkflowContext).
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("reading event payload {path}: {source}")]
    ReadPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing event payload: {0}")]
    ParsePayload(#[from] serde_json::Error),

    #[error("{event} event payload has no `{field}`")]
    MissingField {
        event: &'static str,
        field: &'static str,
    },
}

/// Failure to deliver a notification.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("sending webhook request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook responded with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}
