//! Post the outcome of a GitHub Actions workflow run to a Slack-compatible
//! incoming webhook.
//!
//! The run is described by a [`WorkflowContext`], the message is rendered by
//! [`format_message`] and delivered by a [`Notifier`] through a
//! [`WebhookSink`].

pub mod attachment;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod logging;
pub mod message;
pub mod notifier;
pub mod sink;
pub mod status;

pub use context::WorkflowContext;
pub use message::format_message;
pub use notifier::{Delivery, Notifier};
pub use sink::{HttpSink, WebhookSink};
pub use status::JobStatus;
