use crate::context::WorkflowContext;
use crate::event::Event;

/// Render the message body for `ctx`, or `None` when the event kind is not
/// supported.
pub fn format_message(ctx: &WorkflowContext, status: &str) -> Option<String> {
    let run_url = ctx.run_url();
    let during = format!(
        "{status} during {} ({})",
        link(&run_url, &ctx.job),
        link(&run_url, &ctx.workflow)
    );

    let message = match &ctx.event {
        Event::PullRequest { number, title, url } => {
            format!("PR {} {during}", link(url, &format!(" #{number} {title}")))
        }
        Event::Release { title, url } => format!("Release {} {during}", link(url, title)),
        Event::TagPush { name, url, .. } => format!("Tag {} {during}", link(url, name)),
        Event::CommitPush { message, url } => {
            format!("{} {during}", link(url, first_line(message)))
        }
        Event::Schedule => format!("Scheduled Workflow {}", link(&run_url, &ctx.workflow)),
        Event::BranchCreate { name, url } => {
            format!("Branch {} creation {during}", link(url, name))
        }
        Event::BranchDelete { name } => format!("Branch `{name}` deletion {during}"),
        Event::Unsupported { .. } => return None,
    };
    Some(message)
}

/// Slack mrkdwn link.
fn link(url: &str, label: &str) -> String {
    format!("<{url}|{label}>")
}

fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or(message)
}
