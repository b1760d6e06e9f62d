use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::status::JobStatus;

/// workflow-notify – post CI workflow results to a Slack webhook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send the notification for the current workflow run
    Send {
        /// Job status to report
        #[arg(short, long, value_enum)]
        status: JobStatus,

        /// Incoming webhook URL
        #[arg(short, long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
        webhook_url: Option<String>,

        /// Named webhook from the config file (defaults to "default")
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Print the payload that would be sent, without sending it
    Preview {
        /// Job status to report
        #[arg(short, long, value_enum)]
        status: JobStatus,
    },
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
