use std::fmt;

use serde::{Deserialize, Serialize};

/// Final status of the job being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Success,
    Failure,
    Cancelled,
}

/// Attachment colour bar, using Slack's named colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Good,
    Danger,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub color: Color,
    pub text: &'static str,
}

impl JobStatus {
    pub fn display(self) -> StatusDisplay {
        match self {
            JobStatus::Success => StatusDisplay {
                color: Color::Good,
                text: "*Succeeded*",
            },
            JobStatus::Failure => StatusDisplay {
                color: Color::Danger,
                text: "*Failed*",
            },
            JobStatus::Cancelled => StatusDisplay {
                color: Color::Warning,
                text: "was *Cancelled*",
            },
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Success => "success",
            JobStatus::Failure => "failure",
            JobStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
