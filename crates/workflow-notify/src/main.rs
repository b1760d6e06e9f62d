use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tokio::runtime::Runtime;

use workflow_notify::cli::{Cli, Commands};
use workflow_notify::config::Config;
use workflow_notify::{logging, Delivery, HttpSink, Notifier, WorkflowContext};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let rt = Runtime::new()?;
    rt.block_on(async {
        match cli.command {
            Commands::Send {
                status,
                webhook_url,
                profile,
            } => {
                let config = Config::load(cli.config.clone())?;
                let url = config.resolve_webhook_url(webhook_url.as_deref(), profile.as_deref())?;
                let ctx = WorkflowContext::from_env().context("Loading workflow context")?;

                let notifier = notifier(&config);
                match notifier
                    .notify(&ctx, status, &url)
                    .await
                    .context("Sending Slack webhook")?
                {
                    Delivery::Sent => println!("Notification sent for [{}] event.", ctx.event_name),
                    Delivery::Skipped => {
                        println!("We don't support the [{}] event yet.", ctx.event_name)
                    }
                }
            }
            Commands::Preview { status } => {
                let config = Config::load(cli.config.clone())?;
                let ctx = WorkflowContext::from_env().context("Loading workflow context")?;

                match notifier(&config).prepare(&ctx, status, Utc::now()) {
                    Some(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
                    None => println!("We don't support the [{}] event yet.", ctx.event_name),
                }
            }
            Commands::Version { json } => {
                if json {
                    let info = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "commit": option_env!("GIT_SHA").unwrap_or("unknown"),
                        "build_date": option_env!("BUILD_DATE").unwrap_or("unknown"),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!(
                        "workflow-notify {} (commit: {}, built: {})",
                        env!("CARGO_PKG_VERSION"),
                        option_env!("GIT_SHA").unwrap_or("unknown"),
                        option_env!("BUILD_DATE").unwrap_or("unknown"),
                    );
                }
            }
        }
        Ok(())
    })
}

fn notifier(config: &Config) -> Notifier<HttpSink> {
    let notifier = Notifier::new(HttpSink::default());
    match &config.footer_icon {
        Some(icon) => notifier.with_footer_icon(icon),
        None => notifier,
    }
}
