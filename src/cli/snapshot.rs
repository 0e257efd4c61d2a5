//! One-shot `current` and `history` commands

use crate::cli::output::{format_current_table, format_history_table, format_records_json};
use crate::cli::{load_config, CurrentArgs, HistoryArgs};
use crate::dashboard::{format_last_updated, render_current, render_history};
use crate::monitor::{HttpMonitorClient, MonitorApi};
use chrono::Local;

/// Fetch the current snapshot and format it.
pub async fn handle_current(args: &CurrentArgs, api: &dyn MonitorApi) -> anyhow::Result<String> {
    let records = api.fetch_current().await?;

    if args.json {
        return Ok(format_records_json(&records)?);
    }

    let mut output = format_current_table(&render_current(&records));
    output.push('\n');
    output.push_str(&format_last_updated(Some(&Local::now())));
    Ok(output)
}

/// Fetch one server's history and format it.
pub async fn handle_history(args: &HistoryArgs, api: &dyn MonitorApi) -> anyhow::Result<String> {
    let records = api.fetch_history(&args.server).await?;

    if args.json {
        return Ok(format_records_json(&records)?);
    }

    Ok(format!(
        "{}\n{}",
        args.server,
        format_history_table(&render_history(&records))
    ))
}

/// Entry point for `xrde2e current`.
pub async fn run_current(args: CurrentArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(ref url) = args.url {
        config.dashboard.base_url = url.clone();
    }
    config.validate()?;

    let client = HttpMonitorClient::new(config.dashboard)?;
    println!("{}", handle_current(&args, &client).await?);
    Ok(())
}

/// Entry point for `xrde2e history`.
pub async fn run_history(args: HistoryArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.config)?;
    if let Some(ref url) = args.url {
        config.dashboard.base_url = url.clone();
    }
    if let Some(limit) = args.limit {
        config.dashboard.history_limit = limit;
    }
    config.validate()?;

    let client = HttpMonitorClient::new(config.dashboard)?;
    println!("{}", handle_history(&args, &client).await?);
    Ok(())
}
