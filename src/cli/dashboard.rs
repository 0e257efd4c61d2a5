//! Dashboard command implementation
//!
//! Redraws the terminal whenever the poller publishes a snapshot or the
//! history panel changes, and reads drill-down commands from stdin.

use crate::cli::output::{format_current_table, format_history_table};
use crate::cli::{load_config, DashboardArgs};
use crate::config::E2eConfig;
use crate::dashboard::{
    format_last_updated, render_current, render_history, DashboardCommand, DashboardState,
    DrillDown, HistoryPanel, Poller,
};
use crate::logging::{init_tracing, LogTarget};
use crate::metrics::PrometheusHandle;
use crate::monitor::{HttpMonitorClient, MonitorApi};
use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &DashboardArgs) -> anyhow::Result<E2eConfig> {
    let mut config = load_config(&args.config)?;

    if let Some(ref url) = args.url {
        config.dashboard.base_url = url.clone();
    }
    if let Some(interval) = args.interval {
        config.dashboard.interval_seconds = interval;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Compose the whole screen: current table, last update, history panel.
pub fn render_screen(state: &DashboardState, panel: Option<&HistoryPanel>) -> String {
    let mut screen = String::new();

    if state.is_initial() {
        let _ = writeln!(screen, "Waiting for the first snapshot...");
    } else {
        let _ = writeln!(screen, "{}", format_current_table(&render_current(&state.records)));
    }
    let _ = writeln!(
        screen,
        "{}",
        format_last_updated(state.last_updated.as_ref()).dimmed()
    );

    if let Some(panel) = panel {
        let _ = writeln!(screen);
        let _ = writeln!(screen, "{}", panel.server.bold());
        match &panel.records {
            Some(records) => {
                let _ = writeln!(screen, "{}", format_history_table(&render_history(records)));
            }
            None => {
                let _ = writeln!(screen, "Loading history...");
            }
        }
    }

    let _ = writeln!(screen);
    let _ = write!(
        screen,
        "{}",
        "[row # or server id] history  [c] close  [q] quit > ".dimmed()
    );
    screen
}

fn redraw(poller_state: &DashboardState, drill: &DrillDown) {
    let screen = render_screen(poller_state, drill.panel().as_ref());
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}{}", CLEAR_SCREEN, screen);
    let _ = stdout.flush();
}

/// Bind the `/metrics` endpoint and serve it until `cancel_token` fires.
async fn serve_metrics(
    port: u16,
    prometheus: PrometheusHandle,
    cancel_token: CancellationToken,
) -> anyhow::Result<JoinHandle<std::io::Result<()>>> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "Dashboard metrics listening");

    let app: axum::Router = crate::metrics::handler::router(prometheus);
    Ok(tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(cancel_token.cancelled_owned())
            .await
    }))
}

/// Main dashboard command handler
pub async fn run_dashboard(args: DashboardArgs) -> anyhow::Result<()> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging, LogTarget::Stderr)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;
    tracing::debug!(?config, "Loaded configuration");

    let prometheus = crate::metrics::metrics_handle();
    let api: Arc<dyn MonitorApi> = Arc::new(HttpMonitorClient::new(config.dashboard.clone())?);

    let poller = Poller::new(
        Arc::clone(&api),
        Duration::from_secs(config.dashboard.interval_seconds),
    );
    let mut state_rx = poller.subscribe();
    let drill = Arc::new(DrillDown::new(api));
    let mut panel_rx = drill.subscribe();

    let cancel_token = CancellationToken::new();
    let metrics_server = match config.dashboard.metrics_port {
        0 => None,
        port => Some(serve_metrics(port, prometheus, cancel_token.clone()).await?),
    };
    let poller_handle = poller.start(cancel_token.clone());
    let shutdown = tokio::spawn(super::mock::shutdown_signal(cancel_token.clone()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let initial = state_rx.borrow_and_update().clone();
    redraw(&initial, &drill);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = panel_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match DashboardCommand::parse(&line) {
                    DashboardCommand::Quit => break,
                    DashboardCommand::Close => drill.close(),
                    DashboardCommand::Open(selection) => {
                        let state = state_rx.borrow().clone();
                        match selection.resolve(&state) {
                            Some(server) => {
                                let _ = drill.open(&server);
                            }
                            None => tracing::warn!(?selection, "No such row"),
                        }
                    }
                    DashboardCommand::Nothing => {}
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, drill-down disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin, drill-down disabled");
                    stdin_open = false;
                }
            },
        }

        let state = state_rx.borrow_and_update().clone();
        redraw(&state, &drill);
    }

    cancel_token.cancel();
    poller_handle.await?;
    shutdown.await?;
    if let Some(server) = metrics_server {
        server.await??;
    }

    println!();
    Ok(())
}
