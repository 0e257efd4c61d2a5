//! Background polling of the current snapshot.

use super::state::DashboardState;
use crate::logging::payload_preview;
use crate::monitor::{FetchError, MonitorApi};
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Log a failed read with its status and raw payload.
pub(crate) fn log_fetch_error(endpoint: &str, error: &FetchError) {
    tracing::warn!(
        endpoint,
        status = ?error.status(),
        payload = %payload_preview(error.payload()),
        error = %error,
        "Monitoring API read failed"
    );
}

/// Periodically reads the current snapshot and publishes it.
///
/// Polls are sequential: the delay starts when a poll completes, so a slow
/// backend stretches the cycle instead of stacking requests.
pub struct Poller {
    api: Arc<dyn MonitorApi>,
    interval: Duration,
    state_tx: watch::Sender<Arc<DashboardState>>,
}

impl Poller {
    pub fn new(api: Arc<dyn MonitorApi>, interval: Duration) -> Self {
        let (state_tx, _) = watch::channel(Arc::new(DashboardState::default()));
        Self {
            api,
            interval,
            state_tx,
        }
    }

    /// Receive every published state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.state_tx.subscribe()
    }

    /// The most recently published state.
    pub fn state(&self) -> Arc<DashboardState> {
        self.state_tx.borrow().clone()
    }

    /// Run a single poll.
    ///
    /// On success the snapshot replaces the published state and is stamped
    /// with the current local time. On failure the error is logged and the
    /// published state is left as it was.
    pub async fn poll_once(&self) -> Result<usize, FetchError> {
        match self.api.fetch_current().await {
            Ok(records) => {
                let count = records.len();
                self.state_tx
                    .send_replace(Arc::new(DashboardState::new(records, Local::now())));
                metrics::counter!(crate::metrics::DASHBOARD_POLLS_TOTAL, "outcome" => "success")
                    .increment(1);
                tracing::debug!(records = count, "Current snapshot updated");
                Ok(count)
            }
            Err(e) => {
                log_fetch_error("current", &e);
                metrics::counter!(crate::metrics::DASHBOARD_POLLS_TOTAL, "outcome" => "failure")
                    .increment(1);
                Err(e)
            }
        }
    }

    /// Start the polling loop.
    ///
    /// The first poll runs immediately. The loop only ends when
    /// `cancel_token` is cancelled.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            tracing::info!(
                interval_seconds = self.interval.as_secs(),
                "Dashboard poller started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = self.poll_once() => {}
                }

                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = tokio::time::sleep(self.interval) => {}
                }
            }

            tracing::info!("Dashboard poller shutting down");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RequestRecord;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted results, then fails.
    struct ScriptedApi {
        results: Mutex<VecDeque<Result<Vec<RequestRecord>, FetchError>>>,
    }

    impl ScriptedApi {
        fn new(results: Vec<Result<Vec<RequestRecord>, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
            })
        }
    }

    #[async_trait]
    impl MonitorApi for ScriptedApi {
        async fn fetch_current(&self) -> Result<Vec<RequestRecord>, FetchError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Malformed("script exhausted".to_string())))
        }

        async fn fetch_history(&self, _server: &str) -> Result<Vec<RequestRecord>, FetchError> {
            Ok(vec![])
        }
    }

    fn record(id: &str) -> RequestRecord {
        RequestRecord {
            security_server: "SS1".to_string(),
            label: None,
            producer_member: None,
            begin: None,
            end: None,
            duration: 10,
            request_id: id.to_string(),
            status: true,
            fault_code: None,
            fault_string: None,
            created_date: None,
        }
    }

    fn transport_error() -> FetchError {
        FetchError::Transport {
            status: Some(502),
            message: "Bad Gateway".to_string(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_successful_poll_replaces_state() {
        let api = ScriptedApi::new(vec![
            Ok(vec![record("a"), record("b")]),
            Ok(vec![record("c")]),
        ]);
        let poller = Poller::new(api, Duration::from_secs(5));

        assert_eq!(poller.poll_once().await.unwrap(), 2);
        assert_eq!(poller.poll_once().await.unwrap(), 1);

        let state = poller.state();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].request_id, "c");
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_state() {
        let api = ScriptedApi::new(vec![Ok(vec![record("a")]), Err(transport_error())]);
        let poller = Poller::new(api, Duration::from_secs(5));

        poller.poll_once().await.unwrap();
        let before = poller.state();

        assert!(poller.poll_once().await.is_err());
        let after = poller.state();

        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.last_updated, before.last_updated);
    }

    #[tokio::test]
    async fn test_last_updated_reflects_latest_success() {
        let api = ScriptedApi::new(vec![
            Err(transport_error()),
            Ok(vec![record("a")]),
        ]);
        let poller = Poller::new(api, Duration::from_secs(5));

        assert!(poller.poll_once().await.is_err());
        assert!(poller.state().is_initial());

        let before = Local::now();
        poller.poll_once().await.unwrap();
        let after = Local::now();

        let stamped = poller.state().last_updated.unwrap();
        assert!(stamped >= before && stamped <= after);
    }

    #[tokio::test]
    async fn test_failed_first_poll_publishes_nothing() {
        let api = ScriptedApi::new(vec![Err(transport_error())]);
        let poller = Poller::new(api, Duration::from_secs(5));
        let rx = poller.subscribe();

        assert!(poller.poll_once().await.is_err());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_poller_stops_on_cancel() {
        let api = ScriptedApi::new(vec![]);
        let poller = Poller::new(api, Duration::from_millis(10));

        let cancel = CancellationToken::new();
        let handle = poller.start(cancel.clone());

        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
        assert!(result.is_ok());
    }
}
