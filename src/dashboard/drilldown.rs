//! On-demand history of one security server.
//!
//! Every `open` takes a new generation number. A finished fetch is applied
//! only while its generation is still the latest, so a slow response for a
//! server the user has already navigated away from cannot overwrite the
//! panel that replaced it.

use super::poller::log_fetch_error;
use crate::events::RequestRecord;
use crate::monitor::{FetchError, MonitorApi};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Contents of the history panel.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPanel {
    /// Security server whose history is shown
    pub server: String,
    /// Generation that opened this panel
    pub generation: u64,
    /// History rows, `None` while the fetch is in flight
    pub records: Option<Vec<RequestRecord>>,
}

#[derive(Debug, Default)]
struct Inner {
    generation: u64,
    panel: Option<HistoryPanel>,
}

/// Drill-down controller.
pub struct DrillDown {
    api: Arc<dyn MonitorApi>,
    inner: RwLock<Inner>,
    changes: watch::Sender<u64>,
}

impl DrillDown {
    pub fn new(api: Arc<dyn MonitorApi>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            api,
            inner: RwLock::new(Inner::default()),
            changes,
        }
    }

    /// Notified with the latest generation whenever the panel changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Current panel, if open.
    pub fn panel(&self) -> Option<HistoryPanel> {
        self.read().panel.clone()
    }

    /// Latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    /// Open an empty panel for `server` and return its generation.
    pub fn begin(&self, server: &str) -> u64 {
        let generation = {
            let mut inner = self.write();
            inner.generation += 1;
            inner.panel = Some(HistoryPanel {
                server: server.to_string(),
                generation: inner.generation,
                records: None,
            });
            inner.generation
        };
        self.changes.send_replace(generation);
        generation
    }

    /// Apply a finished fetch.
    ///
    /// Returns false when the result was discarded, either because a newer
    /// generation exists or because the fetch failed. A failure on a panel
    /// still loading leaves it with an empty table; rows already shown stay.
    pub fn complete(
        &self,
        generation: u64,
        result: Result<Vec<RequestRecord>, FetchError>,
    ) -> bool {
        let applied = {
            let mut inner = self.write();
            if inner.generation != generation {
                tracing::debug!(
                    generation,
                    latest = inner.generation,
                    "Discarding stale history response"
                );
                metrics::counter!(crate::metrics::DASHBOARD_DRILLDOWNS_TOTAL, "outcome" => "stale")
                    .increment(1);
                return false;
            }
            let Some(panel) = inner.panel.as_mut().filter(|p| p.generation == generation) else {
                return false;
            };

            match result {
                Ok(records) => {
                    panel.records = Some(records);
                    true
                }
                Err(e) => {
                    log_fetch_error("history", &e);
                    if panel.records.is_none() {
                        panel.records = Some(Vec::new());
                    }
                    false
                }
            }
        };

        let outcome = if applied { "success" } else { "failure" };
        metrics::counter!(crate::metrics::DASHBOARD_DRILLDOWNS_TOTAL, "outcome" => outcome)
            .increment(1);
        self.changes.send_replace(generation);
        applied
    }

    /// Open the panel for `server` and fetch its history in the background.
    ///
    /// The task resolves to whether the response was applied.
    pub fn open(self: &Arc<Self>, server: &str) -> JoinHandle<bool> {
        let generation = self.begin(server);
        let this = Arc::clone(self);
        let server = server.to_string();

        tracing::info!(server = %server, generation, "Opening history");

        tokio::spawn(async move {
            let result = this.api.fetch_history(&server).await;
            this.complete(generation, result)
        })
    }

    /// Close the panel. In-flight fetches become stale.
    pub fn close(&self) {
        let generation = {
            let mut inner = self.write();
            inner.generation += 1;
            inner.panel = None;
            inner.generation
        };
        self.changes.send_replace(generation);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EmptyApi;

    #[async_trait]
    impl MonitorApi for EmptyApi {
        async fn fetch_current(&self) -> Result<Vec<RequestRecord>, FetchError> {
            Ok(vec![])
        }

        async fn fetch_history(&self, _server: &str) -> Result<Vec<RequestRecord>, FetchError> {
            Ok(vec![])
        }
    }

    fn history(request_id: &str) -> Vec<RequestRecord> {
        vec![RequestRecord {
            security_server: String::new(),
            label: None,
            producer_member: None,
            begin: None,
            end: None,
            duration: 1,
            request_id: request_id.to_string(),
            status: true,
            fault_code: None,
            fault_string: None,
            created_date: None,
        }]
    }

    #[test]
    fn test_begin_opens_loading_panel() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let generation = drill.begin("SS1");

        let panel = drill.panel().unwrap();
        assert_eq!(panel.server, "SS1");
        assert_eq!(panel.generation, generation);
        assert!(panel.records.is_none());
    }

    #[test]
    fn test_complete_applies_latest_generation() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let generation = drill.begin("SS1");

        assert!(drill.complete(generation, Ok(history("R1"))));
        let records = drill.panel().unwrap().records.unwrap();
        assert_eq!(records[0].request_id, "R1");
    }

    #[test]
    fn test_stale_response_does_not_overwrite_newer_panel() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let for_a = drill.begin("A");
        let for_b = drill.begin("B");

        // B resolves first, then A's slower response arrives
        assert!(drill.complete(for_b, Ok(history("from-b"))));
        assert!(!drill.complete(for_a, Ok(history("from-a"))));

        let panel = drill.panel().unwrap();
        assert_eq!(panel.server, "B");
        assert_eq!(panel.records.unwrap()[0].request_id, "from-b");
    }

    #[test]
    fn test_failed_fetch_ends_loading_with_empty_table() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let rx = drill.subscribe();
        let generation = drill.begin("SS1");

        let applied = drill.complete(
            generation,
            Err(FetchError::Malformed("not an array".to_string())),
        );
        assert!(!applied);
        assert_eq!(drill.panel().unwrap().records, Some(vec![]));
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_failed_refetch_keeps_shown_rows() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let generation = drill.begin("SS1");
        assert!(drill.complete(generation, Ok(history("R1"))));

        assert!(!drill.complete(
            generation,
            Err(FetchError::Malformed("not an array".to_string())),
        ));
        assert_eq!(drill.panel().unwrap().records.unwrap()[0].request_id, "R1");
    }

    #[test]
    fn test_generation_increases_on_open_and_close() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        assert_eq!(drill.generation(), 0);

        let first = drill.begin("A");
        assert_eq!(drill.generation(), first);

        drill.close();
        assert!(drill.generation() > first);
    }

    #[test]
    fn test_close_invalidates_in_flight_fetch() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let generation = drill.begin("SS1");
        drill.close();

        assert!(drill.panel().is_none());
        assert!(!drill.complete(generation, Ok(history("late"))));
        assert!(drill.panel().is_none());
    }

    #[test]
    fn test_changes_are_notified() {
        let drill = DrillDown::new(Arc::new(EmptyApi));
        let rx = drill.subscribe();

        let generation = drill.begin("SS1");
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), generation);
    }

    #[tokio::test]
    async fn test_open_fetches_in_background() {
        let drill = Arc::new(DrillDown::new(Arc::new(EmptyApi)));
        let applied = drill.open("SS1").await.unwrap();

        assert!(applied);
        assert_eq!(drill.panel().unwrap().records, Some(vec![]));
    }
}
