//! Periodic and manual rate refresh.
//!
//! One acquisition at startup, then one per interval. A manual refresh
//! runs the identical path and may overlap a scheduled one: both are
//! allowed to complete and the store's last write wins, so no extra
//! coordination is needed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use ripefx_common::time::{constants, DurationExt};

use crate::error::AcquireError;
use crate::orchestrator::FallbackOrchestrator;
use crate::source::SourceId;
use crate::store::RateStore;

/// Drives acquisition on a fixed interval and on demand.
pub struct RefreshScheduler {
    orchestrator: Arc<FallbackOrchestrator>,
    store: Arc<RateStore>,
    interval: Duration,
}

impl RefreshScheduler {
    /// Scheduler with the default 2-minute refresh interval.
    pub fn new(orchestrator: Arc<FallbackOrchestrator>, store: Arc<RateStore>) -> Self {
        Self {
            orchestrator,
            store,
            interval: constants::refresh_interval().as_std(),
        }
    }

    /// Override the refresh interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one acquisition pass and commit the result. On failure the
    /// previous snapshot stays authoritative and the error is reported
    /// to the caller. Safe to call while a scheduled refresh is in
    /// flight.
    pub async fn refresh_now(&self) -> Result<SourceId, AcquireError> {
        match self.orchestrator.acquire().await {
            Ok(acquisition) => {
                let source = acquisition.source;
                self.store.apply(acquisition);
                info!(source = %source, "rate snapshot replaced");
                Ok(source)
            }
            Err(error) => {
                warn!(
                    stale = self.store.is_stale(),
                    "refresh failed, keeping previous snapshot"
                );
                Err(error)
            }
        }
    }

    /// Spawn the refresh loop: one pass immediately, then one per
    /// interval, until the handle is stopped.
    pub fn spawn(self: Arc<Self>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Failures are already logged; the loop keeps going.
                        let _ = self.refresh_now().await;
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("refresh scheduler stopping");
                        break;
                    }
                }
            }
        });

        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Handle to a running refresh loop.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stop the loop and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use ripefx_common::Currency;
    use rust_decimal_macros::dec;

    use crate::error::FetchError;
    use crate::source::{FetchedRates, MockRateSource, RateSource};

    fn fiat_rates() -> FetchedRates {
        FetchedRates::fiat_only(HashMap::from([
            (Currency::Php, dec!(59.0)),
            (Currency::Thb, dec!(35.5)),
            (Currency::Idr, dec!(15800)),
            (Currency::Myr, dec!(4.65)),
        ]))
    }

    fn scheduler_with(
        source: Arc<MockRateSource>,
        store: Arc<RateStore>,
    ) -> Arc<RefreshScheduler> {
        let orchestrator = Arc::new(FallbackOrchestrator::new(vec![
            source as Arc<dyn RateSource>
        ]));
        Arc::new(RefreshScheduler::new(orchestrator, store))
    }

    #[tokio::test]
    async fn test_manual_refresh_commits_to_store() {
        let source = Arc::new(MockRateSource::succeeding("live", fiat_rates()));
        let store = Arc::new(RateStore::new());
        let scheduler = scheduler_with(source, store.clone());

        assert!(store.is_stale());
        let committed = scheduler.refresh_now().await.unwrap();

        assert_eq!(committed, SourceId::Mock("live"));
        assert!(!store.is_stale());
        assert_eq!(store.source(), Some(SourceId::Mock("live")));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(MockRateSource::failing(
            "down",
            FetchError::Network("unreachable".into()),
        ));
        let store = Arc::new(RateStore::new());
        let scheduler = scheduler_with(source, store.clone());

        let before = store.snapshot();
        assert!(scheduler.refresh_now().await.is_err());

        assert_eq!(store.snapshot(), before);
        assert!(store.last_update().is_none());
    }

    #[tokio::test]
    async fn test_spawned_loop_refreshes_at_startup_and_on_interval() {
        let source = Arc::new(MockRateSource::succeeding("live", fiat_rates()));
        let store = Arc::new(RateStore::new());
        let orchestrator = Arc::new(FallbackOrchestrator::new(vec![
            source.clone() as Arc<dyn RateSource>
        ]));
        let scheduler = Arc::new(
            RefreshScheduler::new(orchestrator, store.clone())
                .with_interval(Duration::from_millis(20)),
        );

        let handle = scheduler.spawn();
        tokio::time::sleep(Duration::from_millis(70)).await;
        handle.stop().await;

        assert!(source.calls() >= 2, "expected startup tick plus interval ticks");
        assert!(store.last_update().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_manual_and_scheduled_refresh() {
        let source = Arc::new(MockRateSource::succeeding("live", fiat_rates()));
        let store = Arc::new(RateStore::new());
        let scheduler = scheduler_with(source.clone(), store.clone());

        // Two overlapping refreshes; both complete, last write wins.
        let (a, b) = tokio::join!(scheduler.refresh_now(), scheduler.refresh_now());
        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(source.calls(), 2);
        assert!(!store.is_stale());
    }
}
