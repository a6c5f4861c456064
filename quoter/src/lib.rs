//! Ripe FX Quote Service
//!
//! `FxService` wires the acquisition layer (sources, orchestrator,
//! store, scheduler) to the pure conversion engine and exposes the
//! surface an embedding UI consumes: acquire rates, read the snapshot
//! and its staleness, and quote forward, reverse, and legacy
//! conversions.

pub mod config;

pub use config::QuoterConfig;

use std::sync::Arc;

use rust_decimal::Decimal;

use ripefx_common::time::Timestamp;
use ripefx_common::{Currency, FeeSchedule, LegacyFeeSchedule, RateSnapshot};
use ripefx_engine::{
    compute_savings, convert_forward, convert_legacy, convert_reverse, ConversionResult,
    LegacyResult, SavingsResult,
};
use ripefx_rates::{
    default_sources, AcquireError, FallbackOrchestrator, RateSource, RateStore,
    RefreshScheduler, SchedulerHandle, SourceId,
};

/// The quote service facade.
pub struct FxService {
    store: Arc<RateStore>,
    scheduler: Arc<RefreshScheduler>,
    fees: FeeSchedule,
    legacy_fees: LegacyFeeSchedule,
}

impl FxService {
    /// Service over the production provider list.
    pub fn new(config: &QuoterConfig) -> Self {
        let client = reqwest::Client::new();
        Self::with_sources(config, default_sources(&client))
    }

    /// Service over an explicit source list (tests, custom deployments).
    pub fn with_sources(config: &QuoterConfig, sources: Vec<Arc<dyn RateSource>>) -> Self {
        let orchestrator = Arc::new(
            FallbackOrchestrator::new(sources).with_attempt_timeout(config.fetch_timeout),
        );
        let store = Arc::new(RateStore::new());
        let scheduler = Arc::new(
            RefreshScheduler::new(orchestrator, store.clone())
                .with_interval(config.refresh_interval),
        );

        Self {
            store,
            scheduler,
            fees: FeeSchedule::ripe(),
            legacy_fees: LegacyFeeSchedule::baseline(),
        }
    }

    /// Run one acquisition pass now. On failure the previous snapshot
    /// (possibly stale) remains authoritative.
    pub async fn acquire_rates(&self) -> Result<SourceId, AcquireError> {
        self.scheduler.refresh_now().await
    }

    /// Start the periodic refresh loop.
    pub fn spawn_scheduler(&self) -> SchedulerHandle {
        self.scheduler.clone().spawn()
    }

    /// The latest committed snapshot.
    pub fn snapshot(&self) -> RateSnapshot {
        self.store.snapshot()
    }

    /// Whether the snapshot is older than the trust threshold (or no
    /// fetch has succeeded yet).
    pub fn is_stale(&self) -> bool {
        self.store.is_stale()
    }

    /// When rates were last refreshed.
    pub fn last_update(&self) -> Option<Timestamp> {
        self.store.last_update()
    }

    /// Which provider supplied the current rates.
    pub fn source(&self) -> Option<SourceId> {
        self.store.source()
    }

    /// The operating fee schedule.
    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Fiat received for a stablecoin amount sent.
    pub fn convert_forward(&self, amount: Decimal, currency: Currency) -> Option<ConversionResult> {
        convert_forward(amount, currency, &self.store.snapshot(), &self.fees)
    }

    /// Stablecoin amount required for a target fiat payout.
    pub fn convert_reverse(
        &self,
        target_fiat: Decimal,
        currency: Currency,
    ) -> Option<ConversionResult> {
        convert_reverse(target_fiat, currency, &self.store.snapshot(), &self.fees)
    }

    /// The same conversion under the legacy provider's fees.
    pub fn convert_legacy(&self, amount: Decimal, currency: Currency) -> Option<LegacyResult> {
        convert_legacy(amount, currency, &self.store.snapshot(), &self.legacy_fees)
    }

    /// Compare a Ripe conversion against the legacy baseline.
    pub fn compute_savings(
        &self,
        primary: &ConversionResult,
        legacy: &LegacyResult,
    ) -> SavingsResult {
        compute_savings(primary, legacy)
    }
}
