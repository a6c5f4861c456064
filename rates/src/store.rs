//! The single snapshot slot.
//!
//! The store is the one piece of shared mutable state in the core:
//! concurrent refreshes serialize on it, and the last completed write
//! wins. A snapshot is committed whole, so readers always see the rates
//! from one provider call, never a mix.

use chrono::Duration;
use parking_lot::RwLock;

use ripefx_common::time::{constants, now, Timestamp};
use ripefx_common::RateSnapshot;

use crate::orchestrator::RateAcquisition;
use crate::source::SourceId;

#[derive(Debug)]
struct StoreInner {
    snapshot: RateSnapshot,
    last_update: Option<Timestamp>,
    source: Option<SourceId>,
}

/// Holds the current rate snapshot, its timestamp, and the source that
/// supplied it.
#[derive(Debug)]
pub struct RateStore {
    inner: RwLock<StoreInner>,
    stale_threshold: Duration,
}

impl RateStore {
    /// Create a store holding the seed snapshot, marked as never
    /// updated (and therefore stale).
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                snapshot: RateSnapshot::default(),
                last_update: None,
                source: None,
            }),
            stale_threshold: constants::stale_threshold(),
        }
    }

    /// Atomically replace the snapshot with an acquisition result.
    pub fn apply(&self, acquisition: RateAcquisition) {
        let snapshot = RateSnapshot {
            rates: acquisition.rates,
            stablecoins: acquisition.stablecoins,
        };
        let mut inner = self.inner.write();
        inner.snapshot = snapshot;
        inner.last_update = Some(now());
        inner.source = Some(acquisition.source);
    }

    /// The latest fully-committed snapshot.
    pub fn snapshot(&self) -> RateSnapshot {
        self.inner.read().snapshot.clone()
    }

    /// When the snapshot was last replaced; `None` before the first
    /// successful fetch.
    pub fn last_update(&self) -> Option<Timestamp> {
        self.inner.read().last_update
    }

    /// Which source supplied the current snapshot.
    pub fn source(&self) -> Option<SourceId> {
        self.inner.read().source
    }

    /// True when no update has ever landed, or the snapshot is older
    /// than the staleness threshold.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(now())
    }

    fn is_stale_at(&self, at: Timestamp) -> bool {
        match self.inner.read().last_update {
            None => true,
            Some(updated) => at - updated > self.stale_threshold,
        }
    }
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use ripefx_common::{Currency, CurrencyRate, Stablecoin, StablecoinRates};
    use rust_decimal_macros::dec;

    fn acquisition() -> RateAcquisition {
        let rates = HashMap::from([
            (Currency::Php, CurrencyRate::new(dec!(60.0), dec!(59.82))),
            (Currency::Thb, CurrencyRate::new(dec!(36.0), dec!(35.89))),
            (Currency::Idr, CurrencyRate::new(dec!(16000), dec!(15952))),
            (Currency::Myr, CurrencyRate::new(dec!(4.70), dec!(4.68))),
        ]);
        let fiat: HashMap<Currency, _> = rates
            .iter()
            .map(|(currency, rate)| (*currency, rate.customer))
            .collect();
        let stablecoins = Stablecoin::ALL
            .into_iter()
            .map(|coin| (coin, StablecoinRates::pegged(fiat.clone())))
            .collect();
        RateAcquisition {
            rates,
            stablecoins,
            source: SourceId::Frankfurter,
        }
    }

    #[test]
    fn test_fresh_store_is_stale_with_seed_snapshot() {
        let store = RateStore::new();
        assert!(store.is_stale());
        assert!(store.last_update().is_none());
        assert!(store.source().is_none());
        // Seed rates are still answerable.
        assert!(store.snapshot().rate(Currency::Php).is_some());
    }

    #[test]
    fn test_apply_replaces_snapshot_whole() {
        let store = RateStore::new();
        store.apply(acquisition());

        let snapshot = store.snapshot();
        assert_eq!(snapshot.rate(Currency::Php).unwrap().interbank, dec!(60.0));
        assert_eq!(store.source(), Some(SourceId::Frankfurter));
        assert!(store.last_update().is_some());
        assert!(!store.is_stale());
    }

    #[test]
    fn test_staleness_threshold() {
        let store = RateStore::new();
        store.apply(acquisition());
        let updated = store.last_update().unwrap();

        assert!(!store.is_stale_at(updated + Duration::minutes(1)));
        assert!(store.is_stale_at(updated + Duration::minutes(11)));
        // Exactly at the threshold still counts as fresh.
        assert!(!store.is_stale_at(updated + Duration::minutes(10)));
    }

    #[test]
    fn test_last_write_wins() {
        let store = RateStore::new();
        store.apply(acquisition());

        let mut newer = acquisition();
        newer
            .rates
            .insert(Currency::Php, CurrencyRate::new(dec!(61.0), dec!(60.8)));
        newer.source = SourceId::CoinGecko;
        store.apply(newer);

        assert_eq!(
            store.snapshot().rate(Currency::Php).unwrap().interbank,
            dec!(61.0)
        );
        assert_eq!(store.source(), Some(SourceId::CoinGecko));
    }
}
