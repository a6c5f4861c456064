//! Ordered failover across rate sources.
//!
//! Sources are tried one at a time, in a fixed priority order, each
//! bounded by a per-attempt timeout. The first structurally valid result
//! wins and later sources are never contacted: the order encodes a
//! trust/accuracy ranking, and a valid answer makes further calls
//! wasted work. Failure is a first-class result, never a panic or a
//! propagated adapter error.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};

use ripefx_common::{CurrencyRate, Currency, Stablecoin, StablecoinRates};

use crate::error::{AcquireError, FetchError};
use crate::source::{FetchedRates, RateSource, SourceId};

/// Ripe's customer spread over the interbank rate: 0.3%.
const CUSTOMER_SPREAD: Decimal = Decimal::from_parts(3, 0, 0, false, 3);

/// Default bound on a single source attempt.
const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Canonical outcome of a successful acquisition pass, ready to commit
/// to the rate store as a whole.
#[derive(Debug, Clone)]
pub struct RateAcquisition {
    /// Interbank/customer rate pair per currency.
    pub rates: HashMap<Currency, CurrencyRate>,
    /// Fiat rates per stablecoin.
    pub stablecoins: HashMap<Stablecoin, StablecoinRates>,
    /// Which source supplied the data.
    pub source: SourceId,
}

/// Tries rate sources in priority order until one produces a valid
/// result.
pub struct FallbackOrchestrator {
    sources: Vec<Arc<dyn RateSource>>,
    attempt_timeout: Duration,
}

impl FallbackOrchestrator {
    /// Build an orchestrator over the given sources, highest trust
    /// first.
    pub fn new(sources: Vec<Arc<dyn RateSource>>) -> Self {
        Self {
            sources,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Override the per-attempt timeout. The same bound applies to every
    /// source.
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Walk the sources in order and return the first valid result, or
    /// `AllSourcesFailed` if none produced one.
    pub async fn acquire(&self) -> Result<RateAcquisition, AcquireError> {
        let mut attempts = Vec::new();

        for source in &self.sources {
            let id = source.id();
            let outcome = tokio::time::timeout(self.attempt_timeout, source.fetch()).await;

            match outcome {
                Err(_) => {
                    warn!(source = %id, "rate source timed out");
                    attempts.push((id, FetchError::Timeout));
                }
                Ok(Err(error)) => {
                    warn!(source = %id, error = %error, "rate source failed");
                    attempts.push((id, error));
                }
                Ok(Ok(fetched)) => {
                    info!(
                        source = %id,
                        currencies = fetched.fiat.len(),
                        coin_specific = fetched.stablecoins.is_some(),
                        "rates acquired"
                    );
                    return Ok(canonicalize(fetched, id));
                }
            }
        }

        warn!(failed = attempts.len(), "all rate sources failed");
        Err(AcquireError::AllSourcesFailed { attempts })
    }
}

/// Turn a validated provider result into the canonical acquisition.
///
/// The provider's rate is the interbank rate; the customer rate applies
/// the fixed 0.3% spread. When the provider quoted only fiat rates, the
/// stablecoin map is derived uniformly: every supported coin gets the
/// same customer-rate map, pegged 1:1 to USD. That treats USDC, USDT,
/// and USDG as rate-equivalent proxies; the fiat providers simply have
/// no per-coin data.
fn canonicalize(fetched: FetchedRates, source: SourceId) -> RateAcquisition {
    let multiplier = Decimal::ONE - CUSTOMER_SPREAD;

    let rates: HashMap<Currency, CurrencyRate> = fetched
        .fiat
        .iter()
        .map(|(currency, interbank)| {
            (*currency, CurrencyRate::new(*interbank, *interbank * multiplier))
        })
        .collect();

    let stablecoins = match fetched.stablecoins {
        Some(coins) => coins,
        None => {
            let derived: HashMap<Currency, Decimal> = fetched
                .fiat
                .iter()
                .map(|(currency, interbank)| (*currency, *interbank * multiplier))
                .collect();
            Stablecoin::ALL
                .into_iter()
                .map(|coin| (coin, StablecoinRates::pegged(derived.clone())))
                .collect()
        }
    };

    RateAcquisition {
        rates,
        stablecoins,
        source,
    }
}
