//! The rate-source capability and its canonical output.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use ripefx_common::{Currency, Stablecoin, StablecoinRates};

use crate::error::FetchError;

/// Identity of a rate provider, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// Stablecoin-price provider; yields per-stablecoin rates too.
    CoinGecko,
    /// ExchangeRate-API, generic fiat rates.
    ExchangeRateApi,
    /// Open ER API, generic fiat rates.
    OpenErApi,
    /// Frankfurter (ECB data), generic fiat rates.
    Frankfurter,
    /// Scripted source used in tests.
    #[cfg(any(test, feature = "test-utils"))]
    Mock(&'static str),
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::CoinGecko => write!(f, "coingecko"),
            SourceId::ExchangeRateApi => write!(f, "exchangerate-api"),
            SourceId::OpenErApi => write!(f, "open-er-api"),
            SourceId::Frankfurter => write!(f, "frankfurter"),
            #[cfg(any(test, feature = "test-utils"))]
            SourceId::Mock(name) => write!(f, "mock:{name}"),
        }
    }
}

/// Canonical result of one successful source attempt: a validated fiat
/// rate for every supported currency, and per-stablecoin rates when the
/// provider quotes stablecoins directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedRates {
    /// Stablecoin-unit → currency-unit rate per currency. Always covers
    /// the full supported set; validation rejects partial maps.
    pub fiat: HashMap<Currency, Decimal>,
    /// Coin-specific rates, when the provider supplies them.
    pub stablecoins: Option<HashMap<Stablecoin, StablecoinRates>>,
}

impl FetchedRates {
    /// Fiat-only result (the generic fiat providers).
    pub fn fiat_only(fiat: HashMap<Currency, Decimal>) -> Self {
        Self {
            fiat,
            stablecoins: None,
        }
    }
}

/// One external rate provider. Each adapter knows its fixed endpoint,
/// how to parse its response shape, and its own identity.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Provider identity, used for attribution and logging.
    fn id(&self) -> SourceId;

    /// Fetch and canonicalize the provider's current rates.
    async fn fetch(&self) -> Result<FetchedRates, FetchError>;
}

/// Validate one raw provider rate: present, finite, and positive. A
/// single bad field invalidates the whole attempt; there is no partial
/// acceptance.
pub(crate) fn require_rate(currency: Currency, value: Option<f64>) -> Result<Decimal, FetchError> {
    let raw = value
        .ok_or_else(|| FetchError::InvalidData(format!("missing rate for {currency}")))?;
    if !raw.is_finite() || raw <= 0.0 {
        return Err(FetchError::InvalidData(format!(
            "rate for {currency} is not a positive number: {raw}"
        )));
    }
    Decimal::from_f64(raw)
        .ok_or_else(|| FetchError::InvalidData(format!("rate for {currency} not representable")))
}

/// Scripted rate source for tests: fixed outcome, optional artificial
/// latency, and a call counter.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateSource {
    name: &'static str,
    outcome: Result<FetchedRates, FetchError>,
    delay: Option<std::time::Duration>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateSource {
    /// Source that always returns the given rates.
    pub fn succeeding(name: &'static str, rates: FetchedRates) -> Self {
        Self {
            name,
            outcome: Ok(rates),
            delay: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Source that always fails with the given error.
    pub fn failing(name: &'static str, error: FetchError) -> Self {
        Self {
            name,
            outcome: Err(error),
            delay: None,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Delay every fetch by `delay` before responding.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times this source has been asked for rates.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for MockRateSource {
    fn id(&self) -> SourceId {
        SourceId::Mock(self.name)
    }

    async fn fetch(&self) -> Result<FetchedRates, FetchError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_require_rate_accepts_positive() {
        assert_eq!(require_rate(Currency::Php, Some(58.9)).unwrap(), dec!(58.9));
    }

    #[test]
    fn test_require_rate_rejects_missing_and_bad_values() {
        assert!(matches!(
            require_rate(Currency::Php, None),
            Err(FetchError::InvalidData(_))
        ));
        assert!(matches!(
            require_rate(Currency::Thb, Some(0.0)),
            Err(FetchError::InvalidData(_))
        ));
        assert!(matches!(
            require_rate(Currency::Idr, Some(-15000.0)),
            Err(FetchError::InvalidData(_))
        ));
        assert!(matches!(
            require_rate(Currency::Myr, Some(f64::NAN)),
            Err(FetchError::InvalidData(_))
        ));
        assert!(matches!(
            require_rate(Currency::Myr, Some(f64::INFINITY)),
            Err(FetchError::InvalidData(_))
        ));
    }
}
