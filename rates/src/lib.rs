//! Ripe FX Rate Acquisition
//!
//! Keeps a usable exchange-rate snapshot available despite unreliable
//! third-party rate APIs.
//!
//! - [`RateSource`] adapters, one per provider, each turning a
//!   provider-specific JSON response into a canonical fiat-rate map.
//! - [`FallbackOrchestrator`], which walks the adapters in trust order
//!   and stops at the first structurally valid result.
//! - [`RateStore`], the single atomically-replaced snapshot slot with
//!   staleness tracking.
//! - [`RefreshScheduler`], which refreshes at startup and on a fixed
//!   interval, with a manual trigger.

pub mod error;
pub mod orchestrator;
pub mod scheduler;
pub mod source;
pub mod sources;
pub mod store;

pub use error::{AcquireError, FetchError};
pub use orchestrator::{FallbackOrchestrator, RateAcquisition};
pub use scheduler::{RefreshScheduler, SchedulerHandle};
pub use source::{FetchedRates, RateSource, SourceId};
pub use sources::{default_sources, CoinGeckoSource, FiatRatesSource};
pub use store::RateStore;
