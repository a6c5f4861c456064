//! Ripe FX Common Types
//!
//! Shared types for the Ripe FX quoting core: supported currencies and
//! stablecoins, fee schedules, the exchange-rate snapshot, and time
//! utilities.

pub mod currency;
pub mod fees;
pub mod snapshot;
pub mod time;

pub use currency::*;
pub use fees::*;
pub use snapshot::*;
pub use time::*;
