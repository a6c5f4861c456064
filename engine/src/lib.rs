//! Ripe FX Conversion Engine
//!
//! Pure, deterministic conversion math over a rate snapshot and a fee
//! schedule. No network, no clock, no shared state: every function here
//! is a plain function of its arguments.
//!
//! - Forward: stablecoin amount sent → fiat received, fee by fee.
//! - Reverse: target fiat received → stablecoin amount required, solved
//!   in closed form and re-run forward for a consistent breakdown.
//! - Legacy: the same conversion under a legacy provider's fee schedule,
//!   used only for the savings comparison.

pub mod convert;
pub mod input;
pub mod quote;

pub use convert::{compute_savings, convert_forward, convert_legacy, convert_reverse};
pub use input::{validate_amount, AmountError, MAX_AMOUNT, MIN_AMOUNT};
pub use quote::{ConversionResult, LegacyResult, SavingsResult};
