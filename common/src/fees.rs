//! Fee schedules.
//!
//! Two process-wide constant schedules: Ripe's own fees, and the legacy
//! provider baseline used only for the savings comparison. Legacy
//! providers bury an FX spread in their rate, so their schedule carries an
//! explicit spread percentage on top of the headline fees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ripe's fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Percentage transaction fee (e.g. 0.5 means 0.5%).
    pub transaction_fee_percent: Decimal,
    /// Flat network fee, denominated in the stablecoin's unit.
    pub network_fee_usd: Decimal,
    /// Minimum transaction fee floor, in stablecoin units.
    pub minimum_fee: Decimal,
}

impl FeeSchedule {
    /// Ripe's operating fee schedule: 0.5% with a $0.10 floor plus a
    /// $0.50 flat network fee.
    pub fn ripe() -> Self {
        Self {
            transaction_fee_percent: Decimal::new(5, 1),
            network_fee_usd: Decimal::new(50, 2),
            minimum_fee: Decimal::new(10, 2),
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::ripe()
    }
}

/// Legacy-provider fee schedule, used only for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFeeSchedule {
    /// Percentage transaction fee.
    pub transaction_fee_percent: Decimal,
    /// Flat network fee in USD.
    pub network_fee_usd: Decimal,
    /// FX spread hidden inside the legacy rate.
    pub fx_spread_percent: Decimal,
}

impl LegacyFeeSchedule {
    /// Typical legacy baseline: 3% transaction fee, $5 flat fee, and a
    /// hidden 2.5% FX spread.
    pub fn baseline() -> Self {
        Self {
            transaction_fee_percent: Decimal::new(30, 1),
            network_fee_usd: Decimal::new(50, 1),
            fx_spread_percent: Decimal::new(25, 1),
        }
    }
}

impl Default for LegacyFeeSchedule {
    fn default() -> Self {
        Self::baseline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ripe_schedule_values() {
        let fees = FeeSchedule::ripe();
        assert_eq!(fees.transaction_fee_percent, dec!(0.5));
        assert_eq!(fees.network_fee_usd, dec!(0.50));
        assert_eq!(fees.minimum_fee, dec!(0.10));
    }

    #[test]
    fn test_legacy_schedule_values() {
        let fees = LegacyFeeSchedule::baseline();
        assert_eq!(fees.transaction_fee_percent, dec!(3.0));
        assert_eq!(fees.network_fee_usd, dec!(5.0));
        assert_eq!(fees.fx_spread_percent, dec!(2.5));
    }
}
