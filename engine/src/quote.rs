//! Conversion result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Full fee breakdown for a stablecoin → fiat conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Fiat amount at the customer rate, before fees.
    pub gross_fiat: Decimal,
    /// Transaction fee in stablecoin units (floor applied).
    pub transaction_fee: Decimal,
    /// Transaction fee converted to fiat.
    pub transaction_fee_fiat: Decimal,
    /// Flat network fee converted to fiat.
    pub network_fee_fiat: Decimal,
    /// FX spread cost in fiat (interbank vs customer rate).
    pub fx_spread: Decimal,
    /// FX spread as a percentage of the interbank rate.
    pub fx_spread_percent: Decimal,
    /// Fiat amount the recipient receives.
    pub net_fiat: Decimal,
    /// Net fiat per stablecoin unit sent.
    pub effective_rate: Decimal,
    /// Transaction + network fees in fiat.
    pub total_fees_fiat: Decimal,
    /// Total fees as a percentage of the gross amount.
    pub total_fees_percent: Decimal,
    /// Customer rate the conversion was quoted at.
    pub customer_rate: Decimal,
    /// Interbank rate at quoting time.
    pub interbank_rate: Decimal,
    /// Reverse mode only: stablecoin amount required to fund the quote.
    pub required_amount: Option<Decimal>,
    /// Reverse mode only: the fiat amount originally asked for. The net
    /// amount may differ from this by a sub-unit rounding remainder.
    pub target_fiat: Option<Decimal>,
}

impl ConversionResult {
    /// Whether the minimum transaction fee floor was binding.
    pub fn minimum_fee_applied(&self, minimum_fee: Decimal) -> bool {
        self.transaction_fee == minimum_fee
    }
}

/// Comparison conversion under the legacy provider's fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyResult {
    /// Fiat amount the recipient would receive from the legacy provider.
    pub net_fiat: Decimal,
    /// Total legacy fees in fiat.
    pub total_fees_fiat: Decimal,
    /// Net fiat per stablecoin unit sent.
    pub effective_rate: Decimal,
    /// The legacy customer rate (interbank minus the hidden spread).
    pub legacy_rate: Decimal,
    /// Legacy transaction fee in fiat.
    pub transaction_fee_fiat: Decimal,
    /// Legacy network fee in fiat.
    pub network_fee_fiat: Decimal,
}

/// Outcome of comparing a Ripe conversion against the legacy baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsResult {
    /// Ripe net fiat minus legacy net fiat. Positive means Ripe pays out
    /// more.
    pub amount: Decimal,
    /// Savings as a percentage of the legacy payout (0 when the legacy
    /// payout is zero or negative).
    pub percent: Decimal,
    /// True when the Ripe result is the better one.
    pub ripe_better: bool,
}
