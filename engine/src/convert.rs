//! Forward, reverse, and legacy conversion math.
//!
//! All functions take the rate snapshot and fee schedule explicitly and
//! return `None` for amounts that are not yet convertible (zero or
//! negative). That is a normal outcome, not an error: the caller simply
//! has nothing to display.

use rust_decimal::{Decimal, RoundingStrategy};
use ripefx_common::{Currency, FeeSchedule, LegacyFeeSchedule, RateSnapshot};

use crate::quote::{ConversionResult, LegacyResult, SavingsResult};

/// Forward conversion: fiat received for `amount` stablecoin sent.
pub fn convert_forward(
    amount: Decimal,
    currency: Currency,
    snapshot: &RateSnapshot,
    fees: &FeeSchedule,
) -> Option<ConversionResult> {
    let rate = snapshot.rate(currency)?;
    if amount <= Decimal::ZERO {
        return None;
    }

    let gross_fiat = amount * rate.customer;

    // Percentage fee with the minimum floor, in stablecoin units.
    let fee_fraction = fees.transaction_fee_percent / Decimal::ONE_HUNDRED;
    let transaction_fee = (amount * fee_fraction).max(fees.minimum_fee);
    let transaction_fee_fiat = transaction_fee * rate.customer;

    let network_fee_fiat = fees.network_fee_usd * rate.customer;

    let net_fiat = gross_fiat - transaction_fee_fiat - network_fee_fiat;
    let effective_rate = net_fiat / amount;

    let fx_spread = amount * rate.spread();
    let fx_spread_percent = if rate.interbank.is_zero() {
        Decimal::ZERO
    } else {
        rate.spread() / rate.interbank * Decimal::ONE_HUNDRED
    };

    let total_fees_fiat = transaction_fee_fiat + network_fee_fiat;
    let total_fees_percent = if gross_fiat.is_zero() {
        Decimal::ZERO
    } else {
        total_fees_fiat / gross_fiat * Decimal::ONE_HUNDRED
    };

    Some(ConversionResult {
        gross_fiat,
        transaction_fee,
        transaction_fee_fiat,
        network_fee_fiat,
        fx_spread,
        fx_spread_percent,
        net_fiat,
        effective_rate,
        total_fees_fiat,
        total_fees_percent,
        customer_rate: rate.customer,
        interbank_rate: rate.interbank,
        required_amount: None,
        target_fiat: None,
    })
}

/// Reverse conversion: stablecoin amount required so that the recipient
/// nets `target_fiat`.
///
/// The forward formula is inverted algebraically. Two closed-form
/// branches: the percentage-fee case, and the minimum-fee case that takes
/// over when the implied percentage fee would fall under the floor. The
/// required amount is rounded to the smallest stablecoin unit and re-run
/// through [`convert_forward`], so the breakdown is always internally
/// consistent; the recovered net may differ from the target by a
/// sub-unit remainder. If the fee schedule ever changes shape, this
/// inversion has to be re-derived, not iterated.
pub fn convert_reverse(
    target_fiat: Decimal,
    currency: Currency,
    snapshot: &RateSnapshot,
    fees: &FeeSchedule,
) -> Option<ConversionResult> {
    let rate = snapshot.rate(currency)?;
    if target_fiat <= Decimal::ZERO || rate.customer <= Decimal::ZERO {
        return None;
    }

    let network_fee_fiat = fees.network_fee_usd * rate.customer;
    let fee_fraction = fees.transaction_fee_percent / Decimal::ONE_HUNDRED;
    let fee_multiplier = Decimal::ONE - fee_fraction;

    let mut required = (target_fiat + network_fee_fiat) / (rate.customer * fee_multiplier);

    // Below the floor the fee stops scaling with the amount, so the
    // inversion is a different (simpler) equation.
    let implied_fee = required * fee_fraction;
    if implied_fee < fees.minimum_fee {
        required = (target_fiat + network_fee_fiat + fees.minimum_fee * rate.customer)
            / rate.customer;
    }

    let required = required.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let forward = convert_forward(required, currency, snapshot, fees)?;
    Some(ConversionResult {
        required_amount: Some(required),
        target_fiat: Some(target_fiat),
        ..forward
    })
}

/// Comparison conversion under the legacy fee schedule. The legacy rate
/// hides its spread inside the quoted rate itself.
pub fn convert_legacy(
    amount: Decimal,
    currency: Currency,
    snapshot: &RateSnapshot,
    fees: &LegacyFeeSchedule,
) -> Option<LegacyResult> {
    let rate = snapshot.rate(currency)?;
    if amount <= Decimal::ZERO {
        return None;
    }

    let spread_fraction = fees.fx_spread_percent / Decimal::ONE_HUNDRED;
    let legacy_rate = rate.interbank * (Decimal::ONE - spread_fraction);

    let gross_fiat = amount * legacy_rate;
    let fee_fraction = fees.transaction_fee_percent / Decimal::ONE_HUNDRED;
    let transaction_fee_fiat = amount * fee_fraction * legacy_rate;
    let network_fee_fiat = fees.network_fee_usd * legacy_rate;
    let net_fiat = gross_fiat - transaction_fee_fiat - network_fee_fiat;

    Some(LegacyResult {
        net_fiat,
        total_fees_fiat: transaction_fee_fiat + network_fee_fiat,
        effective_rate: net_fiat / amount,
        legacy_rate,
        transaction_fee_fiat,
        network_fee_fiat,
    })
}

/// Compare a Ripe conversion against the legacy baseline.
pub fn compute_savings(primary: &ConversionResult, legacy: &LegacyResult) -> SavingsResult {
    let amount = primary.net_fiat - legacy.net_fiat;
    let percent = if legacy.net_fiat > Decimal::ZERO {
        (amount / legacy.net_fiat * Decimal::ONE_HUNDRED).abs()
    } else {
        Decimal::ZERO
    };

    SavingsResult {
        amount,
        percent,
        ripe_better: amount > Decimal::ZERO,
    }
}
