//! The canonical exchange-rate snapshot.
//!
//! A snapshot holds, for every supported currency, the interbank
//! (mid-market) rate and Ripe's customer rate, plus per-stablecoin fiat
//! rates. A snapshot is always replaced as a whole; partial-currency
//! updates would let two currencies reflect different provider calls.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, Stablecoin};

/// Interbank and customer rates for a single currency, quoted as
/// stablecoin-unit → currency-unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Mid-market rate with no markup.
    pub interbank: Decimal,
    /// Rate applied to customer funds. Invariant: `customer <= interbank`.
    pub customer: Decimal,
}

impl CurrencyRate {
    /// Create a rate pair. Debug-asserts the spread is non-negative.
    pub fn new(interbank: Decimal, customer: Decimal) -> Self {
        debug_assert!(customer <= interbank, "customer rate above interbank");
        Self {
            interbank,
            customer,
        }
    }

    /// FX spread in rate units.
    pub fn spread(&self) -> Decimal {
        self.interbank - self.customer
    }
}

/// Per-stablecoin fiat rates, with a USD reference rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StablecoinRates {
    /// Currency → rate, for every supported currency.
    pub fiat: HashMap<Currency, Decimal>,
    /// Reference rate against USD (1.0 for a fully pegged coin).
    pub usd: Decimal,
}

impl StablecoinRates {
    /// Build a rate map that quotes every currency at the given rates,
    /// pegged 1:1 to USD.
    pub fn pegged(fiat: HashMap<Currency, Decimal>) -> Self {
        Self {
            fiat,
            usd: Decimal::ONE,
        }
    }
}

/// The current canonical rate snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Interbank/customer rates per currency.
    pub rates: HashMap<Currency, CurrencyRate>,
    /// Fiat rates per stablecoin.
    pub stablecoins: HashMap<Stablecoin, StablecoinRates>,
}

impl RateSnapshot {
    /// Rate pair for a currency. Every snapshot covers the full supported
    /// set, so this only misses on a hand-built partial snapshot.
    pub fn rate(&self, currency: Currency) -> Option<&CurrencyRate> {
        self.rates.get(&currency)
    }

    /// Rate for a specific stablecoin against a currency, falling back to
    /// the customer rate when no coin-specific quote is held.
    pub fn stablecoin_rate(&self, coin: Stablecoin, currency: Currency) -> Option<Decimal> {
        if let Some(coin_rates) = self.stablecoins.get(&coin) {
            if let Some(rate) = coin_rates.fiat.get(&currency) {
                return Some(*rate);
            }
        }
        self.rate(currency).map(|r| r.customer)
    }
}

impl Default for RateSnapshot {
    /// Seed rates used until the first successful fetch. Conversions stay
    /// answerable from process start; the store's staleness flag tells the
    /// caller how much to trust them.
    fn default() -> Self {
        let rates = HashMap::from([
            (
                Currency::Php,
                CurrencyRate::new(Decimal::new(590, 1), Decimal::new(585, 1)),
            ),
            (
                Currency::Thb,
                CurrencyRate::new(Decimal::new(355, 1), Decimal::new(352, 1)),
            ),
            (
                Currency::Idr,
                CurrencyRate::new(Decimal::from(15800), Decimal::from(15650)),
            ),
            (
                Currency::Myr,
                CurrencyRate::new(Decimal::new(465, 2), Decimal::new(460, 2)),
            ),
        ]);

        let seed_fiat = HashMap::from([
            (Currency::Php, Decimal::new(590, 1)),
            (Currency::Thb, Decimal::new(355, 1)),
            (Currency::Idr, Decimal::from(16700)),
            (Currency::Myr, Decimal::new(465, 2)),
        ]);
        let stablecoins = Stablecoin::ALL
            .into_iter()
            .map(|coin| (coin, StablecoinRates::pegged(seed_fiat.clone())))
            .collect();

        Self {
            rates,
            stablecoins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_covers_all_currencies() {
        let snapshot = RateSnapshot::default();
        for currency in Currency::ALL {
            let rate = snapshot.rate(currency).unwrap();
            assert!(rate.customer <= rate.interbank, "{currency} spread negative");
            assert!(rate.customer > Decimal::ZERO);
        }
        for coin in Stablecoin::ALL {
            for currency in Currency::ALL {
                assert!(snapshot.stablecoin_rate(coin, currency).is_some());
            }
        }
    }

    #[test]
    fn test_default_seed_values() {
        let snapshot = RateSnapshot::default();
        let php = snapshot.rate(Currency::Php).unwrap();
        assert_eq!(php.interbank, dec!(59.0));
        assert_eq!(php.customer, dec!(58.5));
        assert_eq!(snapshot.rate(Currency::Idr).unwrap().interbank, dec!(15800));
    }

    #[test]
    fn test_stablecoin_rate_falls_back_to_customer() {
        let mut snapshot = RateSnapshot::default();
        snapshot.stablecoins.remove(&Stablecoin::Usdg);

        let rate = snapshot.stablecoin_rate(Stablecoin::Usdg, Currency::Php);
        assert_eq!(rate, Some(dec!(58.5)));
    }

    #[test]
    fn test_spread() {
        let rate = CurrencyRate::new(dec!(59.0), dec!(58.5));
        assert_eq!(rate.spread(), dec!(0.5));
    }
}
