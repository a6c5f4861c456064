//! CoinGecko adapter: the stablecoin-price provider.
//!
//! Quotes USDC and USDT directly against the payout currencies, so this
//! source yields both the canonical fiat map and coin-specific rates.
//! USDG is not listed on CoinGecko and proxies the USDC quote.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use ripefx_common::{Currency, Stablecoin, StablecoinRates};

use crate::error::FetchError;
use crate::source::{require_rate, FetchedRates, RateSource, SourceId};
use crate::sources::get_json;

const URL: &str = "https://api.coingecko.com/api/v3/simple/price\
                   ?ids=usd-coin,tether&vs_currencies=php,thb,idr,myr,usd";

/// One coin's quotes in the `simple/price` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CoinQuote {
    php: Option<f64>,
    thb: Option<f64>,
    idr: Option<f64>,
    myr: Option<f64>,
    usd: Option<f64>,
}

pub(crate) type CoinGeckoBody = HashMap<String, CoinQuote>;

/// Adapter for CoinGecko's simple price endpoint.
pub struct CoinGeckoSource {
    client: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RateSource for CoinGeckoSource {
    fn id(&self) -> SourceId {
        SourceId::CoinGecko
    }

    async fn fetch(&self) -> Result<FetchedRates, FetchError> {
        let body: CoinGeckoBody = get_json(&self.client, URL).await?;
        debug!(coins = body.len(), "coingecko response decoded");
        parse_body(&body)
    }
}

fn parse_quote(quote: &CoinQuote) -> Result<StablecoinRates, FetchError> {
    let fiat = HashMap::from([
        (Currency::Php, require_rate(Currency::Php, quote.php)?),
        (Currency::Thb, require_rate(Currency::Thb, quote.thb)?),
        (Currency::Idr, require_rate(Currency::Idr, quote.idr)?),
        (Currency::Myr, require_rate(Currency::Myr, quote.myr)?),
    ]);
    // USD reference defaults to 1.0 when the field is absent.
    let usd = quote
        .usd
        .and_then(Decimal::from_f64)
        .filter(|v| *v > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);
    Ok(StablecoinRates { fiat, usd })
}

pub(crate) fn parse_body(body: &CoinGeckoBody) -> Result<FetchedRates, FetchError> {
    let usdc = body.get("usd-coin").map(parse_quote).transpose()?;
    let usdt = body.get("tether").map(parse_quote).transpose()?;

    // The canonical fiat map comes from USDC, falling back to USDT.
    let primary = usdc
        .as_ref()
        .or(usdt.as_ref())
        .ok_or_else(|| FetchError::InvalidData("no stablecoin quotes in response".into()))?;
    let fiat = primary.fiat.clone();

    let mut stablecoins = HashMap::new();
    if let Some(usdc) = usdc {
        stablecoins.insert(Stablecoin::Usdg, usdc.clone());
        stablecoins.insert(Stablecoin::Usdc, usdc);
    }
    if let Some(usdt) = usdt {
        stablecoins.insert(Stablecoin::Usdt, usdt);
    }

    Ok(FetchedRates {
        fiat,
        stablecoins: Some(stablecoins),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn decode(json: &str) -> CoinGeckoBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_full_response() {
        let body = decode(
            r#"{
                "usd-coin": {"php": 58.9, "thb": 35.4, "idr": 15750.0, "myr": 4.63, "usd": 0.9998},
                "tether": {"php": 58.85, "thb": 35.38, "idr": 15740.0, "myr": 4.62, "usd": 1.0001}
            }"#,
        );

        let fetched = parse_body(&body).unwrap();
        assert_eq!(fetched.fiat[&Currency::Php], dec!(58.9));
        assert_eq!(fetched.fiat[&Currency::Idr], dec!(15750.0));

        let coins = fetched.stablecoins.unwrap();
        assert_eq!(coins[&Stablecoin::Usdt].fiat[&Currency::Php], dec!(58.85));
        // USDG proxies USDC.
        assert_eq!(coins[&Stablecoin::Usdg], coins[&Stablecoin::Usdc]);
        assert_eq!(coins[&Stablecoin::Usdc].usd, dec!(0.9998));
    }

    #[test]
    fn test_usd_reference_defaults_to_one() {
        let body = decode(
            r#"{"usd-coin": {"php": 58.9, "thb": 35.4, "idr": 15750.0, "myr": 4.63}}"#,
        );

        let fetched = parse_body(&body).unwrap();
        let coins = fetched.stablecoins.unwrap();
        assert_eq!(coins[&Stablecoin::Usdc].usd, Decimal::ONE);
        assert!(!coins.contains_key(&Stablecoin::Usdt));
    }

    #[test]
    fn test_fiat_falls_back_to_tether() {
        let body = decode(
            r#"{"tether": {"php": 58.85, "thb": 35.38, "idr": 15740.0, "myr": 4.62, "usd": 1.0}}"#,
        );

        let fetched = parse_body(&body).unwrap();
        assert_eq!(fetched.fiat[&Currency::Php], dec!(58.85));
        let coins = fetched.stablecoins.unwrap();
        assert!(!coins.contains_key(&Stablecoin::Usdc));
        assert!(!coins.contains_key(&Stablecoin::Usdg));
    }

    #[test]
    fn test_missing_required_currency_fails_whole_attempt() {
        let body = decode(r#"{"usd-coin": {"php": 58.9, "thb": 35.4, "idr": 15750.0}}"#);
        assert!(matches!(
            parse_body(&body),
            Err(FetchError::InvalidData(_))
        ));
    }

    #[test]
    fn test_empty_response_is_invalid() {
        let body = decode("{}");
        assert!(matches!(
            parse_body(&body),
            Err(FetchError::InvalidData(_))
        ));
    }

    #[test]
    fn test_non_positive_rate_is_invalid() {
        let body = decode(
            r#"{"usd-coin": {"php": 0.0, "thb": 35.4, "idr": 15750.0, "myr": 4.63}}"#,
        );
        assert!(matches!(
            parse_body(&body),
            Err(FetchError::InvalidData(_))
        ));
    }
}
