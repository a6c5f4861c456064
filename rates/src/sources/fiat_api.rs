//! Generic fiat-exchange adapters.
//!
//! ExchangeRate-API, Open ER API, and Frankfurter all quote USD against
//! the payout currencies with the same basic `{"rates": {code: rate}}`
//! shape, so one adapter covers all three.
//! They know nothing about stablecoins; the orchestrator derives a
//! uniform stablecoin map from their fiat rates.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use ripefx_common::Currency;

use crate::error::FetchError;
use crate::source::{require_rate, FetchedRates, RateSource, SourceId};
use crate::sources::get_json;

const EXCHANGE_RATE_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
const OPEN_ER_API_URL: &str = "https://open.er-api.com/v6/latest/USD";
const FRANKFURTER_URL: &str = "https://api.frankfurter.app/latest?from=USD&to=PHP,THB,IDR,MYR";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FiatRatesBody {
    rates: Option<HashMap<String, f64>>,
}

/// Adapter for a provider that quotes USD against a set of fiat
/// currencies.
pub struct FiatRatesSource {
    id: SourceId,
    url: &'static str,
    client: reqwest::Client,
}

impl FiatRatesSource {
    pub fn exchange_rate_api(client: reqwest::Client) -> Self {
        Self {
            id: SourceId::ExchangeRateApi,
            url: EXCHANGE_RATE_API_URL,
            client,
        }
    }

    pub fn open_er_api(client: reqwest::Client) -> Self {
        Self {
            id: SourceId::OpenErApi,
            url: OPEN_ER_API_URL,
            client,
        }
    }

    pub fn frankfurter(client: reqwest::Client) -> Self {
        Self {
            id: SourceId::Frankfurter,
            url: FRANKFURTER_URL,
            client,
        }
    }
}

#[async_trait]
impl RateSource for FiatRatesSource {
    fn id(&self) -> SourceId {
        self.id
    }

    async fn fetch(&self) -> Result<FetchedRates, FetchError> {
        let body: FiatRatesBody = get_json(&self.client, self.url).await?;
        debug!(source = %self.id, "fiat rates response decoded");
        parse_body(&body)
    }
}

pub(crate) fn parse_body(body: &FiatRatesBody) -> Result<FetchedRates, FetchError> {
    let rates = body
        .rates
        .as_ref()
        .ok_or_else(|| FetchError::InvalidData("response has no rates object".into()))?;

    let mut fiat = HashMap::new();
    for currency in Currency::ALL {
        let raw = rates.get(currency.code()).copied();
        fiat.insert(currency, require_rate(currency, raw)?);
    }

    Ok(FetchedRates::fiat_only(fiat))
}
