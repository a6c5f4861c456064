//! Provider adapters, one per external rate API.

mod coingecko;
mod fiat_api;

pub use coingecko::CoinGeckoSource;
pub use fiat_api::FiatRatesSource;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::source::RateSource;

/// The production adapter list in priority order: the stablecoin-price
/// provider first (it also yields coin-specific rates), then the generic
/// fiat providers. The order encodes a trust ranking; the orchestrator
/// never reorders it.
pub fn default_sources(client: &reqwest::Client) -> Vec<Arc<dyn RateSource>> {
    vec![
        Arc::new(CoinGeckoSource::new(client.clone())),
        Arc::new(FiatRatesSource::exchange_rate_api(client.clone())),
        Arc::new(FiatRatesSource::open_er_api(client.clone())),
        Arc::new(FiatRatesSource::frankfurter(client.clone())),
    ]
}

/// One unauthenticated GET, decoded as JSON.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(transport_error)?;
    let response = response
        .error_for_status()
        .map_err(|e| FetchError::Network(e.to_string()))?;
    response
        .json()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

fn transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(error.to_string())
    }
}
