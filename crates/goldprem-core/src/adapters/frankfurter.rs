use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceFuture, SourceId,
};
use crate::domain::{MarketDate, SparseSeries};
use crate::http_client::{HttpClient, HttpRequest};

const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Frankfurter caps range queries well above a year, but chunking keeps each
/// response small and mirrors how the history was originally assembled.
const RANGE_CHUNK_DAYS: i64 = 365;

/// USD→KRW exchange rates from frankfurter.app. Serves both the current rate
/// and historical ranges.
pub struct FrankfurterSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    base_currency: String,
    quote_currency: String,
    timeout_ms: u64,
}

impl FrankfurterSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http_client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            base_currency: String::from("USD"),
            quote_currency: String::from("KRW"),
            timeout_ms: 60_000,
        }
    }

    async fn get_json(&self, url: String) -> Result<String, SourceError> {
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("frankfurter transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "frankfurter returned status {}",
                response.status
            )));
        }

        Ok(response.body)
    }

    async fn fetch_latest(&self) -> Result<f64, SourceError> {
        let url = format!(
            "{}/latest?from={}&to={}",
            self.base_url, self.base_currency, self.quote_currency
        );
        let body = self.get_json(url).await?;

        let parsed: LatestRates = serde_json::from_str(&body).map_err(|error| {
            SourceError::invalid_response(format!("frankfurter payload: {error}"))
        })?;

        parsed
            .rates
            .get(&self.quote_currency)
            .copied()
            .filter(|rate| *rate > 0.0)
            .ok_or_else(|| {
                SourceError::invalid_response(format!(
                    "frankfurter response has no {} rate",
                    self.quote_currency
                ))
            })
    }

    /// Fetch the range in chunks of at most a year, folding every chunk into
    /// one sparse series. Malformed date keys are discarded row-wise.
    async fn fetch_range(&self, range: DateRange) -> Result<SparseSeries, SourceError> {
        let mut series = SparseSeries::new();
        let mut chunk_start = range.start;

        while chunk_start <= range.end {
            let chunk_end = chunk_start.days_later(RANGE_CHUNK_DAYS).min(range.end);
            let url = format!(
                "{}/{}..{}?from={}&to={}",
                self.base_url, chunk_start, chunk_end, self.base_currency, self.quote_currency
            );
            let body = self.get_json(url).await?;

            let parsed: RangeRates = serde_json::from_str(&body).map_err(|error| {
                SourceError::invalid_response(format!("frankfurter range payload: {error}"))
            })?;

            for (raw_date, rates) in parsed.rates {
                let Ok(date) = MarketDate::parse(&raw_date) else {
                    continue;
                };
                let Some(rate) = rates.get(&self.quote_currency).copied() else {
                    continue;
                };
                if rate > 0.0 && range.contains(date) {
                    series.insert(date, rate);
                }
            }

            chunk_start = chunk_end.days_later(1);
        }

        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    rates: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct RangeRates {
    #[serde(default)]
    rates: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PriceSource for FrankfurterSource {
    fn id(&self) -> SourceId {
        SourceId::Frankfurter
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::only(Endpoint::ExchangeRate)
    }

    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64> {
        Box::pin(async move {
            if endpoint != Endpoint::ExchangeRate {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.fetch_latest().await
        })
    }

    fn series(&self, endpoint: Endpoint, range: DateRange) -> SourceFuture<'_, SparseSeries> {
        Box::pin(async move {
            if endpoint != Endpoint::ExchangeRate {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.fetch_range(range).await
        })
    }
}
