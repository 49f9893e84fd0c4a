use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceFuture, SourceId,
};
use crate::domain::{MarketDate, SparseSeries};
use crate::http_client::{HttpClient, HttpRequest};

const DEFAULT_URL: &str = "https://prices.lbma.org.uk/json/gold_pm.json";

/// Historical international gold prices from the LBMA PM fix (USD/oz).
/// The feed is a single full-history document; `latest` answers with the
/// newest fix in it.
pub struct LbmaSource {
    http_client: Arc<dyn HttpClient>,
    url: String,
    timeout_ms: u64,
}

impl LbmaSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_url(http_client, DEFAULT_URL)
    }

    pub fn with_url(http_client: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
            timeout_ms: 60_000,
        }
    }

    async fn fetch_series(&self, range: DateRange) -> Result<SparseSeries, SourceError> {
        let request = HttpRequest::get(self.url.clone()).with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("lbma transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "lbma returned status {}",
                response.status
            )));
        }

        let rows: Vec<LbmaRow> = serde_json::from_str(&response.body)
            .map_err(|error| SourceError::invalid_response(format!("lbma payload: {error}")))?;

        // Rows with an unparsable date or a missing/zero fix are discarded
        // individually; the rest of the feed still loads.
        let mut series = SparseSeries::new();
        for row in rows {
            let Ok(date) = MarketDate::parse(&row.date) else {
                continue;
            };
            if !range.contains(date) {
                continue;
            }
            let Some(price) = row.values.first().copied().flatten() else {
                continue;
            };
            if price > 0.0 {
                series.insert(date, price);
            }
        }

        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct LbmaRow {
    #[serde(rename = "d", default)]
    date: String,
    /// PM fix first, other fixes after; entries may be null.
    #[serde(rename = "v", default)]
    values: Vec<Option<f64>>,
}

impl PriceSource for LbmaSource {
    fn id(&self) -> SourceId {
        SourceId::Lbma
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::only(Endpoint::InternationalPrice)
    }

    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64> {
        Box::pin(async move {
            if endpoint != Endpoint::InternationalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            let series = self
                .fetch_series(DateRange::up_to(MarketDate::today_utc()))
                .await?;
            series
                .last_date()
                .and_then(|date| series.get(date))
                .ok_or_else(|| SourceError::invalid_response("lbma feed has no usable rows"))
        })
    }

    fn series(&self, endpoint: Endpoint, range: DateRange) -> SourceFuture<'_, SparseSeries> {
        Box::pin(async move {
            if endpoint != Endpoint::InternationalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.fetch_series(range).await
        })
    }
}
