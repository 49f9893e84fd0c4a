use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceFuture, SourceId,
};
use crate::domain::SparseSeries;
use crate::http_client::{HttpClient, HttpRequest};

const DEFAULT_BASE_URL: &str = "https://api.gold-api.com";

/// Spot XAU price from gold-api.com, USD per troy ounce. Latest-only.
pub struct GoldApiSource {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl GoldApiSource {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_base_url(http_client, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout_ms: 10_000,
        }
    }

    async fn fetch_latest(&self) -> Result<f64, SourceError> {
        let request = HttpRequest::get(format!("{}/price/XAU", self.base_url))
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("gold-api transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "gold-api returned status {}",
                response.status
            )));
        }

        let parsed: GoldApiPrice = serde_json::from_str(&response.body).map_err(|error| {
            SourceError::invalid_response(format!("gold-api payload: {error}"))
        })?;

        if parsed.price <= 0.0 {
            return Err(SourceError::invalid_response(
                "gold-api returned a non-positive price",
            ));
        }

        Ok(parsed.price)
    }
}

#[derive(Debug, Deserialize)]
struct GoldApiPrice {
    #[serde(default)]
    price: f64,
}

impl PriceSource for GoldApiSource {
    fn id(&self) -> SourceId {
        SourceId::GoldApi
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::only(Endpoint::InternationalPrice)
    }

    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64> {
        Box::pin(async move {
            if endpoint != Endpoint::InternationalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.fetch_latest().await
        })
    }

    fn series(&self, endpoint: Endpoint, _range: DateRange) -> SourceFuture<'_, SparseSeries> {
        // Spot-only API; historical backfill comes from LBMA.
        Box::pin(async move { Err(SourceError::unsupported_endpoint(self.id(), endpoint)) })
    }
}
