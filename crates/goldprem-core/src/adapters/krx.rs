use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceFuture, SourceId,
};
use crate::domain::SparseSeries;
use crate::http_client::{HttpClient, HttpRequest};

const DEFAULT_BASE_URL: &str =
    "https://apis.data.go.kr/1160100/service/GetGeneralProductInfoService";

/// Explicit adapter configuration. The service key arrives here from the
/// caller; the adapter itself never reads the environment.
#[derive(Debug, Clone)]
pub struct KrxConfig {
    pub service_key: String,
    pub base_url: String,
    pub rows: u32,
    pub timeout_ms: u64,
}

impl KrxConfig {
    pub fn new(service_key: impl Into<String>) -> Self {
        Self {
            service_key: service_key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            rows: 5,
            timeout_ms: 10_000,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Korean gold closing price from the data.go.kr open API.
///
/// The service quotes ₩/kg per listed product; the 1Kg instrument is
/// preferred and the price is restated as ₩/g.
pub struct KrxOpenApiSource {
    http_client: Arc<dyn HttpClient>,
    config: KrxConfig,
}

impl KrxOpenApiSource {
    pub fn new(http_client: Arc<dyn HttpClient>, config: KrxConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    async fn fetch_latest(&self) -> Result<f64, SourceError> {
        let url = format!(
            "{}/getGoldPriceInfo?serviceKey={}&numOfRows={}&resultType=json",
            self.config.base_url,
            urlencoding::encode(&self.config.service_key),
            self.config.rows
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            SourceError::unavailable(format!("krx transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "krx returned status {}",
                response.status
            )));
        }

        let parsed: KrxEnvelope = serde_json::from_str(&response.body)
            .map_err(|error| SourceError::invalid_response(format!("krx payload: {error}")))?;

        let items = parsed.response.body.items.item;
        if items.is_empty() {
            return Err(SourceError::invalid_response("krx response has no items"));
        }

        // Prefer the 1Kg instrument; otherwise the first item that parses.
        // Items that fail to parse are skipped row-wise.
        let per_kg = items
            .iter()
            .filter(|item| item.is_one_kg())
            .find_map(KrxItem::closing_price)
            .or_else(|| items.iter().find_map(KrxItem::closing_price));

        match per_kg {
            Some(price) if price > 0.0 => Ok(price / 1_000.0),
            _ => Err(SourceError::invalid_response(
                "krx response has no usable closing price",
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KrxEnvelope {
    response: KrxResponse,
}

#[derive(Debug, Deserialize)]
struct KrxResponse {
    body: KrxBody,
}

#[derive(Debug, Deserialize)]
struct KrxBody {
    #[serde(default)]
    items: KrxItems,
}

#[derive(Debug, Default, Deserialize)]
struct KrxItems {
    #[serde(default)]
    item: Vec<KrxItem>,
}

#[derive(Debug, Deserialize)]
struct KrxItem {
    /// Instrument name, e.g. "금 99.99_1Kg".
    #[serde(rename = "itmsNm", default)]
    name: String,
    /// Closing price in ₩/kg; the upstream serializes it as either a bare
    /// number or a numeric string.
    #[serde(rename = "clpr", default)]
    closing: serde_json::Value,
}

impl KrxItem {
    fn is_one_kg(&self) -> bool {
        self.name.contains("1Kg") || self.name.contains("1kg")
    }

    fn closing_price(&self) -> Option<f64> {
        match &self.closing {
            serde_json::Value::Number(number) => number.as_f64(),
            serde_json::Value::String(raw) => raw.replace(',', "").trim().parse().ok(),
            _ => None,
        }
    }
}

impl PriceSource for KrxOpenApiSource {
    fn id(&self) -> SourceId {
        SourceId::KrxOpenApi
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::only(Endpoint::LocalPrice)
    }

    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64> {
        Box::pin(async move {
            if endpoint != Endpoint::LocalPrice {
                return Err(SourceError::unsupported_endpoint(self.id(), endpoint));
            }
            self.fetch_latest().await
        })
    }

    fn series(&self, endpoint: Endpoint, _range: DateRange) -> SourceFuture<'_, SparseSeries> {
        // Historical local prices come from the CSV exports, not this API.
        Box::pin(async move { Err(SourceError::unsupported_endpoint(self.id(), endpoint)) })
    }
}
