//! Source adapter contract and request/response types.
//!
//! One interface covers every upstream the tracker reads; concrete adapters
//! advertise which endpoints they serve via [`CapabilitySet`] and are swapped
//! behind the [`PriceSource`] trait. This replaces the older pattern of
//! near-duplicate fetch scripts per provider.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::domain::{MarketDate, SparseSeries};

/// Boxed future returned by adapter calls.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// Data endpoint addressed through the adapter contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Local gold closing price, ₩/g.
    LocalPrice,
    /// International gold price, USD/oz.
    InternationalPrice,
    /// USD→KRW exchange rate.
    ExchangeRate,
}

impl Endpoint {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalPrice => "local_price",
            Self::InternationalPrice => "international_price",
            Self::ExchangeRate => "exchange_rate",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported endpoint matrix for a price source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub local_price: bool,
    pub international_price: bool,
    pub exchange_rate: bool,
}

impl CapabilitySet {
    pub const fn new(local_price: bool, international_price: bool, exchange_rate: bool) -> Self {
        Self {
            local_price,
            international_price,
            exchange_rate,
        }
    }

    pub const fn only(endpoint: Endpoint) -> Self {
        match endpoint {
            Endpoint::LocalPrice => Self::new(true, false, false),
            Endpoint::InternationalPrice => Self::new(false, true, false),
            Endpoint::ExchangeRate => Self::new(false, false, true),
        }
    }

    pub const fn supports(self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::LocalPrice => self.local_price,
            Endpoint::InternationalPrice => self.international_price,
            Endpoint::ExchangeRate => self.exchange_rate,
        }
    }
}

/// Identifier for a concrete source adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    GoldApi,
    Frankfurter,
    KrxOpenApi,
    Lbma,
    LocalCsv,
}

impl SourceId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoldApi => "gold_api",
            Self::Frankfurter => "frankfurter",
            Self::KrxOpenApi => "krx_open_api",
            Self::Lbma => "lbma",
            Self::LocalCsv => "local_csv",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar range for historical requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: MarketDate,
    pub end: MarketDate,
}

impl DateRange {
    pub fn new(start: MarketDate, end: MarketDate) -> Result<Self, SourceError> {
        if start > end {
            return Err(SourceError::invalid_request(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Open-started range ending at `end`; used when the source itself
    /// defines coverage (e.g. scanning local files).
    pub fn up_to(end: MarketDate) -> Self {
        Self {
            start: MarketDate::MIN,
            end,
        }
    }

    pub fn contains(self, date: MarketDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    UnsupportedEndpoint,
    Unavailable,
    InvalidResponse,
    InvalidRequest,
}

/// Structured source error.
///
/// "Unavailable" is always an error value here; an adapter never substitutes
/// a zero for a reading it could not obtain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unsupported_endpoint(id: SourceId, endpoint: Endpoint) -> Self {
        Self {
            kind: SourceErrorKind::UnsupportedEndpoint,
            message: format!("endpoint '{endpoint}' is not supported by source '{id}'"),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::UnsupportedEndpoint => "source.unsupported_endpoint",
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Source adapter contract.
///
/// Implementations receive their configuration (keys, base URLs, file paths)
/// through constructors; none of them reads the environment. They must be
/// `Send + Sync` so a single transport can be shared across adapters.
pub trait PriceSource: Send + Sync {
    /// Unique adapter identifier.
    fn id(&self) -> SourceId;

    /// Endpoints this source can serve.
    fn capabilities(&self) -> CapabilitySet;

    /// Most recent reading for the endpoint.
    ///
    /// # Errors
    ///
    /// [`SourceError`] when the endpoint is unsupported, the upstream is
    /// unreachable, or the payload does not contain a usable value.
    fn latest(&self, endpoint: Endpoint) -> SourceFuture<'_, f64>;

    /// Historical sparse series over the inclusive range.
    ///
    /// Individual malformed rows in the upstream payload are discarded and
    /// parsing continues; only a wholly unusable response is an error.
    fn series(&self, endpoint: Endpoint, range: DateRange) -> SourceFuture<'_, SparseSeries>;
}
