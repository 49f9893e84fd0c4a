//! # goldprem-core
//!
//! Domain model and reconciliation engine for the goldprem tracker: a daily
//! series of the Korean gold price, the international gold price, and the
//! USD→KRW rate, plus the derived "kimchi premium" relating them.
//!
//! ## Overview
//!
//! Three independently-sourced, date-keyed series, each with its own gaps
//! and calendar, are merged into one consistent, gap-filled, append-only
//! history. Two control paths share the model:
//!
//! - **Backfill**: [`reconcile`] rebuilds the full history from three sparse
//!   series, anchored on the local-price dates.
//! - **Incremental**: [`PremiumHistory::upsert`] merges one freshly observed
//!   day into a persisted history, idempotently.
//!
//! Both lean on the same leaves: the gap-filling [`resolver`] (bounded
//! look-back, plus unbounded fill-forward for FX) and the [`derive`] formula
//! turning the three aligned values into the converted price and premium.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Concrete source adapters (gold-api, Frankfurter, KRX, LBMA, local CSV) |
//! | [`data_source`] | Adapter contract and source errors |
//! | [`derive`] | Premium derivation formula |
//! | [`domain`] | Dates, series, records, history |
//! | [`error`] | Core error types |
//! | [`estimate`] | Opt-in markup estimation for a missing local price |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`reconcile`] | Backfill reconciler |
//! | [`resolver`] | Gap-filling lookup |
//!
//! ## Error handling
//!
//! A value the resolver cannot find, or a derivation that is undefined, skips
//! the affected date and nothing else; the engine never substitutes a zero
//! for a missing reading. Upstream failures surface as [`SourceError`] from
//! the adapters and abort the run before anything is written.

pub mod adapters;
pub mod data_source;
pub mod derive;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod http_client;
pub mod reconcile;
pub mod resolver;

// Adapter implementations
pub use adapters::{FrankfurterSource, GoldApiSource, KrxConfig, KrxOpenApiSource, LbmaSource, LocalCsvSource};

// Adapter contract
pub use data_source::{
    CapabilitySet, DateRange, Endpoint, PriceSource, SourceError, SourceErrorKind, SourceFuture,
    SourceId,
};

// Derivation
pub use derive::{derive_premium, round2, DerivedPremium, GRAMS_PER_TROY_OUNCE};

// Domain model
pub use domain::{MarketDate, PremiumHistory, PremiumRecord, RetentionPolicy, SparseSeries};

// Error types
pub use error::ValidationError;

// Estimation
pub use estimate::{MarkupEstimate, DEFAULT_MARKUP};

// HTTP transport
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};

// Reconciliation
pub use reconcile::{reconcile, BackfillReport, ReconcileOptions};

// Gap filling
pub use resolver::{fill_forward, resolve, DEFAULT_LOOKBACK_DAYS};
