//! Concrete source adapters.
//!
//! | Adapter | Endpoint | Shape |
//! |---------|----------|-------|
//! | [`GoldApiSource`] | international price | latest only |
//! | [`FrankfurterSource`] | exchange rate | latest + ranged series |
//! | [`KrxOpenApiSource`] | local price | latest only |
//! | [`LbmaSource`] | international price | series; latest = newest fix |
//! | [`LocalCsvSource`] | local price | series from on-disk exports |

mod frankfurter;
mod goldapi;
mod krx;
mod lbma;
mod local_csv;

pub use frankfurter::FrankfurterSource;
pub use goldapi::GoldApiSource;
pub use krx::{KrxConfig, KrxOpenApiSource};
pub use lbma::LbmaSource;
pub use local_csv::LocalCsvSource;
