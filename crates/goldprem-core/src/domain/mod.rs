//! Domain types for the premium series.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MarketDate`] | ISO `YYYY-MM-DD` calendar date, the series key |
//! | [`SparseSeries`] | Date-keyed scalar series used as reconciliation input |
//! | [`PremiumRecord`] | One reconciled day (frozen serialized field names) |
//! | [`PremiumHistory`] | Sorted-unique record sequence plus freshness marker |
//! | [`RetentionPolicy`] | Optional rolling-window trim applied after upserts |
//!
//! `PremiumRecord`'s derived fields are recomputed at construction; the
//! invariant that stored records satisfy the derivation formula holds because
//! there is no other way to build one.

mod date;
mod history;
mod record;
mod series;

pub use date::MarketDate;
pub use history::{PremiumHistory, RetentionPolicy};
pub use record::PremiumRecord;
pub use series::SparseSeries;
