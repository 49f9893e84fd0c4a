//! Backfill reconciliation of the three sparse input series.

use crate::domain::{PremiumRecord, SparseSeries};
use crate::resolver::{fill_forward, resolve, DEFAULT_LOOKBACK_DAYS};

/// Outcome of a backfill pass: the surviving records plus how many anchor
/// dates were skipped because a component could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillReport {
    pub records: Vec<PremiumRecord>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Bounded look-back applied to the international and FX series.
    pub lookback_days: u32,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Merge the three independently-sourced series into one reconciled sequence.
///
/// The local-price series is the anchor: exactly its dates are considered.
/// Exchange rates get an unbounded fill-forward prepass over the anchor
/// dates, then both non-anchor components resolve through the bounded
/// look-back. A date survives only when every component resolves and the
/// derivation is defined; anything else is a counted skip, never a partial or
/// zero-filled record. Wholly empty international or FX input therefore
/// yields an empty result, not an error.
pub fn reconcile(
    local: &SparseSeries,
    international: &SparseSeries,
    exchange: &SparseSeries,
    options: ReconcileOptions,
) -> BackfillReport {
    let exchange_filled = fill_forward(exchange, local.dates());

    let mut records = Vec::with_capacity(local.len());
    let mut skipped = 0usize;

    for (date, korean_price) in local.iter() {
        let components = resolve(international, date, options.lookback_days)
            .zip(resolve(&exchange_filled, date, options.lookback_days));

        let record = components.and_then(|(international_price, exchange_rate)| {
            PremiumRecord::derive(date, korean_price, international_price, exchange_rate)
        });

        match record {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    records.sort_by_key(|record| record.date);
    BackfillReport { records, skipped }
}
