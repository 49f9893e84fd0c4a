use std::collections::BTreeMap;

use crate::MarketDate;

/// Date-keyed sparse scalar series.
///
/// Input-only shape: adapters produce it and the reconciler consumes it; it is
/// never persisted. Insertion is last-write-wins per date, which is how batch
/// sources are deduplicated before reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseSeries {
    values: BTreeMap<MarketDate, f64>,
}

impl SparseSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: MarketDate, value: f64) {
        self.values.insert(date, value);
    }

    pub fn get(&self, date: MarketDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// Most recent entry at or before `date`, regardless of distance.
    pub fn latest_at_or_before(&self, date: MarketDate) -> Option<(MarketDate, f64)> {
        self.values
            .range(..=date)
            .next_back()
            .map(|(found, value)| (*found, *value))
    }

    pub fn first_date(&self) -> Option<MarketDate> {
        self.values.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<MarketDate> {
        self.values.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = MarketDate> + '_ {
        self.values.keys().copied()
    }

    /// `(date, value)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (MarketDate, f64)> + '_ {
        self.values.iter().map(|(date, value)| (*date, *value))
    }
}

impl FromIterator<(MarketDate, f64)> for SparseSeries {
    fn from_iter<T: IntoIterator<Item = (MarketDate, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(MarketDate, f64)> for SparseSeries {
    fn extend<T: IntoIterator<Item = (MarketDate, f64)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}
