use serde::{Deserialize, Serialize};

use crate::{MarketDate, PremiumRecord};

/// Retention applied after an upsert, measured against a caller-supplied
/// "now". Off by default: the original pipeline trimmed to 90 days for a
/// while and later stopped, so the window stays an explicit caller choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    #[default]
    KeepAll,
    Days(u32),
}

impl RetentionPolicy {
    pub const fn days(days: u32) -> Self {
        Self::Days(days)
    }

    /// Oldest date kept under this policy, or `None` for keep-all.
    pub fn cutoff(self, now: MarketDate) -> Option<MarketDate> {
        match self {
            Self::KeepAll => None,
            Self::Days(days) => Some(now.days_earlier(i64::from(days))),
        }
    }
}

/// The reconciled series plus its freshness marker.
///
/// Invariant: `data` is strictly ascending and unique by date. Mutation goes
/// through [`upsert`](Self::upsert) (single record) or
/// [`from_records`](Self::from_records) (bulk rebuild), both of which
/// re-establish the invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumHistory {
    /// Date of the newest data point, `null` while empty.
    #[serde(default)]
    pub last_updated: Option<MarketDate>,
    pub data: Vec<PremiumRecord>,
}

impl PremiumHistory {
    pub fn empty() -> Self {
        Self {
            last_updated: None,
            data: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn latest(&self) -> Option<&PremiumRecord> {
        self.data.last()
    }

    pub fn record_for(&self, date: MarketDate) -> Option<&PremiumRecord> {
        self.data.iter().find(|record| record.date == date)
    }

    /// Insert-or-replace by date, then re-sort.
    ///
    /// Replacement is last-write-wins: a later observation for the same date
    /// supersedes the stored one (same-day data is often revised intraday).
    /// The re-sort keeps the invariant even when callers insert out of order.
    pub fn upsert(&mut self, record: PremiumRecord) {
        let date = record.date;
        if let Some(existing) = self.data.iter_mut().find(|stored| stored.date == date) {
            *existing = record;
        } else {
            self.data.push(record);
        }
        self.data.sort_by_key(|stored| stored.date);
        self.last_updated = Some(date);
    }

    /// Drop records older than the policy cutoff. No-op for keep-all.
    pub fn apply_retention(&mut self, policy: RetentionPolicy, now: MarketDate) {
        if let Some(cutoff) = policy.cutoff(now) {
            self.data.retain(|record| record.date >= cutoff);
        }
    }

    /// Fold a batch into a history, deduplicating by date and keeping the
    /// last record seen in source order. `lastUpdated` lands on the newest
    /// surviving date.
    pub fn from_records(records: impl IntoIterator<Item = PremiumRecord>) -> Self {
        let mut history = Self::empty();
        for record in records {
            history.upsert(record);
        }
        history.last_updated = history.data.last().map(|record| record.date);
        history
    }

    pub fn is_sorted_unique(&self) -> bool {
        self.data.windows(2).all(|pair| pair[0].date < pair[1].date)
    }
}
