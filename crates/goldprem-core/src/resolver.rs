//! Gap-filling lookup over sparse series.

use crate::domain::{MarketDate, SparseSeries};

/// Default bounded look-back for gap filling, in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 7;

/// Best available value for `date`: an exact match wins, otherwise the
/// nearest prior value within `lookback_days` (scanned nearest-first).
///
/// `None` means the date must be skipped by the caller. It is never a zero
/// substitute.
pub fn resolve(series: &SparseSeries, date: MarketDate, lookback_days: u32) -> Option<f64> {
    if let Some(value) = series.get(date) {
        return Some(value);
    }

    (1..=i64::from(lookback_days))
        .map(|offset| date.days_earlier(offset))
        .find_map(|earlier| series.get(earlier))
}

/// Carry the last known value forward to every requested date lacking one,
/// with no look-back bound.
///
/// Returns the original entries plus a carried entry for each date in `dates`
/// that had none. Used for exchange rates across a backfill range, where the
/// series is denser and more continuous than the price series.
pub fn fill_forward(
    series: &SparseSeries,
    dates: impl IntoIterator<Item = MarketDate>,
) -> SparseSeries {
    let mut filled = series.clone();
    for date in dates {
        if filled.get(date).is_none() {
            if let Some((_, value)) = series.latest_at_or_before(date) {
                filled.insert(date, value);
            }
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> MarketDate {
        MarketDate::parse(input).expect("test date")
    }

    #[test]
    fn exact_match_beats_fallback() {
        let series: SparseSeries = [(date("2024-01-04"), 90.0), (date("2024-01-05"), 100.0)]
            .into_iter()
            .collect();
        assert_eq!(resolve(&series, date("2024-01-05"), 7), Some(100.0));
    }

    #[test]
    fn falls_back_within_window() {
        let series: SparseSeries = [(date("2024-01-01"), 100.0)].into_iter().collect();
        assert_eq!(resolve(&series, date("2024-01-05"), 7), Some(100.0));
    }

    #[test]
    fn reports_unavailable_past_window() {
        let series: SparseSeries = [(date("2024-01-01"), 100.0)].into_iter().collect();
        assert_eq!(resolve(&series, date("2024-01-09"), 7), None);
    }

    #[test]
    fn nearest_prior_value_wins() {
        let series: SparseSeries = [(date("2024-01-01"), 100.0), (date("2024-01-03"), 103.0)]
            .into_iter()
            .collect();
        assert_eq!(resolve(&series, date("2024-01-05"), 7), Some(103.0));
    }

    #[test]
    fn fill_forward_has_no_lookback_bound() {
        let series: SparseSeries = [(date("2024-01-01"), 1_300.0)].into_iter().collect();
        let universe = [date("2024-02-15"), date("2024-03-20")];

        let filled = fill_forward(&series, universe);
        assert_eq!(filled.get(date("2024-02-15")), Some(1_300.0));
        assert_eq!(filled.get(date("2024-03-20")), Some(1_300.0));
    }

    #[test]
    fn fill_forward_never_fills_backwards() {
        let series: SparseSeries = [(date("2024-01-10"), 1_300.0)].into_iter().collect();
        let filled = fill_forward(&series, [date("2024-01-05")]);
        assert_eq!(filled.get(date("2024-01-05")), None);
    }
}
