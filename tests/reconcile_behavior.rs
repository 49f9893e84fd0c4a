//! End-to-end behavior of the backfill reconciliation pass.

use goldprem_core::{
    derive_premium, fill_forward, reconcile, resolve, PremiumHistory, ReconcileOptions,
    SparseSeries, DEFAULT_LOOKBACK_DAYS, GRAMS_PER_TROY_OUNCE,
};
use goldprem_tests::{date, series};

#[test]
fn reconciled_output_is_sorted_and_unique_by_date() {
    let local = series(&[
        ("2024-02-01", 118_000.0),
        ("2024-01-15", 117_500.0),
        ("2024-01-02", 117_000.0),
    ]);
    let international = series(&[("2024-01-02", 2_600.0), ("2024-01-31", 2_650.0)]);
    let exchange = series(&[("2024-01-02", 1_400.0)]);

    let report = reconcile(&local, &international, &exchange, ReconcileOptions::default());
    let history = PremiumHistory::from_records(report.records);

    assert!(history.is_sorted_unique());
    assert_eq!(history.data[0].date, date("2024-01-02"));
    assert_eq!(history.last_updated, Some(date("2024-02-01")));
}

#[test]
fn anchors_before_first_exchange_observation_are_skipped() {
    // Ten anchor days; the FX feed only begins on the fourth. Fill-forward
    // cannot reach backwards, so the first three anchors must be dropped.
    let mut local = SparseSeries::new();
    for day in 1..=10 {
        local.insert(date(&format!("2024-01-{day:02}")), 118_000.0 + f64::from(day));
    }
    let mut international = SparseSeries::new();
    for day in 1..=10 {
        international.insert(date(&format!("2024-01-{day:02}")), 2_600.0);
    }
    let exchange = series(&[("2024-01-04", 1_400.0)]);

    let report = reconcile(&local, &international, &exchange, ReconcileOptions::default());

    assert_eq!(report.records.len(), 7);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.records[0].date, date("2024-01-04"));
}

#[test]
fn international_gap_fills_within_the_lookback_window_only() {
    let local = series(&[("2024-01-08", 118_000.0), ("2024-01-09", 118_200.0)]);
    // Jan 1 is seven days before Jan 8 (inside the window) but eight days
    // before Jan 9 (outside it).
    let international = series(&[("2024-01-01", 2_600.0)]);
    let exchange = series(&[("2024-01-01", 1_400.0)]);

    let report = reconcile(&local, &international, &exchange, ReconcileOptions::default());

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].date, date("2024-01-08"));
    assert_eq!(report.records[0].international_price, 2_600.0);
    assert_eq!(report.skipped, 1);
}

#[test]
fn exchange_rate_fills_forward_without_a_window() {
    // The only FX observation is months before the anchor. FX carries
    // forward indefinitely while the international price stays bounded.
    let local = series(&[("2024-06-03", 120_000.0)]);
    let international = series(&[("2024-06-01", 2_700.0)]);
    let exchange = series(&[("2024-01-02", 1_380.0)]);

    let report = reconcile(&local, &international, &exchange, ReconcileOptions::default());

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].exchange_rate, 1_380.0);
    assert_eq!(report.skipped, 0);
}

#[test]
fn resolution_never_uses_future_observations() {
    let observations = series(&[("2024-01-10", 2_650.0)]);
    assert_eq!(
        resolve(&observations, date("2024-01-09"), DEFAULT_LOOKBACK_DAYS),
        None
    );

    let filled = fill_forward(&observations, [date("2024-01-09")]);
    assert_eq!(filled.get(date("2024-01-09")), None);
}

#[test]
fn derived_fields_follow_the_conversion_formula() {
    let local = series(&[("2024-03-01", 120_000.0)]);
    let international = series(&[("2024-03-01", 2_600.0)]);
    let exchange = series(&[("2024-03-01", 1_400.0)]);

    let report = reconcile(&local, &international, &exchange, ReconcileOptions::default());
    let record = &report.records[0];

    let per_gram_krw = 2_600.0 / GRAMS_PER_TROY_OUNCE * 1_400.0;
    let expected_krw = (per_gram_krw * 100.0).round() / 100.0;
    assert_eq!(record.international_price_krw, expected_krw);
    assert_eq!(record.premium, 2.54);

    let derived = derive_premium(120_000.0, 2_600.0, 1_400.0).expect("defined");
    assert_eq!(derived.premium, record.premium);
}

#[test]
fn empty_inputs_yield_an_empty_report() {
    let report = reconcile(
        &SparseSeries::new(),
        &SparseSeries::new(),
        &SparseSeries::new(),
        ReconcileOptions::default(),
    );

    assert!(report.records.is_empty());
    assert_eq!(report.skipped, 0);
}
