//! Source adapters against canned upstream payloads.

use std::sync::Arc;

use goldprem_core::{
    DateRange, Endpoint, FrankfurterSource, GoldApiSource, KrxConfig, KrxOpenApiSource,
    LbmaSource, LocalCsvSource, PriceSource, SourceErrorKind,
};
use goldprem_tests::{date, CannedTransport, FailingTransport};

fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).expect("valid range")
}

#[tokio::test]
async fn gold_api_parses_the_spot_price() {
    let transport = CannedTransport::new().with_route(
        "/price/XAU",
        r#"{"name":"Gold","price":2613.4,"updatedAt":"2024-06-03T14:00:00Z"}"#,
    );
    let source = GoldApiSource::new(Arc::new(transport));

    let price = source
        .latest(Endpoint::InternationalPrice)
        .await
        .expect("latest price");
    assert_eq!(price, 2_613.4);
}

#[tokio::test]
async fn gold_api_rejects_a_non_positive_price() {
    let transport = CannedTransport::new().with_route("/price/XAU", r#"{"price":0}"#);
    let source = GoldApiSource::new(Arc::new(transport));

    let err = source
        .latest(Endpoint::InternationalPrice)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::InvalidResponse);
}

#[tokio::test]
async fn gold_api_has_no_historical_series() {
    let source = GoldApiSource::new(Arc::new(CannedTransport::new()));

    let err = source
        .series(Endpoint::InternationalPrice, range("2024-01-01", "2024-01-31"))
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::UnsupportedEndpoint);
    assert!(!err.retryable());
}

#[tokio::test]
async fn transport_failure_surfaces_as_retryable_unavailable() {
    let source = GoldApiSource::new(Arc::new(FailingTransport));

    let err = source
        .latest(Endpoint::InternationalPrice)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::Unavailable);
    assert!(err.retryable());
}

#[tokio::test]
async fn frankfurter_reads_the_quoted_rate_from_latest() {
    let transport = CannedTransport::new().with_route(
        "/latest?from=USD&to=KRW",
        r#"{"amount":1.0,"base":"USD","date":"2024-06-03","rates":{"KRW":1391.2}}"#,
    );
    let source = FrankfurterSource::new(Arc::new(transport));

    let rate = source
        .latest(Endpoint::ExchangeRate)
        .await
        .expect("latest rate");
    assert_eq!(rate, 1_391.2);
}

#[tokio::test]
async fn frankfurter_range_is_fetched_in_yearly_chunks() {
    // 2023-01-01 to 2024-06-01 spans two chunks; each chunk is served by its
    // own canned route and both must land in the merged series.
    let transport = CannedTransport::new()
        .with_route(
            "/2023-01-01..2024-01-01",
            r#"{"rates":{"2023-01-03":{"KRW":1265.1},"not-a-date":{"KRW":1.0}}}"#,
        )
        .with_route(
            "/2024-01-02..2024-06-01",
            r#"{"rates":{"2024-05-31":{"KRW":1380.4}}}"#,
        );
    let source = FrankfurterSource::new(Arc::new(transport));

    let series = source
        .series(Endpoint::ExchangeRate, range("2023-01-01", "2024-06-01"))
        .await
        .expect("range");

    assert_eq!(series.len(), 2);
    assert_eq!(series.get(date("2023-01-03")), Some(1_265.1));
    assert_eq!(series.get(date("2024-05-31")), Some(1_380.4));
}

fn krx_source(body: &str) -> KrxOpenApiSource {
    let transport = CannedTransport::new().with_route("/getGoldPriceInfo", body);
    KrxOpenApiSource::new(Arc::new(transport), KrxConfig::new("test-key"))
}

#[tokio::test]
async fn krx_prefers_the_one_kg_instrument_and_restates_per_gram() {
    let body = r#"{"response":{"body":{"items":{"item":[
        {"itmsNm":"금 99.99_100g","clpr":9120},
        {"itmsNm":"금 99.99_1Kg","clpr":"90,850"}
    ]}}}}"#;

    let price = krx_source(body)
        .latest(Endpoint::LocalPrice)
        .await
        .expect("local price");
    assert_eq!(price, 90.85);
}

#[tokio::test]
async fn krx_falls_back_to_the_first_parsable_item() {
    let body = r#"{"response":{"body":{"items":{"item":[
        {"itmsNm":"금 99.99_100g","clpr":"bogus"},
        {"itmsNm":"금 99.99_100g","clpr":91200}
    ]}}}}"#;

    let price = krx_source(body)
        .latest(Endpoint::LocalPrice)
        .await
        .expect("local price");
    assert_eq!(price, 91.2);
}

#[tokio::test]
async fn krx_empty_item_list_is_an_invalid_response() {
    let body = r#"{"response":{"body":{"items":{"item":[]}}}}"#;

    let err = krx_source(body)
        .latest(Endpoint::LocalPrice)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::InvalidResponse);
}

#[tokio::test]
async fn krx_serves_only_the_local_price_endpoint() {
    let err = krx_source("{}")
        .latest(Endpoint::ExchangeRate)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::UnsupportedEndpoint);
}

#[tokio::test]
async fn lbma_keeps_usable_rows_inside_the_range_only() {
    let body = r#"[
        {"d":"2023-12-29","v":[2062.4,2058.1]},
        {"d":"2024-01-02","v":[2064.0]},
        {"d":"garbage","v":[2000.0]},
        {"d":"2024-01-03","v":[null,2055.0]},
        {"d":"2024-01-04","v":[0.0]},
        {"d":"2024-01-05","v":[2044.9]}
    ]"#;
    let transport = CannedTransport::new().with_route("/json/gold_pm.json", body);
    let source = LbmaSource::new(Arc::new(transport));

    let series = source
        .series(Endpoint::InternationalPrice, range("2024-01-01", "2024-01-31"))
        .await
        .expect("series");

    // Out-of-range, unparsable, null-fix and zero-fix rows all drop out.
    assert_eq!(series.len(), 2);
    assert_eq!(series.get(date("2024-01-02")), Some(2_064.0));
    assert_eq!(series.get(date("2024-01-05")), Some(2_044.9));
}

#[tokio::test]
async fn lbma_latest_answers_with_the_newest_fix() {
    let body = r#"[
        {"d":"2024-01-02","v":[2064.0]},
        {"d":"2024-01-05","v":[2044.9]},
        {"d":"2024-01-08","v":[null]}
    ]"#;
    let transport = CannedTransport::new().with_route("/json/gold_pm.json", body);
    let source = LbmaSource::new(Arc::new(transport));

    // capabilities() advertises the endpoint, so latest must serve it too.
    assert!(source
        .capabilities()
        .supports(Endpoint::InternationalPrice));
    let latest = source
        .latest(Endpoint::InternationalPrice)
        .await
        .expect("latest fix");
    assert_eq!(latest, 2_044.9);
}

#[tokio::test]
async fn lbma_latest_rejects_other_endpoints() {
    let source = LbmaSource::new(Arc::new(CannedTransport::new()));

    let err = source
        .latest(Endpoint::ExchangeRate)
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::UnsupportedEndpoint);
}

#[tokio::test]
async fn local_csv_merges_files_in_name_order_and_skips_bad_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("2024-a.csv"),
        "date,price\n2024/03/04,118000\n2024-03-05,\"118,500\"\nbogus,1\n2024-03-06,-5\n",
    )
    .expect("write a");
    // Later file revises the Mar 5 close.
    std::fs::write(
        dir.path().join("2024-b.csv"),
        "date,price\n2024-03-05,118750\n",
    )
    .expect("write b");

    let source = LocalCsvSource::new(dir.path());
    let series = source
        .series(Endpoint::LocalPrice, range("2024-01-01", "2024-12-31"))
        .await
        .expect("series");

    assert_eq!(series.len(), 2);
    assert_eq!(series.get(date("2024-03-04")), Some(118_000.0));
    assert_eq!(series.get(date("2024-03-05")), Some(118_750.0));

    let latest = source.latest(Endpoint::LocalPrice).await.expect("latest");
    assert_eq!(latest, 118_750.0);
}

#[tokio::test]
async fn local_csv_unreadable_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    let err = LocalCsvSource::new(missing)
        .series(Endpoint::LocalPrice, range("2024-01-01", "2024-12-31"))
        .await
        .expect_err("must fail");
    assert_eq!(err.kind(), SourceErrorKind::Unavailable);
}
