use std::path::Path;
use std::sync::Arc;

use goldprem_core::{
    reconcile, DateRange, Endpoint, FrankfurterSource, HttpClient, LbmaSource, LocalCsvSource,
    MarketDate, PremiumHistory, PriceSource, ReconcileOptions, ReqwestHttpClient,
};
use goldprem_store::HistoryStore;

use crate::cli::BackfillArgs;
use crate::error::CliError;

pub async fn run(args: &BackfillArgs, history_path: &Path) -> Result<(), CliError> {
    let local_source = LocalCsvSource::new(&args.csv_dir);
    let local = local_source
        .series(
            Endpoint::LocalPrice,
            DateRange::up_to(MarketDate::today_utc()),
        )
        .await?;

    let (Some(start), Some(end)) = (local.first_date(), local.last_date()) else {
        return Err(CliError::MissingInput(format!(
            "no local price rows found under {}",
            args.csv_dir.display()
        )));
    };
    println!("local price range: {start} ~ {end} ({} records)", local.len());

    // The anchor span defines what we ask the historical feeds for. Fetch
    // failure of either feed aborts here, before anything is written.
    let range = DateRange::new(start, end)?;
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    let international = LbmaSource::new(http.clone())
        .series(Endpoint::InternationalPrice, range)
        .await?;
    println!("fetched {} international price records", international.len());

    let exchange = FrankfurterSource::new(http)
        .series(Endpoint::ExchangeRate, range)
        .await?;
    println!("fetched {} exchange rate records", exchange.len());

    let report = reconcile(
        &local,
        &international,
        &exchange,
        ReconcileOptions {
            lookback_days: args.lookback_days,
        },
    );
    println!(
        "built {} records, skipped {}",
        report.records.len(),
        report.skipped
    );

    let history = PremiumHistory::from_records(report.records);
    let store = HistoryStore::open(history_path);
    store.save(&history)?;
    println!("saved {} records to {}", history.len(), store.path().display());

    Ok(())
}
