use std::path::Path;
use std::sync::Arc;

use goldprem_core::{
    Endpoint, FrankfurterSource, GoldApiSource, HttpClient, KrxConfig, KrxOpenApiSource,
    MarketDate, MarkupEstimate, PremiumRecord, PriceSource, ReqwestHttpClient, RetentionPolicy,
};
use goldprem_store::HistoryStore;

use crate::cli::UpdateArgs;
use crate::error::CliError;

pub async fn run(args: &UpdateArgs, history_path: &Path) -> Result<(), CliError> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());

    // International price and exchange rate are hard requirements: a fetch
    // failure aborts the run before the history file is read or written.
    let international_price = GoldApiSource::new(http.clone())
        .latest(Endpoint::InternationalPrice)
        .await?;
    println!("international price: {international_price} USD/oz");

    let exchange_rate = FrankfurterSource::new(http.clone())
        .latest(Endpoint::ExchangeRate)
        .await?;
    println!("exchange rate: {exchange_rate} KRW/USD");

    let korean_price = fetch_local_price(args, http).await;
    let korean_price = match korean_price {
        Some(price) => {
            println!("local price: {price} KRW/g");
            price
        }
        None if args.estimate_local => {
            let estimate = MarkupEstimate::default();
            let estimated = estimate
                .local_price(international_price, exchange_rate)
                .ok_or_else(|| {
                    CliError::MissingInput(String::from(
                        "cannot estimate a local price from non-positive inputs",
                    ))
                })?;
            println!(
                "using estimated local price: {estimated:.2} KRW/g (markup {:.2})",
                estimate.markup()
            );
            estimated
        }
        None => {
            return Err(CliError::MissingInput(String::from(
                "no local gold price observation; pass --estimate-local to derive one",
            )));
        }
    };

    let today = MarketDate::today_utc();
    let record = PremiumRecord::derive(today, korean_price, international_price, exchange_rate)
        .ok_or_else(|| {
            CliError::MissingInput(String::from(
                "premium is undefined for the fetched readings",
            ))
        })?;
    println!("new entry: {}", serde_json::to_string(&record)?);

    let store = HistoryStore::open(history_path);
    let mut history = store.load()?;
    let replacing = history.record_for(today).is_some();

    history.upsert(record);
    let policy = args
        .retention_days
        .map_or(RetentionPolicy::KeepAll, RetentionPolicy::days);
    history.apply_retention(policy, today);

    store.save(&history)?;
    println!(
        "{} entry for {today}; {} records total",
        if replacing { "updated" } else { "added" },
        history.len()
    );

    Ok(())
}

/// Best-effort local price: a failed fetch or an absent service key just
/// yields `None`; the caller decides between estimating and aborting.
async fn fetch_local_price(args: &UpdateArgs, http: Arc<dyn HttpClient>) -> Option<f64> {
    let service_key = args
        .krx_service_key
        .clone()
        .or_else(|| std::env::var("KRX_API_KEY").ok())
        .filter(|key| !key.is_empty())?;

    let krx = KrxOpenApiSource::new(http, KrxConfig::new(service_key));
    match krx.latest(Endpoint::LocalPrice).await {
        Ok(price) => Some(price),
        Err(error) => {
            eprintln!("warning: local price fetch failed: {error}");
            None
        }
    }
}
