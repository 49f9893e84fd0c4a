use std::path::Path;

use goldprem_store::HistoryStore;

use crate::cli::ShowArgs;
use crate::error::CliError;

pub fn run(args: &ShowArgs, history_path: &Path) -> Result<(), CliError> {
    let store = HistoryStore::open(history_path);
    let history = store.load()?;

    if history.is_empty() {
        println!("history at {} is empty", store.path().display());
        return Ok(());
    }

    if let Some(last_updated) = history.last_updated {
        println!("last updated: {last_updated}");
    }

    let start = history.len().saturating_sub(args.last);
    for record in &history.data[start..] {
        println!(
            "{}  local {:>10.2} KRW/g  intl {:>8.2} USD/oz  fx {:>8.2}  premium {:>6.2}%",
            record.date,
            record.korean_price,
            record.international_price,
            record.exchange_rate,
            record.premium
        );
    }

    Ok(())
}
