//! CLI argument definitions for goldprem.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `backfill` | Rebuild the full history from CSV exports plus LBMA/Frankfurter |
//! | `update` | Fetch today's readings and upsert one record |
//! | `show` | Print the most recent records |
//!
//! # Examples
//!
//! ```bash
//! # Rebuild history from local KRX exports
//! goldprem backfill --csv-dir ./krx-exports
//!
//! # Daily update with a 90-day rolling window
//! goldprem update --retention-days 90
//!
//! # Inspect the latest entries
//! goldprem show --last 5
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use goldprem_core::DEFAULT_LOOKBACK_DAYS;

/// goldprem - Korean gold premium tracker
///
/// Maintains a daily history of the Korean gold price, the international
/// gold price, the USD→KRW rate, and the derived premium, persisted as a
/// single JSON document.
#[derive(Debug, Parser)]
#[command(
    name = "goldprem",
    author,
    version,
    about = "Korean gold premium tracker"
)]
pub struct Cli {
    /// Path of the history JSON document.
    #[arg(long, global = true, default_value = "history.json")]
    pub history: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rebuild the full history from local CSV exports plus the LBMA and
    /// Frankfurter historical feeds. Replaces the history document.
    Backfill(BackfillArgs),

    /// Fetch today's readings and upsert one record into the history.
    ///
    /// Re-running on the same day replaces that day's record. Aborts without
    /// touching the file when the international price or exchange rate
    /// cannot be fetched.
    Update(UpdateArgs),

    /// Print the most recent records. Read-only.
    Show(ShowArgs),
}

/// Arguments for the `backfill` command.
#[derive(Debug, Args)]
pub struct BackfillArgs {
    /// Directory of KRX CSV exports (`date,price-per-gram` rows).
    #[arg(long)]
    pub csv_dir: PathBuf,

    /// Gap-filling look-back window in calendar days.
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub lookback_days: u32,
}

/// Arguments for the `update` command.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Drop records older than this many days after the upsert.
    /// Retention is off when the flag is absent.
    #[arg(long)]
    pub retention_days: Option<u32>,

    /// When the local price cannot be fetched, estimate it as the converted
    /// international price times a fixed markup instead of aborting.
    #[arg(long, default_value_t = false)]
    pub estimate_local: bool,

    /// data.go.kr service key for the KRX gold price API. Falls back to the
    /// KRX_API_KEY environment variable; without either, the local price is
    /// not fetched.
    #[arg(long)]
    pub krx_service_key: Option<String>,
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Number of trailing records to print.
    #[arg(long, default_value_t = 10)]
    pub last: usize,
}
