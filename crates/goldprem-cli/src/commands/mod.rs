mod backfill;
mod show;
mod update;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Backfill(args) => backfill::run(args, &cli.history).await,
        Command::Update(args) => update::run(args, &cli.history).await,
        Command::Show(args) => show::run(args, &cli.history),
    }
}
