use clap::{Args, Subcommand};
use refill_app::domain::regions::Region;

mod list;
mod quote;

#[derive(Debug, Args)]
pub(crate) struct FeeCommand {
    #[command(subcommand)]
    command: FeeSubcommand,
}

#[derive(Debug, Subcommand)]
enum FeeSubcommand {
    /// Quote a fee, superseding the scope's active one
    Quote(quote::QuoteFeeArgs),

    /// Print active fees
    List(list::ListFeesArgs),
}

pub(crate) async fn run(command: FeeCommand) -> Result<(), String> {
    match command.command {
        FeeSubcommand::Quote(args) => quote::run(args).await,
        FeeSubcommand::List(args) => list::run(args).await,
    }
}

fn parse_region(state: &str, lga: &str) -> Result<Region, String> {
    Region::new(state, lga).map_err(|error| format!("invalid region: {error}"))
}
