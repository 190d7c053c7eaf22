use clap::Args;
use refill_app::domain::fees::{FeesService, PgFeesService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListFeesArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Restrict to one state (requires --lga)
    #[arg(long, requires = "lga")]
    state: Option<String>,

    /// Restrict to one local government area (requires --state)
    #[arg(long, requires = "state")]
    lga: Option<String>,
}

pub(crate) async fn run(args: ListFeesArgs) -> Result<(), String> {
    let region = match (args.state.as_deref(), args.lga.as_deref()) {
        (Some(state), Some(lga)) => Some(super::parse_region(state, lga)?),
        _ => None,
    };

    let service = PgFeesService::new(args.database.connect().await?);

    let fees = service
        .list_active(region)
        .await
        .map_err(|error| format!("failed to list fees: {error}"))?;

    for fee in fees {
        println!(
            "{}\t{}\tper_kg={}\tper_qty={}\tamount={}\tsince={}",
            fee.uuid,
            fee.scope,
            fee.rates.cost_per_kg,
            fee.rates.cost_per_qty,
            fee.rates.amount,
            fee.status_changed_at
        );
    }

    Ok(())
}
