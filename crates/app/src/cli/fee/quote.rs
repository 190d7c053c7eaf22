use clap::Args;
use refill_app::{
    domain::{
        fees::{
            FeesService, PgFeesService,
            data::{FeeScope, NewFeeQuote},
            records::{FeeRates, FeeType, FeeUuid},
        },
        references::ProductUuid,
    },
    money::Money,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct QuoteFeeArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// State the fee applies in
    #[arg(long)]
    state: String,

    /// Local government area the fee applies in
    #[arg(long)]
    lga: String,

    /// One of product, delivery or service
    #[arg(long)]
    fee_type: FeeType,

    /// Product priced by a product fee
    #[arg(long)]
    product: Option<ProductUuid>,

    /// Rate per kilogram, in major units
    #[arg(long, default_value_t = 0.0)]
    cost_per_kg: f64,

    /// Rate per unit, in major units
    #[arg(long, default_value_t = 0.0)]
    cost_per_qty: f64,

    /// Flat delivery or service amount, in major units
    #[arg(long, default_value_t = 0.0)]
    amount: f64,
}

pub(crate) async fn run(args: QuoteFeeArgs) -> Result<(), String> {
    let region = super::parse_region(&args.state, &args.lga)?;

    let scope = FeeScope::new(args.fee_type, region, args.product)
        .map_err(|error| format!("invalid fee scope: {error}"))?;

    let money = |label: &str, value: f64| {
        Money::from_major(value).map_err(|error| format!("invalid {label}: {error}"))
    };

    let rates = FeeRates {
        cost_per_kg: money("cost-per-kg", args.cost_per_kg)?,
        cost_per_qty: money("cost-per-qty", args.cost_per_qty)?,
        amount: money("amount", args.amount)?,
    };

    let service = PgFeesService::new(args.database.connect().await?);

    let fee = service
        .quote(NewFeeQuote {
            uuid: FeeUuid::new(),
            scope,
            rates,
        })
        .await
        .map_err(|error| format!("failed to quote fee: {error}"))?;

    println!("fee_uuid: {}", fee.uuid);
    println!("scope: {}", fee.scope);
    println!("cost_per_kg: {}", fee.rates.cost_per_kg);
    println!("cost_per_qty: {}", fee.rates.cost_per_qty);
    println!("amount: {}", fee.rates.amount);

    Ok(())
}
