//! Item cost computation.

use crate::{
    domain::{carts::data::CostBasis, fees::records::FeeRates},
    money::{AmountError, Money},
};

/// Cost of an item priced by `rates`.
///
/// Weight-priced items use the per-kilogram rate rounded to whole minor units;
/// everything else uses the per-unit rate times the quantity.
pub fn item_cost(rates: &FeeRates, basis: CostBasis) -> Result<Money, AmountError> {
    let cost = match basis {
        CostBasis::Weight(weight) => rates.cost_per_kg.times_weight(weight),
        CostBasis::Quantity(quantity) => rates.cost_per_qty.checked_mul(u64::from(quantity)),
    };

    cost.ok_or(AmountError::OutOfRange)
}
