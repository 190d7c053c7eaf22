//! Fixed-point money and weight values.
//!
//! Amounts are held as whole minor units (kobo) so that fee comparisons and
//! totals are exact. Values arriving from the outside world as floating point
//! numbers are rounded to two decimal places exactly once, on the way in.

use std::fmt::{self, Display, Formatter};

use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// Amounts are stored as `BIGINT`.
const MAX_MINOR: u64 = i64::MAX.unsigned_abs();
const GRAMS_PER_KILOGRAM: u64 = 1_000;

/// Errors raised while converting external numbers into money or weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount must be a finite, non-negative number")]
    Invalid,

    #[error("amount is out of range")]
    OutOfRange,

    #[error("weight must be a positive number of kilograms")]
    InvalidWeight,
}

/// A non-negative amount of money in minor currency units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Round `value` (major units) half away from zero to two decimal places.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Invalid);
        }

        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_u64())
            .and_then(Self::bounded)
            .ok_or(AmountError::OutOfRange)
    }

    /// Convert a major-unit float (as received in JSON) into money.
    pub fn from_major(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid);
        }

        Decimal::from_f64(value)
            .ok_or(AmountError::OutOfRange)
            .and_then(Self::from_decimal)
    }

    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), 2)
    }

    /// Major-unit float for JSON responses.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.to_decimal().to_f64().unwrap_or(f64::MAX)
    }

    fn bounded(minor: u64) -> Option<Self> {
        (minor <= MAX_MINOR).then_some(Self(minor))
    }

    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::bounded)
    }

    #[must_use]
    pub fn checked_mul(self, factor: u64) -> Option<Self> {
        self.0.checked_mul(factor).and_then(Self::bounded)
    }

    /// Per-kilogram rate applied to `weight`, rounded half up to whole minor units.
    #[must_use]
    pub fn times_weight(self, weight: Weight) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(weight.grams());
        let rounded = (scaled + u128::from(GRAMS_PER_KILOGRAM / 2)) / u128::from(GRAMS_PER_KILOGRAM);

        u64::try_from(rounded).ok().and_then(Self::bounded)
    }

    /// Sum an iterator of amounts, returning `None` on overflow.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_UNITS_PER_MAJOR,
            self.0 % MINOR_UNITS_PER_MAJOR
        )
    }
}

impl TryFrom<i64> for Money {
    type Error = AmountError;

    fn try_from(minor: i64) -> Result<Self, Self::Error> {
        u64::try_from(minor)
            .map(Self)
            .map_err(|_negative| AmountError::Invalid)
    }
}

impl TryFrom<Money> for i64 {
    type Error = AmountError;

    fn try_from(money: Money) -> Result<Self, Self::Error> {
        i64::try_from(money.0).map_err(|_overflow| AmountError::OutOfRange)
    }
}

/// A positive weight, stored in whole grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(u64);

impl Weight {
    pub fn from_grams(grams: u64) -> Result<Self, AmountError> {
        if grams == 0 {
            return Err(AmountError::InvalidWeight);
        }

        Ok(Self(grams))
    }

    /// Kilograms as received in JSON, rounded to the nearest gram.
    pub fn from_kilograms(kilograms: f64) -> Result<Self, AmountError> {
        if !kilograms.is_finite() || kilograms <= 0.0 {
            return Err(AmountError::InvalidWeight);
        }

        let grams = Decimal::from_f64(kilograms)
            .ok_or(AmountError::InvalidWeight)?
            .checked_mul(Decimal::from(GRAMS_PER_KILOGRAM))
            .ok_or(AmountError::OutOfRange)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or(AmountError::OutOfRange)?;

        Self::from_grams(grams)
    }

    #[must_use]
    pub const fn grams(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn to_kilograms(self) -> f64 {
        Decimal::from_i128_with_scale(i128::from(self.0), 3)
            .to_f64()
            .unwrap_or(f64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_major_rounds_to_two_places() -> TestResult {
        assert_eq!(Money::from_major(6200.0)?, Money::from_minor(620_000));
        assert_eq!(Money::from_major(6199.99)?, Money::from_minor(619_999));
        assert_eq!(Money::from_major(0.125)?, Money::from_minor(13));
        assert_eq!(Money::from_major(0.1 + 0.2)?, Money::from_minor(30));

        Ok(())
    }

    #[test]
    fn from_major_rejects_negative_and_non_finite() {
        assert_eq!(Money::from_major(-0.01), Err(AmountError::Invalid));
        assert_eq!(Money::from_major(f64::NAN), Err(AmountError::Invalid));
        assert_eq!(Money::from_major(f64::INFINITY), Err(AmountError::Invalid));
    }

    #[test]
    fn display_uses_two_decimal_places() {
        assert_eq!(Money::from_minor(620_000).to_string(), "6200.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }

    #[test]
    fn to_major_matches_rounded_input() -> TestResult {
        let paid = Money::from_major(6199.99)?;

        assert!((paid.to_major() - 6199.99).abs() < f64::EPSILON * 8192.0);

        Ok(())
    }

    #[test]
    fn times_weight_rounds_half_up_to_minor_units() -> TestResult {
        let per_kg = Money::from_minor(100_000);

        assert_eq!(
            per_kg.times_weight(Weight::from_kilograms(12.5)?),
            Some(Money::from_minor(1_250_000))
        );

        let odd_rate = Money::from_minor(333);

        // 3.33 * 1.5 = 4.995 rounds to 5.00
        assert_eq!(
            odd_rate.times_weight(Weight::from_grams(1_500)?),
            Some(Money::from_minor(500))
        );

        Ok(())
    }

    #[test]
    fn weight_must_be_positive() {
        assert_eq!(Weight::from_kilograms(0.0), Err(AmountError::InvalidWeight));
        assert_eq!(Weight::from_kilograms(-3.0), Err(AmountError::InvalidWeight));
        assert_eq!(Weight::from_grams(0), Err(AmountError::InvalidWeight));
    }

    #[test]
    fn checked_sum_detects_overflow() {
        let amounts = [Money::from_minor(u64::MAX), Money::from_minor(1)];

        assert_eq!(Money::checked_sum(amounts), None);
        assert_eq!(
            Money::checked_sum([Money::from_minor(1), Money::from_minor(2)]),
            Some(Money::from_minor(3))
        );
    }

    #[test]
    fn amounts_beyond_bigint_are_out_of_range() -> TestResult {
        assert_eq!(Money::from_major(1e17), Err(AmountError::OutOfRange));
        assert_eq!(
            Money::from_minor(i64::MAX.unsigned_abs()).checked_add(Money::from_minor(1)),
            None
        );

        let largest = Money::from_decimal(Decimal::from_i128_with_scale(i128::from(i64::MAX), 2))?;

        assert_eq!(i64::try_from(largest), Ok(i64::MAX));

        Ok(())
    }

    #[test]
    fn negative_database_amounts_are_rejected() {
        assert_eq!(Money::try_from(-1_i64), Err(AmountError::Invalid));
        assert_eq!(Money::try_from(42_i64), Ok(Money::from_minor(42)));
    }
}
