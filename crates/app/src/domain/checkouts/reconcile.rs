//! Fee and payment reconciliation.
//!
//! Pure functions over values already loaded inside the checkout transaction,
//! so every rule here is testable without a database.

use rustc_hash::FxHashMap;

use crate::{
    domain::{
        checkouts::{data::CheckoutRequest, errors::CheckoutsServiceError},
        fees::records::{FeeRecord, FeeType},
    },
    money::{AmountError, Money},
};

/// Amounts that make up a reconciled order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub delivery_fee: Money,
    pub service_fee: Money,
    pub total: Money,
}

/// Check the submitted fees and payment against the ledger's active regional fees.
pub fn reconcile(
    cart_total: Money,
    request: &CheckoutRequest,
    ledger: &[FeeRecord],
) -> Result<Reconciled, CheckoutsServiceError> {
    let rates: FxHashMap<FeeType, Money> = ledger
        .iter()
        .filter(|fee| fee.is_active() && fee.scope.product_uuid().is_none())
        .map(|fee| (fee.scope.fee_type(), fee.rates.amount))
        .collect();

    let expected = |fee_type: FeeType| {
        rates
            .get(&fee_type)
            .copied()
            .ok_or_else(|| CheckoutsServiceError::FeeNotFound(fee_type.to_string()))
    };

    let delivery_fee = expected(FeeType::Delivery)?;

    if request.delivery_fee != delivery_fee {
        return Err(CheckoutsServiceError::InvalidDeliveryFee {
            submitted: request.delivery_fee,
            expected: delivery_fee,
        });
    }

    let service_fee = expected(FeeType::Service)?;

    if request.service_fee != service_fee {
        return Err(CheckoutsServiceError::InvalidServiceFee {
            submitted: request.service_fee,
            expected: service_fee,
        });
    }

    let total = Money::checked_sum([cart_total, delivery_fee, service_fee])
        .ok_or(AmountError::OutOfRange)?;

    if request.amount_paid < total {
        return Err(CheckoutsServiceError::AmountPaid {
            paid: request.amount_paid,
            total,
        });
    }

    Ok(Reconciled {
        delivery_fee,
        service_fee,
        total,
    })
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::domain::{
        checkouts::data::Recipient,
        fees::{
            data::FeeScope,
            records::{FeeRates, FeeStatus, FeeUuid},
        },
        regions::Region,
    };

    use super::*;

    fn fee(fee_type: FeeType, major: f64, status: FeeStatus) -> TestResult<FeeRecord> {
        Ok(FeeRecord {
            uuid: FeeUuid::new(),
            scope: FeeScope::regional(fee_type, Region::new("Lagos", "Ikeja")?)?,
            rates: FeeRates {
                amount: Money::from_major(major)?,
                ..FeeRates::default()
            },
            status,
            status_changed_at: Timestamp::now(),
            created_at: Timestamp::now(),
        })
    }

    fn ledger() -> TestResult<Vec<FeeRecord>> {
        Ok(vec![
            fee(FeeType::Delivery, 1000.0, FeeStatus::Active)?,
            fee(FeeType::Service, 200.0, FeeStatus::Active)?,
        ])
    }

    fn request(delivery: f64, service: f64, paid: f64) -> TestResult<CheckoutRequest> {
        Ok(CheckoutRequest {
            recipient: Recipient::Myself,
            payment_method: "card".to_string(),
            amount_paid: Money::from_major(paid)?,
            delivery_fee: Money::from_major(delivery)?,
            service_fee: Money::from_major(service)?,
        })
    }

    #[test]
    fn exact_payment_succeeds_with_rounded_total() -> TestResult {
        let cart_total = Money::from_major(5000.0)?;

        let reconciled = reconcile(cart_total, &request(1000.0, 200.0, 6200.0)?, &ledger()?)?;

        assert_eq!(reconciled.total, Money::from_major(6200.0)?);
        assert_eq!(reconciled.delivery_fee, Money::from_major(1000.0)?);
        assert_eq!(reconciled.service_fee, Money::from_major(200.0)?);

        Ok(())
    }

    #[test]
    fn overpayment_is_accepted() -> TestResult {
        let reconciled = reconcile(
            Money::from_major(5000.0)?,
            &request(1000.0, 200.0, 7000.0)?,
            &ledger()?,
        )?;

        assert_eq!(reconciled.total, Money::from_major(6200.0)?);

        Ok(())
    }

    #[test]
    fn one_kobo_short_is_an_amount_paid_error() -> TestResult {
        let result = reconcile(
            Money::from_major(5000.0)?,
            &request(1000.0, 200.0, 6199.99)?,
            &ledger()?,
        );

        assert!(
            matches!(
                result,
                Err(CheckoutsServiceError::AmountPaid { paid, total })
                    if paid == Money::from_minor(619_999) && total == Money::from_minor(620_000)
            ),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn float_noise_does_not_fail_payment() -> TestResult {
        let result = reconcile(
            Money::from_major(0.1)?,
            &request(1000.0, 200.0, 1200.1 + 1e-9)?,
            &ledger()?,
        );

        assert!(result.is_ok(), "got {result:?}");

        Ok(())
    }

    #[test]
    fn delivery_fee_must_match_ledger() -> TestResult {
        let result = reconcile(
            Money::from_major(5000.0)?,
            &request(900.0, 200.0, 6200.0)?,
            &ledger()?,
        );

        assert!(
            matches!(
                result,
                Err(CheckoutsServiceError::InvalidDeliveryFee { expected, .. })
                    if expected == Money::from_minor(100_000)
            ),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn service_fee_must_match_ledger() -> TestResult {
        let result = reconcile(
            Money::from_major(5000.0)?,
            &request(1000.0, 250.0, 6250.0)?,
            &ledger()?,
        );

        assert!(
            matches!(result, Err(CheckoutsServiceError::InvalidServiceFee { .. })),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn missing_regional_fee_is_fee_not_found() -> TestResult {
        let only_delivery = vec![fee(FeeType::Delivery, 1000.0, FeeStatus::Active)?];

        let result = reconcile(
            Money::from_major(5000.0)?,
            &request(1000.0, 200.0, 6200.0)?,
            &only_delivery,
        );

        assert!(
            matches!(&result, Err(CheckoutsServiceError::FeeNotFound(fee_type)) if fee_type == "service"),
            "got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn inactive_fees_are_ignored() -> TestResult {
        let stale = vec![
            fee(FeeType::Delivery, 900.0, FeeStatus::Inactive)?,
            fee(FeeType::Service, 200.0, FeeStatus::Active)?,
        ];

        let result = reconcile(
            Money::from_major(5000.0)?,
            &request(900.0, 200.0, 6100.0)?,
            &stale,
        );

        assert!(
            matches!(result, Err(CheckoutsServiceError::FeeNotFound(_))),
            "got {result:?}"
        );

        Ok(())
    }
}
