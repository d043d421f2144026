//! Status transitions driven by back-office and customer actions.
//!
//! Transitions are one-directional. Cancellation is reachable from any
//! non-terminal status; nothing is reachable from a terminal one.

use fleur_domain::record::{DeliveryMethod, FulfillmentRecord, PaymentState};
use fleur_domain::stage::RawStatus;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer,
    Admin,
}

pub struct TransitionService;

impl TransitionService {
    /// Admin accepts a pending record.
    pub fn accept(record: &FulfillmentRecord) -> Result<FulfillmentRecord, CoreError> {
        Self::expect_status(record, RawStatus::Pending, "accept")?;
        Ok(Self::with_status(record, RawStatus::Accepted))
    }

    /// Admin declines a pending record.
    pub fn decline(record: &FulfillmentRecord) -> Result<FulfillmentRecord, CoreError> {
        Self::expect_status(record, RawStatus::Pending, "decline")?;
        Ok(Self::with_status(record, RawStatus::Declined))
    }

    /// Admin advances a record one step along its fulfillment chain.
    ///
    /// Moving past `accepted` requires the payment to be confirmed first.
    /// Pickup records finish as `claimed`, deliveries as `completed`.
    pub fn advance(record: &FulfillmentRecord) -> Result<FulfillmentRecord, CoreError> {
        let current = Self::parsed(record)?;
        let next = match current {
            RawStatus::Pending => RawStatus::Accepted,
            RawStatus::Accepted => {
                if record.payment_state != PaymentState::Paid {
                    return Err(CoreError::InvalidOperation(
                        "payment has not been confirmed".to_string(),
                    ));
                }
                RawStatus::Processing
            }
            RawStatus::Processing => match record.delivery_method {
                DeliveryMethod::Delivery => RawStatus::ReadyForDelivery,
                DeliveryMethod::Pickup => RawStatus::ReadyForPickup,
            },
            RawStatus::ReadyForDelivery | RawStatus::ToReceive => RawStatus::OutForDelivery,
            RawStatus::OutForDelivery => RawStatus::Completed,
            RawStatus::ReadyForPickup => RawStatus::Claimed,
            terminal => {
                return Err(CoreError::InvalidOperation(format!(
                    "cannot advance a {terminal} record"
                )))
            }
        };
        Ok(Self::with_status(record, next))
    }

    /// Cancels a record. Customers may only cancel while still pending;
    /// admins may cancel anything non-terminal.
    pub fn cancel(record: &FulfillmentRecord, actor: Actor) -> Result<FulfillmentRecord, CoreError> {
        let current = Self::parsed(record)?;
        if current.is_terminal() {
            return Err(CoreError::InvalidOperation(format!(
                "cannot cancel a {current} record"
            )));
        }
        if actor == Actor::Customer && current != RawStatus::Pending {
            return Err(CoreError::InvalidOperation(
                "records can only be cancelled while pending".to_string(),
            ));
        }
        Ok(Self::with_status(record, RawStatus::Cancelled))
    }

    /// Admin confirms a submitted receipt: the record settles into `paid`
    /// when the quoted total is covered, `partial` otherwise.
    pub fn confirm_payment(record: &FulfillmentRecord) -> Result<FulfillmentRecord, CoreError> {
        if record.payment_state != PaymentState::WaitingForConfirmation {
            return Err(CoreError::InvalidOperation(
                "no receipt is waiting for confirmation".to_string(),
            ));
        }
        let mut updated = record.clone();
        updated.payment_state = if updated.is_fully_paid() {
            PaymentState::Paid
        } else {
            PaymentState::Partial
        };
        Ok(updated)
    }

    fn parsed(record: &FulfillmentRecord) -> Result<RawStatus, CoreError> {
        record.raw_status().ok_or_else(|| {
            CoreError::Validation(format!("unrecognized status `{}`", record.status))
        })
    }

    fn expect_status(
        record: &FulfillmentRecord,
        expected: RawStatus,
        action: &str,
    ) -> Result<(), CoreError> {
        let current = Self::parsed(record)?;
        if current != expected {
            return Err(CoreError::InvalidOperation(format!(
                "cannot {action} a {current} record"
            )));
        }
        Ok(())
    }

    fn with_status(record: &FulfillmentRecord, status: RawStatus) -> FulfillmentRecord {
        let mut updated = record.clone();
        updated.set_status(status);
        updated
    }
}
