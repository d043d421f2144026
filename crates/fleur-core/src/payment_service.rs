//! Receipt-submission workflow for GCash payments.
//!
//! A submission only accumulates the paid total and parks the record in
//! `waiting_for_confirmation`; confirming the money and advancing the order
//! are separate back-office actions.

use tracing::warn;
use uuid::Uuid;

use fleur_domain::money::{self, Amount};
use fleur_domain::payment::{PaymentOutcome, PaymentSubmission};
use fleur_domain::record::{FulfillmentRecord, PaymentState};

use crate::error::CoreError;

pub struct PaymentService;

impl PaymentService {
    /// Validates and applies a receipt submission against a record snapshot.
    ///
    /// Never mutates the input; callers persist the returned snapshot. The
    /// reported balance is computed against the total as quoted right now,
    /// which may still be provisional for request records.
    pub fn submit(
        record: &FulfillmentRecord,
        amount: Amount,
        receipt_ref: Option<&str>,
    ) -> Result<PaymentSubmission, CoreError> {
        if amount <= Amount::ZERO {
            return Err(CoreError::InvalidAmount(
                "payment amount must be greater than zero".to_string(),
            ));
        }
        let receipt_ref = receipt_ref
            .map(str::trim)
            .filter(|reference| !reference.is_empty())
            .ok_or(CoreError::MissingReceipt)?;

        let new_paid = money::apply_payment(record.amount_paid, amount)?;
        let balance_due = money::balance_due(record.total, new_paid);
        let outcome = Self::classify(record, new_paid, balance_due);

        let mut updated = record.clone();
        updated.amount_paid = new_paid;
        updated.payment_state = PaymentState::WaitingForConfirmation;

        Ok(PaymentSubmission {
            id: Uuid::new_v4(),
            record: updated,
            amount,
            receipt_ref: receipt_ref.to_string(),
            balance_due,
            outcome,
        })
    }

    fn classify(record: &FulfillmentRecord, new_paid: Amount, balance_due: Amount) -> PaymentOutcome {
        if !record.is_quoted() {
            return PaymentOutcome::AwaitingQuote;
        }
        if new_paid > record.total {
            warn!(
                record = %record.display_label(),
                paid = %new_paid,
                total = %record.total,
                "payment exceeds the quoted total, flagged for review"
            );
            return PaymentOutcome::Overpaid {
                excess: new_paid - record.total,
            };
        }
        if balance_due.is_zero() {
            PaymentOutcome::FullyPaid
        } else {
            PaymentOutcome::Partial {
                balance: balance_due,
            }
        }
    }
}
