//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! This module exposes a simplified API that the storefront, the back
//! office and the FFI shell can rely on without depending on the entire
//! service surface area.

use tracing::warn;

use fleur_domain::money::Amount;
use fleur_domain::payment::PaymentSubmission;
use fleur_domain::record::{FulfillmentRecord, RecordPatch, StatusNotification};
use fleur_domain::rows::{OrderRow, RequestRow};
use fleur_domain::stage::StagePosition;
use fleur_domain::timeline::{RiderAssignment, TimelineStep};

use crate::build_info::{self, BuildMetadata};
use crate::error::CoreError;
use crate::payment_service::PaymentService;
use crate::stage_service::StageService;
use crate::store::{NotificationSender, ReceiptStorage, RecordStore};
use crate::timeline_service::TimelineService;
use crate::transition_service::{Actor, TransitionService};
use crate::unify_service::UnifyService;

/// Unifies already-fetched rows into the customer-facing collection.
pub fn api_unified_records(
    orders: Vec<OrderRow>,
    requests: Vec<RequestRow>,
) -> Vec<FulfillmentRecord> {
    UnifyService::unify(orders, requests)
}

/// Fetches and unifies every record belonging to `user_id`.
pub fn api_fetch_unified(
    store: &dyn RecordStore,
    user_id: &str,
) -> Result<Vec<FulfillmentRecord>, CoreError> {
    let orders = store.fetch_orders(user_id)?;
    let requests = store.fetch_requests(user_id)?;
    Ok(UnifyService::unify(orders, requests))
}

/// Canonical stage for a record snapshot.
pub fn api_stage(record: &FulfillmentRecord) -> StagePosition {
    StageService::normalize(record)
}

/// Progress timeline for a record snapshot.
pub fn api_track_record(
    record: &FulfillmentRecord,
    rider: Option<&RiderAssignment>,
) -> Vec<TimelineStep> {
    TimelineService::derive(record, rider)
}

pub fn api_balance_due(record: &FulfillmentRecord) -> Amount {
    record.balance_due()
}

/// Decimal-entry wrapper around the submission workflow; the amount is
/// rounded to centavos here and never again.
pub fn api_submit_payment(
    record: &FulfillmentRecord,
    amount: f64,
    receipt_ref: Option<&str>,
) -> Result<PaymentSubmission, CoreError> {
    let amount = Amount::from_decimal(amount)?;
    PaymentService::submit(record, amount, receipt_ref)
}

/// Full payment flow: stores the receipt image, validates the submission and
/// persists the resulting snapshot.
pub fn api_record_payment(
    store: &dyn RecordStore,
    receipts: &dyn ReceiptStorage,
    record: &FulfillmentRecord,
    amount: f64,
    receipt_name: &str,
    receipt_bytes: &[u8],
) -> Result<PaymentSubmission, CoreError> {
    let amount = Amount::from_decimal(amount)?;
    if amount <= Amount::ZERO {
        return Err(CoreError::InvalidAmount(
            "payment amount must be greater than zero".to_string(),
        ));
    }
    let receipt_ref = receipts.store_receipt(receipt_name, receipt_bytes)?;
    let submission = PaymentService::submit(record, amount, Some(&receipt_ref))?;
    let patch = RecordPatch {
        payment_status: Some(submission.record.payment_state),
        amount_paid: Some(submission.record.amount_paid),
        receipt_ref: Some(receipt_ref),
        ..Default::default()
    };
    store.update_record(record.kind, &record.id, &patch)?;
    Ok(submission)
}

/// Advances a record one step, persists it and mails the customer.
pub fn api_advance_status(
    store: &dyn RecordStore,
    notifier: &dyn NotificationSender,
    record: &FulfillmentRecord,
    customer_email: &str,
) -> Result<FulfillmentRecord, CoreError> {
    let updated = TransitionService::advance(record)?;
    persist_status_and_notify(store, notifier, &updated, customer_email)?;
    Ok(updated)
}

/// Cancels a record on behalf of `actor`, persists it and mails the customer.
pub fn api_cancel_record(
    store: &dyn RecordStore,
    notifier: &dyn NotificationSender,
    record: &FulfillmentRecord,
    actor: Actor,
    customer_email: &str,
) -> Result<FulfillmentRecord, CoreError> {
    let updated = TransitionService::cancel(record, actor)?;
    persist_status_and_notify(store, notifier, &updated, customer_email)?;
    Ok(updated)
}

/// Confirms a waiting receipt and persists the settled payment state.
pub fn api_confirm_payment(
    store: &dyn RecordStore,
    record: &FulfillmentRecord,
) -> Result<FulfillmentRecord, CoreError> {
    let updated = TransitionService::confirm_payment(record)?;
    let patch = RecordPatch {
        payment_status: Some(updated.payment_state),
        ..Default::default()
    };
    store.update_record(updated.kind, &updated.id, &patch)?;
    Ok(updated)
}

pub fn api_build_info() -> BuildMetadata {
    build_info::current()
}

fn persist_status_and_notify(
    store: &dyn RecordStore,
    notifier: &dyn NotificationSender,
    updated: &FulfillmentRecord,
    customer_email: &str,
) -> Result<(), CoreError> {
    let patch = RecordPatch {
        status: Some(updated.status.clone()),
        ..Default::default()
    };
    store.update_record(updated.kind, &updated.id, &patch)?;

    let notification = StatusNotification {
        display_number: updated.display_number.clone(),
        customer_email: customer_email.to_string(),
        new_status: updated.status.clone(),
    };
    // the status change is already persisted; a failed mail must not undo it
    if let Err(err) = notifier.send_status_update(&notification) {
        warn!(record = %updated.display_label(), "status notification failed: {err}");
    }
    Ok(())
}
