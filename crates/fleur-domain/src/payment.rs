//! Payment submission artifacts queued for admin review.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Amount;
use crate::record::FulfillmentRecord;

/// How a submission lands against the known total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PaymentOutcome {
    FullyPaid,
    Partial { balance: Amount },
    /// Accepted but flagged; never silently truncated.
    Overpaid { excess: Amount },
    /// The record has no admin quote yet, so coverage cannot be judged.
    AwaitingQuote,
}

impl PaymentOutcome {
    pub fn needs_review(&self) -> bool {
        matches!(self, PaymentOutcome::Overpaid { .. })
    }
}

/// Result of a validated receipt submission: the next record snapshot plus
/// the facts the caller needs for user-facing messaging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub id: Uuid,
    pub record: FulfillmentRecord,
    pub amount: Amount,
    pub receipt_ref: String,
    /// Balance against the total as quoted at submission time.
    pub balance_due: Amount,
    pub outcome: PaymentOutcome,
}
