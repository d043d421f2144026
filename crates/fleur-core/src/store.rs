//! Seams for the external collaborators: the hosted record store, receipt
//! object storage, and the mail-sending notification function.

use fleur_domain::record::{FulfillmentRecord, RecordKind, RecordPatch, StatusNotification};
use fleur_domain::rows::{OrderRow, RequestRow};
use fleur_domain::stage::RawStatus;

use crate::error::CoreError;

/// Abstraction over the hosted store holding order and request rows.
/// Implementations are assumed transactional at the single-row level.
pub trait RecordStore: Send + Sync {
    fn fetch_orders(&self, user_id: &str) -> Result<Vec<OrderRow>, CoreError>;
    fn fetch_requests(&self, user_id: &str) -> Result<Vec<RequestRow>, CoreError>;
    fn update_record(
        &self,
        kind: RecordKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<(), CoreError>;
}

/// Durable storage for uploaded receipt images; returns an opaque reference.
pub trait ReceiptStorage: Send + Sync {
    fn store_receipt(&self, file_name: &str, bytes: &[u8]) -> Result<String, CoreError>;
}

/// Templated status mail, fire-and-forget from the core's perspective.
pub trait NotificationSender: Send + Sync {
    fn send_status_update(&self, notification: &StatusNotification) -> Result<(), CoreError>;
}

/// Detects data-quality anomalies within a unified record collection for the
/// admin console.
pub fn record_warnings(records: &[FulfillmentRecord]) -> Vec<String> {
    let mut warnings = Vec::new();
    for record in records {
        if RawStatus::parse(&record.status).is_none() {
            warnings.push(format!(
                "{} {} carries unrecognized status `{}`",
                record.kind, record.display_number, record.status
            ));
        }
        if record.is_quoted() && record.amount_paid > record.total {
            warnings.push(format!(
                "{} {} is paid over its total ({} against {})",
                record.kind, record.display_number, record.amount_paid, record.total
            ));
        }
        if record.kind == RecordKind::Request && record.linked_id.is_some() {
            warnings.push(format!(
                "request {} carries an order link, links belong on orders",
                record.display_number
            ));
        }
        if record.kind == RecordKind::Order && record.request_type.is_some() {
            warnings.push(format!(
                "order {} carries a request type",
                record.display_number
            ));
        }
    }
    warnings
}
