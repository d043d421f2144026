//! Persisted row shapes as fetched from the hosted store.
//!
//! Column names follow the store's snake_case schema; conversion into
//! [`FulfillmentRecord`] normalizes the per-kind field variants
//! (`order_number` vs `request_number`, `total_price` vs `final_price`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;
use crate::record::{
    DeliveryMethod, FulfillmentRecord, PaymentMethod, PaymentState, RecordKind, RequestType,
};

/// A catalog checkout row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: String,
    pub order_number: String,
    pub status: String,
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub total_price: Amount,
    #[serde(default)]
    pub amount_paid: Amount,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentState,
    pub created_at: DateTime<Utc>,
    /// Populated when this order was spawned from an accepted request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// A booking / special-order / customized-bouquet request row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRow {
    pub id: String,
    pub request_number: String,
    pub request_type: RequestType,
    pub status: String,
    pub delivery_method: DeliveryMethod,
    /// Absent until an admin quotes the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_price: Option<Amount>,
    #[serde(default)]
    pub amount_paid: Amount,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentState,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for FulfillmentRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            kind: RecordKind::Order,
            id: row.id,
            display_number: row.order_number,
            request_type: None,
            status: row.status,
            delivery_method: row.delivery_method,
            total: row.total_price,
            amount_paid: row.amount_paid,
            payment_method: row.payment_method,
            payment_state: row.payment_status,
            created_at: row.created_at,
            linked_id: row.request_id,
        }
    }
}

impl From<RequestRow> for FulfillmentRecord {
    fn from(row: RequestRow) -> Self {
        Self {
            kind: RecordKind::Request,
            id: row.id,
            display_number: row.request_number,
            request_type: Some(row.request_type),
            status: row.status,
            delivery_method: row.delivery_method,
            total: row.final_price.unwrap_or(Amount::ZERO),
            amount_paid: row.amount_paid,
            payment_method: row.payment_method,
            payment_state: row.payment_status,
            created_at: row.created_at,
            linked_id: None,
        }
    }
}
