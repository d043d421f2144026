//! Unified fulfillment records shared by the storefront and the back office.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::Deserializer, Deserialize, Serialize};

use crate::money::{self, Amount};
use crate::stage::RawStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Distinguishes catalog checkouts from admin-quoted requests.
pub enum RecordKind {
    Order,
    Request,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Order => "order",
            RecordKind::Request => "request",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Flavor of a request record.
pub enum RequestType {
    Booking,
    SpecialOrder,
    Customized,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestType::Booking => "Booking",
            RequestType::SpecialOrder => "Special Order",
            RequestType::Customized => "Customized",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Delivery,
    Pickup,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeliveryMethod::Delivery => "delivery",
            DeliveryMethod::Pickup => "pickup",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// How the customer intends to settle. Legacy rows may carry nothing here.
pub enum PaymentMethod {
    Cod,
    Gcash,
    #[default]
    Unset,
}

impl PaymentMethod {
    fn from_value(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(raw) if raw.eq_ignore_ascii_case("cod") => PaymentMethod::Cod,
            Some(raw) if raw.eq_ignore_ascii_case("gcash") => PaymentMethod::Gcash,
            _ => PaymentMethod::Unset,
        }
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(PaymentMethod::from_value(value))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
/// Payment sub-state driven by receipt submission and admin confirmation.
pub enum PaymentState {
    #[default]
    Unpaid,
    WaitingForConfirmation,
    Partial,
    Paid,
}

impl PaymentState {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentState::Unpaid => "unpaid",
            PaymentState::WaitingForConfirmation => "waiting_for_confirmation",
            PaymentState::Partial => "partial",
            PaymentState::Paid => "paid",
        }
    }

    fn from_value(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(raw) if raw.eq_ignore_ascii_case("paid") => PaymentState::Paid,
            Some(raw) if raw.eq_ignore_ascii_case("partial") => PaymentState::Partial,
            Some(raw) if raw.eq_ignore_ascii_case("waiting_for_confirmation") => {
                PaymentState::WaitingForConfirmation
            }
            _ => PaymentState::Unpaid,
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(PaymentState::from_value(value))
    }
}

/// One customer-facing transaction tracked through fulfillment, unified over
/// the two persisted kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentRecord {
    pub kind: RecordKind,
    pub id: String,
    pub display_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<RequestType>,
    /// Raw persisted status string; normalization happens downstream.
    pub status: String,
    pub delivery_method: DeliveryMethod,
    /// Zero until an admin quote exists for request records.
    #[serde(default)]
    pub total: Amount,
    #[serde(default)]
    pub amount_paid: Amount,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, rename = "paymentStatus")]
    pub payment_state: PaymentState,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_id: Option<String>,
}

impl FulfillmentRecord {
    pub fn new(
        kind: RecordKind,
        id: impl Into<String>,
        display_number: impl Into<String>,
        delivery_method: DeliveryMethod,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            display_number: display_number.into(),
            request_type: None,
            status: RawStatus::Pending.as_str().to_string(),
            delivery_method,
            total: Amount::ZERO,
            amount_paid: Amount::ZERO,
            payment_method: PaymentMethod::Unset,
            payment_state: PaymentState::Unpaid,
            created_at,
            linked_id: None,
        }
    }

    pub fn raw_status(&self) -> Option<RawStatus> {
        RawStatus::parse(&self.status)
    }

    pub fn set_status(&mut self, status: RawStatus) {
        self.status = status.as_str().to_string();
    }

    pub fn is_terminal(&self) -> bool {
        self.raw_status().is_some_and(RawStatus::is_terminal)
    }

    /// A quote exists once the total is known and non-zero.
    pub fn is_quoted(&self) -> bool {
        self.total > Amount::ZERO
    }

    pub fn balance_due(&self) -> Amount {
        money::balance_due(self.total, self.amount_paid)
    }

    pub fn is_fully_paid(&self) -> bool {
        money::is_fully_paid(self.total, self.amount_paid)
    }

    pub fn display_label(&self) -> String {
        format!("{}:{} [{}]", self.kind, self.display_number, self.status)
    }
}

/// Single-row update shipped to the persistence collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_ref: Option<String>,
}

/// Payload handed to the notification collaborator after a status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusNotification {
    pub display_number: String,
    pub customer_email: String,
    pub new_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> FulfillmentRecord {
        FulfillmentRecord::new(
            RecordKind::Order,
            "ord-1",
            "ORD-0001",
            DeliveryMethod::Delivery,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_records_start_pending_and_unpaid() {
        let record = sample_record();
        assert_eq!(record.raw_status(), Some(RawStatus::Pending));
        assert_eq!(record.amount_paid, Amount::ZERO);
        assert_eq!(record.payment_state, PaymentState::Unpaid);
        assert!(!record.is_quoted());
    }

    #[test]
    fn wire_form_uses_camel_case_and_payment_status() {
        let mut record = sample_record();
        record.total = Amount::from_centavos(200_000);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["displayNumber"], "ORD-0001");
        assert_eq!(json["paymentStatus"], "unpaid");
        assert_eq!(json["deliveryMethod"], "delivery");
        assert_eq!(json["total"], 2000.0);
        assert!(json.get("linkedId").is_none());
    }

    #[test]
    fn unknown_payment_state_reads_as_unpaid() {
        let json = r#"{
            "kind": "order",
            "id": "ord-9",
            "displayNumber": "ORD-0009",
            "status": "pending",
            "deliveryMethod": "pickup",
            "total": 100.0,
            "amountPaid": 0,
            "paymentStatus": "definitely_not_a_state",
            "createdAt": "2024-03-01T09:00:00Z"
        }"#;
        let record: FulfillmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.payment_state, PaymentState::Unpaid);
        assert_eq!(record.payment_method, PaymentMethod::Unset);
    }

    #[test]
    fn null_payment_method_reads_as_unset() {
        let json = r#"{
            "kind": "request",
            "id": "req-2",
            "displayNumber": "REQ-0002",
            "requestType": "customized",
            "status": "pending",
            "deliveryMethod": "delivery",
            "paymentMethod": null,
            "createdAt": "2024-03-01T09:00:00Z"
        }"#;
        let record: FulfillmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.payment_method, PaymentMethod::Unset);
        assert_eq!(record.request_type, Some(RequestType::Customized));
        assert_eq!(record.total, Amount::ZERO);
    }
}
