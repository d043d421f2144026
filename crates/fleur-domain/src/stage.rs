//! Canonical fulfillment stages and the persisted status vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::DeliveryMethod;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Every status string the hosted store is known to persist.
pub enum RawStatus {
    Pending,
    Accepted,
    Processing,
    ReadyForPickup,
    ReadyForDelivery,
    ToReceive,
    OutForDelivery,
    Completed,
    Claimed,
    Declined,
    Cancelled,
}

impl RawStatus {
    /// Case-insensitive, whitespace-tolerant parse. Returns `None` for
    /// anything outside the known vocabulary.
    pub fn parse(raw: &str) -> Option<RawStatus> {
        let status = match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => RawStatus::Pending,
            "accepted" => RawStatus::Accepted,
            "processing" => RawStatus::Processing,
            "ready_for_pickup" => RawStatus::ReadyForPickup,
            "ready_for_delivery" => RawStatus::ReadyForDelivery,
            "to_receive" => RawStatus::ToReceive,
            "out_for_delivery" => RawStatus::OutForDelivery,
            "completed" => RawStatus::Completed,
            "claimed" => RawStatus::Claimed,
            "declined" => RawStatus::Declined,
            "cancelled" => RawStatus::Cancelled,
            _ => return None,
        };
        Some(status)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RawStatus::Pending => "pending",
            RawStatus::Accepted => "accepted",
            RawStatus::Processing => "processing",
            RawStatus::ReadyForPickup => "ready_for_pickup",
            RawStatus::ReadyForDelivery => "ready_for_delivery",
            RawStatus::ToReceive => "to_receive",
            RawStatus::OutForDelivery => "out_for_delivery",
            RawStatus::Completed => "completed",
            RawStatus::Claimed => "claimed",
            RawStatus::Declined => "declined",
            RawStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses accept no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RawStatus::Completed | RawStatus::Claimed | RawStatus::Declined | RawStatus::Cancelled
        )
    }

    /// Terminal failure, as opposed to terminal success.
    pub fn is_failure(self) -> bool {
        matches!(self, RawStatus::Declined | RawStatus::Cancelled)
    }
}

impl fmt::Display for RawStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Normalized position in a progress track, independent of raw status
/// spellings.
pub enum Stage {
    Submitted,
    Payment,
    Processing,
    ReadyForDelivery,
    OutForDelivery,
    ReadyForPickup,
    Completed,
}

impl Stage {
    pub fn key(self) -> &'static str {
        match self {
            Stage::Submitted => "submitted",
            Stage::Payment => "payment",
            Stage::Processing => "processing",
            Stage::ReadyForDelivery => "ready_for_delivery",
            Stage::OutForDelivery => "out_for_delivery",
            Stage::ReadyForPickup => "ready_for_pickup",
            Stage::Completed => "completed",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Submitted => "Submitted",
            Stage::Payment => "Payment",
            Stage::Processing => "Processing",
            Stage::ReadyForDelivery => "Ready for Delivery",
            Stage::OutForDelivery => "Out for Delivery",
            Stage::ReadyForPickup => "Ready for Pickup",
            Stage::Completed => "Completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub const DELIVERY_TRACK: [Stage; 6] = [
    Stage::Submitted,
    Stage::Payment,
    Stage::Processing,
    Stage::ReadyForDelivery,
    Stage::OutForDelivery,
    Stage::Completed,
];

pub const PICKUP_TRACK: [Stage; 5] = [
    Stage::Submitted,
    Stage::Payment,
    Stage::Processing,
    Stage::ReadyForPickup,
    Stage::Completed,
];

/// The ordered progress track for a record's delivery method.
pub fn track_for(method: DeliveryMethod) -> &'static [Stage] {
    match method {
        DeliveryMethod::Delivery => &DELIVERY_TRACK,
        DeliveryMethod::Pickup => &PICKUP_TRACK,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where a record sits after normalization: on its track, or closed out by a
/// decline/cancellation.
pub enum StagePosition {
    OnTrack(Stage),
    Failed,
}

impl StagePosition {
    pub fn stage(self) -> Option<Stage> {
        match self {
            StagePosition::OnTrack(stage) => Some(stage),
            StagePosition::Failed => None,
        }
    }

    pub fn is_failed(self) -> bool {
        matches!(self, StagePosition::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_total() {
        assert_eq!(RawStatus::parse("Pending"), Some(RawStatus::Pending));
        assert_eq!(RawStatus::parse("  to_receive "), Some(RawStatus::ToReceive));
        assert_eq!(RawStatus::parse("shipped"), None);
        assert_eq!(RawStatus::parse(""), None);
    }

    #[test]
    fn terminal_and_failure_classification() {
        assert!(RawStatus::Completed.is_terminal());
        assert!(RawStatus::Claimed.is_terminal());
        assert!(RawStatus::Cancelled.is_terminal());
        assert!(!RawStatus::OutForDelivery.is_terminal());
        assert!(RawStatus::Declined.is_failure());
        assert!(!RawStatus::Completed.is_failure());
    }

    #[test]
    fn tracks_share_a_prefix_and_end_completed() {
        assert_eq!(&DELIVERY_TRACK[..3], &PICKUP_TRACK[..3]);
        assert_eq!(DELIVERY_TRACK.last(), Some(&Stage::Completed));
        assert_eq!(PICKUP_TRACK.last(), Some(&Stage::Completed));
        assert_eq!(track_for(DeliveryMethod::Pickup).len(), 5);
        assert_eq!(track_for(DeliveryMethod::Delivery).len(), 6);
    }
}
