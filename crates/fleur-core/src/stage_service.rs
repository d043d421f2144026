//! Maps raw persisted statuses onto canonical progress stages.

use tracing::warn;

use fleur_domain::record::{DeliveryMethod, FulfillmentRecord, PaymentState};
use fleur_domain::stage::{track_for, RawStatus, Stage, StagePosition};

pub struct StageService;

impl StageService {
    /// Normalizes a record onto its canonical stage.
    ///
    /// Unrecognized statuses are a data-quality problem, not a failure: the
    /// record falls back to the first stage so tracking pages keep
    /// rendering, and a warning is emitted for the admin console.
    pub fn normalize(record: &FulfillmentRecord) -> StagePosition {
        let Some(status) = RawStatus::parse(&record.status) else {
            warn!(
                record = %record.display_label(),
                status = %record.status,
                "unrecognized status, defaulting to the submitted stage"
            );
            return StagePosition::OnTrack(Stage::Submitted);
        };

        let stage = match status {
            RawStatus::Pending => Stage::Payment,
            RawStatus::Accepted => {
                if record.payment_state == PaymentState::Paid {
                    Stage::Processing
                } else {
                    Stage::Payment
                }
            }
            RawStatus::Processing => Stage::Processing,
            RawStatus::ReadyForPickup => Stage::ReadyForPickup,
            RawStatus::ReadyForDelivery | RawStatus::ToReceive => Stage::ReadyForDelivery,
            RawStatus::OutForDelivery => Stage::OutForDelivery,
            RawStatus::Completed | RawStatus::Claimed => Stage::Completed,
            RawStatus::Declined | RawStatus::Cancelled => return StagePosition::Failed,
        };
        StagePosition::OnTrack(stage)
    }

    /// Index of a stage on the given track.
    ///
    /// A stage persisted against the wrong delivery method (say
    /// `ready_for_pickup` on a delivery order) gets the same treatment as an
    /// unknown status: warn and fall back to index 0.
    pub fn index_on_track(stage: Stage, method: DeliveryMethod) -> usize {
        track_for(method)
            .iter()
            .position(|candidate| *candidate == stage)
            .unwrap_or_else(|| {
                warn!(%stage, %method, "stage does not occur on this track, defaulting to index 0");
                0
            })
    }

    /// Track index for a record, `None` once declined/cancelled.
    pub fn stage_index(record: &FulfillmentRecord) -> Option<usize> {
        match Self::normalize(record) {
            StagePosition::Failed => None,
            StagePosition::OnTrack(stage) => {
                Some(Self::index_on_track(stage, record.delivery_method))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fleur_domain::record::RecordKind;

    fn record(status: &str, method: DeliveryMethod) -> FulfillmentRecord {
        let mut record = FulfillmentRecord::new(
            RecordKind::Order,
            "ord-1",
            "ORD-0001",
            method,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        );
        record.status = status.to_string();
        record
    }

    #[test]
    fn pending_normalizes_to_payment() {
        let position = StageService::normalize(&record("pending", DeliveryMethod::Delivery));
        assert_eq!(position, StagePosition::OnTrack(Stage::Payment));
    }

    #[test]
    fn accepted_splits_on_payment_state() {
        let mut accepted = record("accepted", DeliveryMethod::Pickup);
        assert_eq!(
            StageService::normalize(&accepted),
            StagePosition::OnTrack(Stage::Payment)
        );
        accepted.payment_state = PaymentState::Paid;
        assert_eq!(
            StageService::normalize(&accepted),
            StagePosition::OnTrack(Stage::Processing)
        );
    }

    #[test]
    fn to_receive_aliases_ready_for_delivery() {
        assert_eq!(
            StageService::normalize(&record("to_receive", DeliveryMethod::Delivery)),
            StagePosition::OnTrack(Stage::ReadyForDelivery)
        );
        assert_eq!(
            StageService::normalize(&record("ready_for_delivery", DeliveryMethod::Delivery)),
            StagePosition::OnTrack(Stage::ReadyForDelivery)
        );
    }

    #[test]
    fn claimed_and_completed_normalize_to_completed() {
        assert_eq!(
            StageService::normalize(&record("claimed", DeliveryMethod::Pickup)),
            StagePosition::OnTrack(Stage::Completed)
        );
        assert_eq!(
            StageService::normalize(&record("completed", DeliveryMethod::Delivery)),
            StagePosition::OnTrack(Stage::Completed)
        );
    }

    #[test]
    fn declined_and_cancelled_are_terminal_failures() {
        assert!(StageService::normalize(&record("declined", DeliveryMethod::Pickup)).is_failed());
        assert!(StageService::normalize(&record("cancelled", DeliveryMethod::Delivery)).is_failed());
        assert_eq!(
            StageService::stage_index(&record("cancelled", DeliveryMethod::Delivery)),
            None
        );
    }

    #[test]
    fn unknown_status_falls_back_to_stage_zero() {
        let position = StageService::normalize(&record("shipped??", DeliveryMethod::Delivery));
        assert_eq!(position, StagePosition::OnTrack(Stage::Submitted));
        assert_eq!(
            StageService::stage_index(&record("shipped??", DeliveryMethod::Delivery)),
            Some(0)
        );
    }

    #[test]
    fn wrong_track_stage_falls_back_to_index_zero() {
        assert_eq!(
            StageService::index_on_track(Stage::ReadyForPickup, DeliveryMethod::Delivery),
            0
        );
        assert_eq!(
            StageService::index_on_track(Stage::OutForDelivery, DeliveryMethod::Delivery),
            4
        );
    }
}
