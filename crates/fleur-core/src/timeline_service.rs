//! Derives the ordered progress timeline shown on tracking pages.

use chrono::Duration;

use fleur_domain::money::Amount;
use fleur_domain::record::FulfillmentRecord;
use fleur_domain::stage::{track_for, RawStatus, Stage, StagePosition};
use fleur_domain::timeline::{RiderAssignment, StepNote, StepState, TimelineStep};

use crate::stage_service::StageService;

/// Placeholder spacing between step estimates; the storefront has always
/// shown this cadence and downstream consumers assert on it.
const STEP_SPACING_HOURS: i64 = 6;

pub struct TimelineService;

impl TimelineService {
    /// Produces the full step list for a record.
    ///
    /// Steps before the current stage are completed, the current stage is
    /// current, later steps are pending with no estimate. A declined or
    /// cancelled record collapses into a single closing step.
    pub fn derive(
        record: &FulfillmentRecord,
        rider: Option<&RiderAssignment>,
    ) -> Vec<TimelineStep> {
        match StageService::normalize(record) {
            StagePosition::Failed => vec![Self::closing_step(record)],
            StagePosition::OnTrack(stage) => {
                let track = track_for(record.delivery_method);
                let current = StageService::index_on_track(stage, record.delivery_method);
                track
                    .iter()
                    .enumerate()
                    .map(|(index, step)| Self::track_step(record, rider, *step, index, current))
                    .collect()
            }
        }
    }

    fn track_step(
        record: &FulfillmentRecord,
        rider: Option<&RiderAssignment>,
        stage: Stage,
        index: usize,
        current: usize,
    ) -> TimelineStep {
        let state = if index < current {
            StepState::Completed
        } else if index == current {
            StepState::Current
        } else {
            StepState::Pending
        };
        let estimated_at = match state {
            StepState::Pending => None,
            _ => Some(record.created_at + Duration::hours(STEP_SPACING_HOURS * index as i64)),
        };
        TimelineStep {
            key: stage.key().to_string(),
            title: stage.title().to_string(),
            state,
            estimated_at,
            note: Self::note_for(stage, record, rider),
        }
    }

    fn note_for(
        stage: Stage,
        record: &FulfillmentRecord,
        rider: Option<&RiderAssignment>,
    ) -> Option<StepNote> {
        match stage {
            Stage::Payment => {
                let balance = record.balance_due();
                if balance > Amount::ZERO && record.amount_paid > Amount::ZERO {
                    Some(StepNote::PartialPayment { balance })
                } else {
                    None
                }
            }
            Stage::OutForDelivery => rider.map(|assignment| StepNote::RiderAssigned {
                name: assignment.name.clone(),
                phone: assignment.phone.clone(),
            }),
            _ => None,
        }
    }

    fn closing_step(record: &FulfillmentRecord) -> TimelineStep {
        let (key, title) = match record.raw_status() {
            Some(RawStatus::Declined) => ("declined", "Declined"),
            _ => ("cancelled", "Cancelled"),
        };
        TimelineStep {
            key: key.to_string(),
            title: title.to_string(),
            state: StepState::Current,
            estimated_at: Some(record.created_at),
            note: None,
        }
    }
}
