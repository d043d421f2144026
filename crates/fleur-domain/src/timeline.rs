//! Timeline step types produced for the tracking pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Amount;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Pending,
}

impl StepState {
    pub fn is_completed(self) -> bool {
        matches!(self, StepState::Completed)
    }

    pub fn is_current(self) -> bool {
        matches!(self, StepState::Current)
    }

    pub fn is_pending(self) -> bool {
        matches!(self, StepState::Pending)
    }
}

/// Supplementary fact attached to a single step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepNote {
    PartialPayment { balance: Amount },
    RiderAssigned { name: String, phone: String },
}

/// One rendered entry of the progress timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineStep {
    pub key: String,
    pub title: String,
    pub state: StepState,
    /// Heuristic placeholder, not a real ETA; absent for pending steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<StepNote>,
}

impl TimelineStep {
    pub fn is_current(&self) -> bool {
        self.state.is_current()
    }
}

/// Rider fact supplied by the back office once a delivery is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RiderAssignment {
    pub name: String,
    pub phone: String,
}
