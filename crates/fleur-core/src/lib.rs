//! fleur-core
//!
//! Business logic and services for the FLEUR fulfillment tracker.
//! Depends on fleur-domain. No UI, no terminal I/O, no direct storage
//! interactions; persistence, receipt storage and mail live behind the
//! collaborator traits in [`store`].

pub mod build_info;
pub mod error;
pub mod payment_service;
pub mod public_api;
pub mod stage_service;
pub mod store;
pub mod timeline_service;
pub mod transition_service;
pub mod unify_service;

pub use error::CoreError;
pub use payment_service::PaymentService;
pub use public_api::*;
pub use stage_service::StageService;
pub use store::{record_warnings, NotificationSender, ReceiptStorage, RecordStore};
pub use timeline_service::TimelineService;
pub use transition_service::{Actor, TransitionService};
pub use unify_service::UnifyService;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fleur_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
