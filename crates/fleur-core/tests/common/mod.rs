#![allow(dead_code)]

use std::sync::Mutex;

use fleur_core::{CoreError, NotificationSender, ReceiptStorage, RecordStore};
use fleur_domain::record::{RecordKind, RecordPatch, StatusNotification};
use fleur_domain::rows::{OrderRow, RequestRow};

/// In-memory stand-in for the hosted record store. Every patch is kept so
/// tests can assert on exactly what would have been persisted.
#[derive(Default)]
pub struct MemoryStore {
    pub orders: Mutex<Vec<OrderRow>>,
    pub requests: Mutex<Vec<RequestRow>>,
    pub patches: Mutex<Vec<(RecordKind, String, RecordPatch)>>,
}

impl MemoryStore {
    pub fn seeded(orders: Vec<OrderRow>, requests: Vec<RequestRow>) -> Self {
        Self {
            orders: Mutex::new(orders),
            requests: Mutex::new(requests),
            patches: Mutex::new(Vec::new()),
        }
    }
}

impl RecordStore for MemoryStore {
    fn fetch_orders(&self, _user_id: &str) -> Result<Vec<OrderRow>, CoreError> {
        Ok(self.orders.lock().expect("lock orders").clone())
    }

    fn fetch_requests(&self, _user_id: &str) -> Result<Vec<RequestRow>, CoreError> {
        Ok(self.requests.lock().expect("lock requests").clone())
    }

    fn update_record(
        &self,
        kind: RecordKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<(), CoreError> {
        self.patches
            .lock()
            .expect("lock patches")
            .push((kind, id.to_string(), patch.clone()));
        Ok(())
    }
}

/// Receipt storage that mints deterministic URLs.
pub struct MemoryReceipts;

impl ReceiptStorage for MemoryReceipts {
    fn store_receipt(&self, file_name: &str, _bytes: &[u8]) -> Result<String, CoreError> {
        Ok(format!("https://receipts.test/{file_name}"))
    }
}

/// Notification sender that records payloads, or fails on demand.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<StatusNotification>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl NotificationSender for RecordingNotifier {
    fn send_status_update(&self, notification: &StatusNotification) -> Result<(), CoreError> {
        if self.fail {
            return Err(CoreError::Notification("smtp unavailable".to_string()));
        }
        self.sent
            .lock()
            .expect("lock notifications")
            .push(notification.clone());
        Ok(())
    }
}
