//! Scan event broadcaster for UI layers.
//!
//! The confirmation flow and the import path report what happened here;
//! any number of listeners can subscribe. Sending with no listeners is fine.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::record::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanEventKind {
    /// A candidate is on screen waiting for save or discard.
    CandidatePresented { code_type: String },
    Saved { id: RecordId, code_type: String },
    Discarded,
    /// A save was attempted but the store rejected it.
    SaveFailed { message: String },
    Imported { inserted: usize, total: usize },
    Cleared { removed: usize },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    #[serde(flatten)]
    pub kind: ScanEventKind,
    pub timestamp: DateTime<Utc>,
}

impl ScanEvent {
    pub fn new(kind: ScanEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone)]
pub struct ScanEventBroadcaster {
    sender: broadcast::Sender<ScanEvent>,
}

impl ScanEventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn send(&self, kind: ScanEventKind) {
        // No active receivers is fine.
        let _ = self.sender.send(ScanEvent::new(kind));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }
}

impl Default for ScanEventBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_without_receivers() {
        let broadcaster = ScanEventBroadcaster::default();
        broadcaster.send(ScanEventKind::Discarded);
    }

    #[test]
    fn test_subscriber_receives_events() {
        let broadcaster = ScanEventBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        broadcaster.send(ScanEventKind::Saved {
            id: 3,
            code_type: "QR_CODE".to_string(),
        });

        let event = rx.try_recv().unwrap();
        assert_eq!(
            event.kind,
            ScanEventKind::Saved {
                id: 3,
                code_type: "QR_CODE".to_string()
            }
        );
    }

    #[test]
    fn test_event_serialization() {
        let event = ScanEvent::new(ScanEventKind::Imported {
            inserted: 2,
            total: 3,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "imported");
        assert_eq!(json["inserted"], 2);
        assert_eq!(json["total"], 3);
        assert!(json.get("timestamp").is_some());
    }
}
