//! StockBroadcaster - live fan-out to connected clients
//!
//! ```text
//! update_stock (after commit)          Live WS handler (client A)
//!       │ StockChanged                        │ OrderRelayed { origin: A }
//!       ▼                                     ▼
//! StockBroadcaster ── broadcast::Sender<LiveEvent> ──► every Live WS session
//!                                                      (skips its own relays)
//! ```
//!
//! Best-effort: no backlog for late joiners, no acknowledgement. A receiver
//! that falls more than `BROADCAST_CAPACITY` events behind is told to resync.

use serde_json::Value;
use shared::live::StockChange;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Internal hub events
#[derive(Debug, Clone)]
pub enum LiveEvent {
    StockChanged(StockChange),
    /// Order announced by a client, forwarded to everybody else
    OrderRelayed { origin: Uuid, payload: Value },
}

/// Broadcast channel capacity, enough to absorb bursts
const BROADCAST_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct StockBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl Default for StockBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl StockBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Publish a committed stock change. Returns how many subscribers got it.
    pub fn publish_stock(&self, change: StockChange) -> usize {
        // No subscribers is not an error
        self.tx.send(LiveEvent::StockChanged(change)).unwrap_or(0)
    }

    /// Forward a client's order announcement to all other sessions
    pub fn relay_order(&self, origin: Uuid, payload: Value) -> usize {
        self.tx
            .send(LiveEvent::OrderRelayed { origin, payload })
            .unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
