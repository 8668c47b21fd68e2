//! Bridge event types and the typed event channel.
//!
//! Contains the [`BridgeEvent`] enum with all event variants the backend
//! pushes to the client, the raw stats payload they carry, and the channel
//! pair the controller subscribes to once at startup.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Raw transfer statistics as pushed by the backend.
///
/// Field names match the bridge's camelCase wire encoding. Optional fields
/// are genuinely optional on the wire: early events may omit speed and ETA
/// while the backend is still measuring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransferStats {
    /// Total number of files in the transfer.
    #[serde(default)]
    pub total_files: u64,
    /// Files fully transferred so far.
    #[serde(default)]
    pub completed_files: u64,
    /// Total payload size in bytes.
    #[serde(default)]
    pub total_bytes: u64,
    /// Bytes transferred so far.
    #[serde(default)]
    pub transferred_bytes: u64,
    /// Current transfer speed in MB/s, once the backend has a measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_speed: Option<f64>,
    /// Preformatted remaining-time estimate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    /// File currently being transferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,
    /// Overall progress, 0–100. May overshoot or undershoot; the projector clamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    /// Backend-side status line for this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Typed events pushed from the backend over the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BridgeEvent {
    /// Free-form status line for the active page.
    StatusUpdated { status: String },
    /// The backend finished whatever it was doing.
    OperationCompleted,
    /// A fresh transfer-stats snapshot.
    StatsUpdated { stats: RawTransferStats },
}

impl BridgeEvent {
    /// Parse an event from its bridge JSON payload.
    ///
    /// The bridge glue calls this for every pushed payload before handing
    /// the event to the publisher.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Sending half of the bridge event channel, held by the bridge glue.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::UnboundedSender<BridgeEvent>,
}

impl EventPublisher {
    /// Publish an event to the subscriber, if it is still listening.
    ///
    /// Events published after the subscription closed are dropped silently;
    /// the bridge keeps emitting regardless of client lifecycle.
    pub fn publish(&self, event: BridgeEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("bridge event dropped: subscription closed");
        }
    }
}

/// Receiving half of the bridge event channel, held by the shell's event loop.
///
/// Subscribe once at startup, [`close`](EventSubscription::close) on
/// shutdown. Events are delivered in the order the bridge emitted them.
#[derive(Debug)]
pub struct EventSubscription {
    rx: Option<mpsc::UnboundedReceiver<BridgeEvent>>,
}

impl EventSubscription {
    /// Wait for the next event. `None` once closed and drained.
    pub async fn recv(&mut self) -> Option<BridgeEvent> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// Non-blocking poll for an already-delivered event.
    pub fn try_recv(&mut self) -> Option<BridgeEvent> {
        self.rx.as_mut().and_then(|rx| rx.try_recv().ok())
    }

    /// Unsubscribe. Further publishes are dropped at the sender.
    pub fn close(&mut self) {
        if let Some(mut rx) = self.rx.take() {
            rx.close();
        }
    }
}

/// Create the bridge event channel pair.
pub fn event_channel() -> (EventPublisher, EventSubscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventPublisher { tx }, EventSubscription { rx: Some(rx) })
}
