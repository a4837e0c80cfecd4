use tokio::sync::broadcast;

pub const ALERTS_UPDATED: &str = "alertsUpdated";
pub const ALERT_NOTIFICATION: &str = "alertNotification";

/// Process-wide event, relayed to `/events` subscribers as a named SSE event.
#[derive(Debug, Clone)]
pub struct BusEvent {
    pub name: &'static str,
    pub data: String,
}

pub type EventBus = broadcast::Sender<BusEvent>;

pub fn channel() -> EventBus {
    let (tx, _rx) = broadcast::channel(64);
    tx
}

/// Fire-and-forget: a bus with no subscribers is not an error here.
pub fn publish_alerts_updated(bus: &EventBus) {
    let _ = bus.send(BusEvent {
        name: ALERTS_UPDATED,
        data: chrono::Utc::now().timestamp().to_string(),
    });
}
