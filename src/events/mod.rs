use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod loggable;
pub use loggable::{Loggable, Severity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent<T> {
    pub id: Uuid,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
    pub actor_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub payload: T,
}

impl<T> DomainEvent<T> {
    pub fn new(name: impl Into<String>, actor_id: Option<i64>, subject_id: Option<i64>, payload: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            occurred_at: Utc::now(),
            actor_id,
            subject_id,
            payload,
        }
    }
}

pub type EventBus = broadcast::Sender<Value>;

pub fn init_event_bus(capacity: usize) -> (EventBus, broadcast::Receiver<Value>) {
    broadcast::channel(capacity.max(1))
}

/// Structured activity payload carried by every event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPayload {
    #[serde(rename = "new")]
    pub current: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    pub severity: Severity,
}

/// Publishes `<entity>.<action>` for `entity` on the bus.
pub fn log_activity<T: Loggable>(event_bus: &EventBus, action: &str, actor_id: Option<i64>, entity: &T) {
    log_activity_with_old(event_bus, action, actor_id, entity, None);
}

/// Same as [`log_activity`] but also records the state before the change.
pub fn log_activity_with_old<T: Loggable>(
    event_bus: &EventBus,
    action: &str,
    actor_id: Option<i64>,
    entity: &T,
    old_entity: Option<&T>,
) {
    let name = format!("{}.{}", T::entity_type(), action);

    let payload = ActivityPayload {
        current: serde_json::to_value(entity).unwrap_or_default(),
        old: old_entity.map(|e| serde_json::to_value(e).unwrap_or_default()),
        severity: entity.severity_for_action(action),
    };

    let event = DomainEvent::new(
        name,
        actor_id,
        Some(entity.subject_id()),
        serde_json::to_value(&payload).unwrap_or_default(),
    );

    // Fire and forget: no receivers is not an error for the caller.
    let _ = event_bus.send(serde_json::to_value(event).unwrap_or_default());
}

/// Drains the bus and writes each event to the tracing log until every
/// sender is dropped. Returns how many events were logged.
pub async fn start_activity_listener(mut rx: broadcast::Receiver<Value>) -> u64 {
    tracing::info!("Activity listener started");
    let mut logged = 0;
    loop {
        let event = match rx.recv().await {
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "activity listener lagged");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let name = event.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
        let actor_id = event.get("actor_id").and_then(|v| v.as_i64());
        let subject_id = event.get("subject_id").and_then(|v| v.as_i64());
        let severity: Severity = event
            .pointer("/payload/severity")
            .and_then(|s| Severity::deserialize(s).ok())
            .unwrap_or_default();

        match severity {
            Severity::Critical => {
                tracing::warn!(event = name, ?actor_id, ?subject_id, severity = severity.as_str(), "activity")
            }
            Severity::Important => {
                tracing::info!(event = name, ?actor_id, ?subject_id, severity = severity.as_str(), "activity")
            }
            Severity::Noise => {
                tracing::debug!(event = name, ?actor_id, ?subject_id, severity = severity.as_str(), "activity")
            }
        }
        logged += 1;
    }
    tracing::info!(logged, "Activity listener stopped");
    logged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Widget {
        id: i64,
    }

    impl Loggable for Widget {
        fn entity_type() -> &'static str { "widget" }
        fn subject_id(&self) -> i64 { self.id }
    }

    #[tokio::test]
    async fn log_activity_publishes_named_event() {
        let (bus, mut rx) = init_event_bus(8);
        log_activity_with_old(&bus, "deleted", Some(7), &Widget { id: 3 }, Some(&Widget { id: 3 }));

        let event = rx.recv().await.unwrap();
        assert_eq!(event["name"], "widget.deleted");
        assert_eq!(event["actor_id"], 7);
        assert_eq!(event["subject_id"], 3);
        assert_eq!(event["payload"]["severity"], "critical");
        assert_eq!(event["payload"]["old"]["id"], 3);
    }

    #[tokio::test]
    async fn listener_survives_lag_and_stops_when_bus_closes() {
        let (bus, rx) = init_event_bus(2);
        for id in 1..=5 {
            log_activity(&bus, "created", None, &Widget { id });
        }
        drop(bus);

        // Capacity 2: the first three are overwritten before the listener runs.
        let logged = tokio::spawn(start_activity_listener(rx)).await.unwrap();
        assert_eq!(logged, 2);
    }

    #[test]
    fn sending_without_receivers_is_silent() {
        let (bus, rx) = init_event_bus(1);
        drop(rx);
        log_activity(&bus, "created", None, &Widget { id: 1 });
    }
}
