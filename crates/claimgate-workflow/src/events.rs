//! Lifecycle event publication.
//!
//! The engine announces state transitions through an [`EventSink`]. Delivery
//! is fire-and-forget: a sink failure is logged and never rolls back the
//! state transition that produced it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::clock::Clock;
use crate::error::Result;

/// Event emitted when an approval request was created.
pub const REQUEST_CREATED: &str = "request.created";
/// Event emitted when an approval request was approved.
pub const REQUEST_APPROVED: &str = "request.approved";
/// Event emitted when an approval request was rejected.
pub const REQUEST_REJECTED: &str = "request.rejected";
/// Event emitted when an approval request was escalated.
pub const REQUEST_ESCALATED: &str = "request.escalated";
/// Event emitted when a document passed its approval gate.
pub const DOCUMENT_APPROVED: &str = "document.approved";
/// Event emitted when a document was rejected at its approval gate.
pub const DOCUMENT_REJECTED: &str = "document.rejected";

/// A lifecycle event published by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Dotted event name, e.g. `request.approved`.
    pub name: String,
    /// Event payload; shape varies per event name.
    pub payload: serde_json::Value,
    /// When the transition occurred.
    pub occurred_at: DateTime<Utc>,
}

/// Destination for lifecycle events.
#[async_trait::async_trait]
pub trait EventSink: Send + Sync {
    /// Publish one event. Failures must not affect engine state.
    async fn publish(&self, event: LifecycleEvent) -> Result<()>;
}

/// Publish without letting sink failures surface as operation failures.
pub(crate) async fn publish_best_effort(
    sink: &dyn EventSink,
    clock: &dyn Clock,
    name: &str,
    payload: serde_json::Value,
) {
    let event = LifecycleEvent {
        name: name.to_string(),
        payload,
        occurred_at: clock.now(),
    };
    if let Err(err) = sink.publish(event).await {
        tracing::warn!(event = name, error = %err, "lifecycle event publish failed");
    }
}

/// Sink that writes each event to the log and drops it. The default for
/// server processes with no downstream consumer wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

#[async_trait::async_trait]
impl EventSink for LogEventSink {
    async fn publish(&self, event: LifecycleEvent) -> Result<()> {
        tracing::info!(
            event = %event.name,
            payload = %event.payload,
            occurred_at = %event.occurred_at,
            "lifecycle event"
        );
        Ok(())
    }
}

/// In-memory sink that records published events, for tests.
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    events: Arc<RwLock<Vec<LifecycleEvent>>>,
}

impl InMemoryEventSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, oldest first.
    pub async fn events(&self) -> Vec<LifecycleEvent> {
        self.events.read().await.clone()
    }

    /// Count of published events.
    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Names of published events, oldest first.
    pub async fn names(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, event: LifecycleEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::error::WorkflowError;

    /// Sink that always fails, for verifying the best-effort contract.
    struct FailingSink;

    #[async_trait::async_trait]
    impl EventSink for FailingSink {
        async fn publish(&self, _event: LifecycleEvent) -> Result<()> {
            Err(WorkflowError::Store("sink unavailable".into()))
        }
    }

    #[tokio::test]
    async fn in_memory_sink_records_events() {
        let sink = InMemoryEventSink::new();
        publish_best_effort(
            &sink,
            &SystemClock,
            REQUEST_CREATED,
            serde_json::json!({"id": "x"}),
        )
        .await;

        assert_eq!(sink.count().await, 1);
        assert_eq!(sink.names().await, vec![REQUEST_CREATED.to_string()]);
    }

    #[tokio::test]
    async fn log_sink_accepts_events() {
        let result = LogEventSink
            .publish(LifecycleEvent {
                name: REQUEST_CREATED.to_string(),
                payload: serde_json::json!({"id": "x"}),
                occurred_at: SystemClock.now(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn publish_failure_is_swallowed() {
        // Returns normally despite the sink error.
        publish_best_effort(
            &FailingSink,
            &SystemClock,
            REQUEST_APPROVED,
            serde_json::Value::Null,
        )
        .await;
    }
}
