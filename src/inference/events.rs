//! Progress notifications for observers of the orchestrator.

use std::sync::mpsc;

use serde::Serialize;

use super::InferenceRequest;

/// Message carried by every [`OrchestratorEvent::InferenceRequestStarted`].
pub const INFERENCE_START_MESSAGE: &str = "inference_start";

/// Events broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrchestratorEvent {
    /// An inference request was handed to the backend.
    InferenceRequestStarted {
        /// Human-readable progress message.
        message: String,
        /// The request that was sent.
        request: InferenceRequest,
    },
}

impl OrchestratorEvent {
    pub(crate) fn inference_started(request: InferenceRequest) -> Self {
        Self::InferenceRequestStarted {
            message: INFERENCE_START_MESSAGE.to_owned(),
            request,
        }
    }
}

/// Fan-out of [`OrchestratorEvent`]s to any number of channel receivers.
///
/// Subscribers whose receiver has been dropped are pruned on the next
/// publish.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::Sender<OrchestratorEvent>>,
}

impl EventBus {
    /// Bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn subscribe(&mut self) -> mpsc::Receiver<OrchestratorEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber. No-op without subscribers.
    pub fn publish(&mut self, event: &OrchestratorEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> OrchestratorEvent {
        OrchestratorEvent::inference_started(InferenceRequest {
            id: 500,
            param: 75.0,
        })
    }

    #[test]
    fn every_subscriber_receives_the_event() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(&started());
        assert_eq!(a.try_recv().unwrap(), started());
        assert_eq!(b.try_recv().unwrap(), started());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());
        bus.publish(&started());
        assert_eq!(bus.subscriber_count(), 1);
        assert!(keep.try_recv().is_ok());
    }

    #[test]
    fn event_serializes_with_message() {
        let json = serde_json::to_value(started()).unwrap();
        assert_eq!(json["event"], "inference_request_started");
        assert_eq!(json["message"], "inference_start");
        assert_eq!(json["request"]["id"], 500);
    }
}
