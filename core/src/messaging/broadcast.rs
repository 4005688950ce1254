//! In-process publisher backed by a tokio broadcast channel

use tokio::sync::broadcast;

use crate::domain::entities::MessagePayload;

use super::{EventPublisher, PublishError};

/// Message as delivered to subscribers
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    pub topic: String,
    pub payload: MessagePayload,
}

/// Fans events out to every live subscriber. `send` never waits; slow
/// subscribers lag and lose the oldest messages.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<AuthEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventPublisher for BroadcastEventPublisher {
    fn publish(&self, topic: &str, payload: &MessagePayload) -> Result<(), PublishError> {
        let event = AuthEvent {
            topic: topic.to_string(),
            payload: payload.clone(),
        };
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|_| PublishError::NoSubscribers {
                topic: topic.to_string(),
            })
    }
}
