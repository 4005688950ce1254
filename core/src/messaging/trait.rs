//! Publisher trait defining the interface to the pub/sub collaborator.

use thiserror::Error;

use crate::domain::entities::MessagePayload;

/// Errors reported by a publisher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("No subscribers on topic {topic}")]
    NoSubscribers { topic: String },

    #[error("Publish failed: {message}")]
    Failed { message: String },
}

/// Fire-and-forget publisher
///
/// Implementations must return promptly and never block the caller; anything
/// slow belongs behind a queue owned by the implementation.
pub trait EventPublisher: Send + Sync {
    /// Publish a message on a topic
    ///
    /// # Arguments
    /// * `topic` - Topic (channel) name
    /// * `payload` - Message to publish
    fn publish(&self, topic: &str, payload: &MessagePayload) -> Result<(), PublishError>;
}
