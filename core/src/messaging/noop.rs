//! No-op publisher for deployments without a message bus

use crate::domain::entities::MessagePayload;

use super::{EventPublisher, PublishError};

/// Publisher that drops every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventPublisher;

impl NoOpEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl EventPublisher for NoOpEventPublisher {
    fn publish(&self, _topic: &str, _payload: &MessagePayload) -> Result<(), PublishError> {
        Ok(())
    }
}

// Also implement for () to allow simple type defaults
impl EventPublisher for () {
    fn publish(&self, _topic: &str, _payload: &MessagePayload) -> Result<(), PublishError> {
        Ok(())
    }
}
