//! Test doubles for the token service collaborators

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::domain::entities::MessagePayload;
use crate::messaging::{EventPublisher, PublishError};
use crate::services::token::Clock;

/// Records every published message
pub struct MockEventPublisher {
    events: Arc<Mutex<Vec<(String, MessagePayload)>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether publishing should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn get_all_events(&self) -> Vec<(String, MessagePayload)> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for MockEventPublisher {
    fn publish(&self, topic: &str, payload: &MessagePayload) -> Result<(), PublishError> {
        if *self.should_fail.lock().unwrap() {
            return Err(PublishError::Failed {
                message: "Mock publisher error".to_string(),
            });
        }
        self.events
            .lock()
            .unwrap()
            .push((topic.to_string(), payload.clone()));
        Ok(())
    }
}

/// Clock whose reading always fails
pub struct FailingClock;

impl Clock for FailingClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        None
    }
}
