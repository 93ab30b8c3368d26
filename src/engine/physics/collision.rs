use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Contact notification recorded during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Two colliders started touching
    Began {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Ended {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl ContactEvent {
    /// The pair of colliders involved
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            ContactEvent::Began {
                collider1,
                collider2,
            }
            | ContactEvent::Ended {
                collider1,
                collider2,
            } => (collider1, collider2),
        }
    }

    pub fn is_began(&self) -> bool {
        matches!(self, ContactEvent::Began { .. })
    }
}

/// Queue for storing contact events during a physics step
///
/// rapier hands events to a shared `&self` handler, hence the interior mutex.
pub struct ContactEventQueue {
    events: Arc<Mutex<Vec<ContactEvent>>>,
}

impl ContactEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all contact events from the last step
    pub fn events(&self) -> Vec<ContactEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: ContactEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for ContactEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ContactEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            CollisionEvent::Started(h1, h2, _flags) => {
                self.push(ContactEvent::Began {
                    collider1: h1,
                    collider2: h2,
                });
            }
            CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(ContactEvent::Ended {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_starts_empty_and_clears() {
        let queue = ContactEventQueue::new();
        assert!(queue.events().is_empty());

        let handle = ColliderHandle::from_raw_parts(0, 0);
        queue.push(ContactEvent::Began {
            collider1: handle,
            collider2: handle,
        });
        assert_eq!(queue.events().len(), 1);
        assert!(queue.events()[0].is_began());

        queue.clear();
        assert!(queue.events().is_empty());
    }

    #[test]
    fn test_event_colliders() {
        let a = ColliderHandle::from_raw_parts(1, 0);
        let b = ColliderHandle::from_raw_parts(2, 0);
        let event = ContactEvent::Ended {
            collider1: a,
            collider2: b,
        };
        assert_eq!(event.colliders(), (a, b));
        assert!(!event.is_began());
    }
}
