use std::sync::{Arc, Mutex, MutexGuard, Weak};
use crate::structs::session_expired_event::SessionExpiredEvent;

type Listener = Arc<dyn Fn(&SessionExpiredEvent) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Publish/subscribe channel between the HTTP gateway, which detects an
/// expired session, and whatever front-end needs to react to it.
#[derive(Clone, Default)]
pub struct SessionExpiryBroadcaster {
    registry: Arc<Mutex<ListenerRegistry>>,
}

impl SessionExpiryBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SessionExpiredEvent) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Arc::new(listener)));
        log::debug!("Session-expiry listener {} subscribed", id);

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Notifies every current listener and returns how many were called.
    ///
    /// The registry lock is released before dispatch, so listeners may
    /// subscribe, unsubscribe (themselves or others) or publish again. A
    /// listener removed by an earlier one during the same dispatch is skipped.
    pub fn publish(&self, event: &SessionExpiredEvent) -> usize {
        let snapshot: Vec<(u64, Listener)> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        log::warn!("🔒 Session expired on {} ({} listener(s))", event.operation(), snapshot.len());

        let mut notified = 0;
        for (id, listener) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            listener(event);
            notified += 1;
        }
        notified
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        lock(&self.registry).listeners.iter().any(|(existing, _)| *existing == id)
    }
}

fn lock(registry: &Mutex<ListenerRegistry>) -> MutexGuard<'_, ListenerRegistry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle returned by [`SessionExpiryBroadcaster::subscribe`].
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    /// Removes the listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = lock(&registry);
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        before != registry.listeners.len()
    }

    pub fn unsubscribe_on_drop(self) -> SubscriptionGuard {
        SubscriptionGuard { subscription: self }
    }
}

pub struct SubscriptionGuard {
    subscription: Subscription,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
