// src/events/publisher.rs
//
// State snapshot fan-out.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - listeners execute immediately in subscription order
// 2. Isolated - a panicking listener never breaks the others
// 3. Observable - every publish is logged
// 4. No magic - explicit, straightforward code

use std::sync::{Arc, RwLock};

use log::{debug, error};
use uuid::Uuid;

/// Token returned by [`SnapshotPublisher::subscribe`]; pass it back to
/// `unsubscribe` on teardown so discarded consumers stop receiving
/// callbacks.
pub type SubscriptionId = Uuid;

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A registry of listeners notified with the latest state snapshot on
/// every publish.
///
/// Key characteristics:
/// - Synchronous execution (listeners run on the publisher's call)
/// - Listeners execute in subscription order
/// - Panics in one listener are caught and logged, the rest still run
pub struct SnapshotPublisher<T> {
    listeners: Arc<RwLock<Vec<(SubscriptionId, Listener<T>)>>>,
}

impl<T> SnapshotPublisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a listener; returns the token needed to unsubscribe
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        let mut listeners = self.listeners.write().unwrap();
        listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; unknown tokens are ignored
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut listeners = self.listeners.write().unwrap();
        listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Deliver a snapshot to every listener, in subscription order
    pub fn publish(&self, snapshot: &T) {
        let listeners = self.listeners.read().unwrap();
        debug!("Publishing snapshot to {} listeners", listeners.len());

        for (id, listener) in listeners.iter() {
            // Catch panics to prevent one listener from breaking others
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener(snapshot);
            }));

            if result.is_err() {
                error!("Listener {} panicked during publish", id);
            }
        }
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.read().unwrap().len()
    }
}

impl<T> Default for SnapshotPublisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Make the publisher cloneable (shared reference)
impl<T> Clone for SnapshotPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_and_publish() {
        let publisher: SnapshotPublisher<u32> = SnapshotPublisher::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        publisher.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        publisher.publish(&1);
        publisher.publish(&2);

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listeners_execute_in_subscription_order() {
        let publisher: SnapshotPublisher<()> = SnapshotPublisher::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        for i in 1..=3 {
            let seq = Arc::clone(&sequence);
            publisher.subscribe(move |_| {
                seq.write().unwrap().push(i);
            });
        }

        publisher.publish(&());

        assert_eq!(*sequence.read().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let publisher: SnapshotPublisher<u32> = SnapshotPublisher::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let id = publisher.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        publisher.publish(&1);
        publisher.unsubscribe(id);
        publisher.publish(&2);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[test]
    fn test_listener_panic_doesnt_break_others() {
        let publisher: SnapshotPublisher<u32> = SnapshotPublisher::new();
        let counter = Arc::new(AtomicUsize::new(0));

        publisher.subscribe(|_| {
            panic!("Intentional panic");
        });

        let counter_clone = Arc::clone(&counter);
        publisher.subscribe(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        publisher.publish(&7);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_count() {
        let publisher: SnapshotPublisher<u32> = SnapshotPublisher::new();
        assert_eq!(publisher.subscriber_count(), 0);

        publisher.subscribe(|_| {});
        publisher.subscribe(|_| {});
        assert_eq!(publisher.subscriber_count(), 2);
    }
}
