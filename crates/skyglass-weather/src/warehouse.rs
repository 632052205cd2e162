//! Subscription seam between the host's reactive data source and widgets.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use crate::WeatherSnapshot;

/// Callback invoked on each emission. `None` is an empty emission.
pub type SnapshotCallback = Arc<dyn Fn(Option<Arc<WeatherSnapshot>>) + Send + Sync>;

/// A reactive source of weather snapshots
pub trait DataWarehouse: Send + Sync {
    /// Register `callback` for every future emission.
    ///
    /// The returned handle must be kept alive for as long as the callback
    /// should fire; dropping it unsubscribes.
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription;
}

/// What a host hands to a widget when it attaches it
#[derive(Clone)]
pub struct HostContext {
    pub data_warehouse: Arc<dyn DataWarehouse>,
}

impl HostContext {
    pub fn new(data_warehouse: Arc<dyn DataWarehouse>) -> Self {
        Self { data_warehouse }
    }
}

impl std::fmt::Debug for HostContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContext").finish_non_exhaustive()
    }
}

/// Handle for an active subscription
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop receiving emissions. Calling it again does nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    subscribers: BTreeMap<u64, SnapshotCallback>,
    latest: Option<Arc<WeatherSnapshot>>,
}

/// In-memory data warehouse.
///
/// Keeps the latest non-empty snapshot and replays it to new subscribers.
/// Callbacks always run outside the internal lock.
#[derive(Clone, Default)]
pub struct SnapshotHub {
    state: Arc<Mutex<HubState>>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an emission to every subscriber
    pub fn publish(&self, snapshot: Option<WeatherSnapshot>) {
        let snapshot = snapshot.map(Arc::new);
        let subscribers: Vec<SnapshotCallback> = {
            let mut state = self.state.lock();
            if let Some(s) = &snapshot {
                state.latest = Some(s.clone());
            }
            state.subscribers.values().cloned().collect()
        };

        tracing::debug!(
            "Publishing {} snapshot to {} subscribers",
            if snapshot.is_some() { "a" } else { "an empty" },
            subscribers.len()
        );
        for callback in subscribers {
            callback(snapshot.clone());
        }
    }

    pub fn latest(&self) -> Option<Arc<WeatherSnapshot>> {
        self.state.lock().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }
}

impl DataWarehouse for SnapshotHub {
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription {
        let (id, latest) = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.insert(id, callback.clone());
            (id, state.latest.clone())
        };
        tracing::debug!("Subscriber {} registered", id);

        if latest.is_some() {
            callback(latest);
        }

        let state: Weak<Mutex<HubState>> = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.lock().subscribers.remove(&id);
                tracing::debug!("Subscriber {} removed", id);
            }
        })
    }
}

impl std::fmt::Debug for SnapshotHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(counter: Arc<AtomicUsize>) -> SnapshotCallback {
        Arc::new(move |snapshot| {
            if snapshot.is_some() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            city: city.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_publish_reaches_subscribers() {
        let hub = SnapshotHub::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let _sub = hub.subscribe(counting_callback(seen.clone()));

        hub.publish(Some(snapshot("Lisbon")));
        hub.publish(Some(snapshot("Porto")));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(hub.latest().unwrap().city, "Porto");
    }

    #[test]
    fn test_empty_emission_keeps_latest() {
        let hub = SnapshotHub::new();
        hub.publish(Some(snapshot("Lisbon")));
        hub.publish(None);
        assert_eq!(hub.latest().unwrap().city, "Lisbon");
    }

    #[test]
    fn test_subscribe_replays_latest() {
        let hub = SnapshotHub::new();
        hub.publish(Some(snapshot("Lisbon")));

        let seen = Arc::new(AtomicUsize::new(0));
        let _sub = hub.subscribe(counting_callback(seen.clone()));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hub = SnapshotHub::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let mut sub = hub.subscribe(counting_callback(seen.clone()));
        assert_eq!(hub.subscriber_count(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(hub.subscriber_count(), 0);

        hub.publish(Some(snapshot("Lisbon")));
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = SnapshotHub::new();
        {
            let _sub = hub.subscribe(counting_callback(Arc::new(AtomicUsize::new(0))));
            assert_eq!(hub.subscriber_count(), 1);
        }
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_callback_may_touch_hub() {
        let hub = SnapshotHub::new();
        let inner = hub.clone();
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = counts.clone();
        let _sub = hub.subscribe(Arc::new(move |_| {
            sink.lock().push(inner.subscriber_count());
        }));

        hub.publish(Some(snapshot("Lisbon")));
        assert_eq!(*counts.lock(), vec![1]);
    }
}
