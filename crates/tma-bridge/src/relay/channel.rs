//! Event Channels
//!
//! Multi-subscriber event slots used by the callback relay.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Subscription ID, unique per channel
pub type SubscriptionId = u64;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    id: SubscriptionId,
    active: Arc<AtomicBool>,
    handler: Handler<T>,
}

struct ChannelInner<T> {
    slots: RwLock<Vec<Slot<T>>>,
    next_id: AtomicU64,
}

/// A named event with any number of subscribers.
///
/// Events are handed to handlers by reference and never retained, so
/// payloads such as phone numbers live only as long as the caller keeps them.
/// Handlers run in subscription order on the thread that calls [`emit`].
/// The subscriber list is snapshotted before dispatch, so handlers may
/// subscribe or unsubscribe re-entrantly. A handler unsubscribed during a
/// dispatch is skipped for the rest of that dispatch.
///
/// [`emit`]: EventChannel::emit
pub struct EventChannel<T> {
    name: &'static str,
    inner: Arc<ChannelInner<T>>,
}

impl<T: Send + Sync + 'static> EventChannel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Arc::new(ChannelInner {
                slots: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a handler. Delivery stops when the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let active = Arc::new(AtomicBool::new(true));

        self.inner.slots.write().push(Slot {
            id,
            active: active.clone(),
            handler: Arc::new(handler),
        });

        tracing::debug!(channel = self.name, id, "Subscribed");

        let weak: Weak<ChannelInner<T>> = Arc::downgrade(&self.inner);
        let name = self.name;
        Subscription {
            id,
            channel: name,
            active,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.slots.write().retain(|slot| slot.id != id);
                    tracing::debug!(channel = name, id, "Unsubscribed");
                }
            })),
        }
    }

    /// Deliver `event` to every active subscriber. Returns how many handlers ran.
    pub fn emit(&self, event: &T) -> usize {
        let snapshot: Vec<(Arc<AtomicBool>, Handler<T>)> = self
            .inner
            .slots
            .read()
            .iter()
            .map(|slot| (slot.active.clone(), slot.handler.clone()))
            .collect();

        let mut delivered = 0;
        for (active, handler) in snapshot {
            if active.load(Ordering::SeqCst) {
                handler(event);
                delivered += 1;
            }
        }

        tracing::trace!(channel = self.name, delivered, "Event emitted");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.slots.read().len()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("name", &self.name)
            .field("subscribers", &self.inner.slots.read().len())
            .finish()
    }
}

/// Handle pairing a subscribe with its unsubscribe.
///
/// Dropping the handle unsubscribes, so tying it to the owner's lifetime
/// guarantees the owner never receives events after teardown.
pub struct Subscription {
    id: SubscriptionId,
    channel: &'static str,
    active: Arc<AtomicBool>,
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn channel(&self) -> &'static str {
        self.channel
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop delivery now. Equivalent to dropping the handle.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .field("active", &self.is_active())
            .finish()
    }
}
