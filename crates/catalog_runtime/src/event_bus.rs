//! In-process topic bus used to tell store instances that durable state changed.
//!
//! Delivery is synchronous and payload-free: every handler subscribed to a topic when
//! [`EventBus::publish`] is called runs once, in subscription order, before `publish` returns.
//! Handlers re-read whatever state they care about.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt,
    rc::{Rc, Weak},
};

/// Change-notification topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    /// Watch history collection was written.
    WatchHistoryUpdated,
    /// My-List set was written.
    MyListUpdated,
    /// Session state changed (sign-in, sign-out, profile refresh).
    SessionChanged,
    /// Active toast list changed.
    ToastsUpdated,
}

impl Topic {
    /// Returns the stable topic name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WatchHistoryUpdated => "watch-history-updated",
            Self::MyListUpdated => "mylist-updated",
            Self::SessionChanged => "session-changed",
            Self::ToastsUpdated => "toasts-updated",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Handler = Rc<dyn Fn()>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    topic_subscribers: HashMap<Topic, BTreeMap<u64, Handler>>,
}

impl BusInner {
    fn remove(&mut self, topic: Topic, id: u64) {
        if let Some(subscribers) = self.topic_subscribers.get_mut(&topic) {
            subscribers.remove(&id);
            if subscribers.is_empty() {
                self.topic_subscribers.remove(&topic);
            }
        }
    }

    fn is_subscribed(&self, topic: Topic, id: u64) -> bool {
        self.topic_subscribers
            .get(&topic)
            .is_some_and(|subscribers| subscribers.contains_key(&id))
    }
}

/// Shared handle to one bus. Clones publish to and subscribe on the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    /// Creates an isolated bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic`.
    ///
    /// The handler stays registered until the returned [`Subscription`] is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, topic: Topic, handler: impl Fn() + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .topic_subscribers
            .entry(topic)
            .or_default()
            .insert(id, Rc::new(handler));

        Subscription {
            bus: Rc::downgrade(&self.inner),
            topic,
            id,
        }
    }

    /// Invokes every handler currently subscribed to `topic`.
    ///
    /// Handlers may publish, subscribe or unsubscribe re-entrantly. A handler removed by an
    /// earlier handler during the same delivery is skipped; one added during delivery waits
    /// for the next publish.
    pub fn publish(&self, topic: Topic) {
        let handlers: Vec<(u64, Handler)> = {
            let inner = self.inner.borrow();
            let Some(subscribers) = inner.topic_subscribers.get(&topic) else {
                return;
            };
            subscribers
                .iter()
                .map(|(id, handler)| (*id, Rc::clone(handler)))
                .collect()
        };

        for (id, handler) in handlers {
            if self.inner.borrow().is_subscribed(topic, id) {
                handler();
            }
        }
    }

    /// Returns how many handlers are subscribed to `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .borrow()
            .topic_subscribers
            .get(&topic)
            .map_or(0, BTreeMap::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        let mut map = f.debug_map();
        for (topic, subscribers) in &inner.topic_subscribers {
            map.entry(topic, &subscribers.len());
        }
        map.finish()
    }
}

/// Registration handle returned by [`EventBus::subscribe`].
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    topic: Topic,
    id: u64,
}

impl Subscription {
    /// Topic this subscription listens on.
    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Removes the handler now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().remove(self.topic, self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}
