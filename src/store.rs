//! Minimal observable state container.
//!
//! [`Store`] holds one value and a list of subscribers. Every write replaces
//! the value and synchronously notifies the subscribers in registration
//! order. It is the building block of [`LocationStore`](crate::LocationStore)
//! and is equally usable for application state such as a shared counter:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use switchyard::Store;
//!
//! let count = Store::new(0_i64);
//! let seen = Rc::new(Cell::new(0));
//!
//! let seen_in_listener = Rc::clone(&seen);
//! let sub = count.subscribe(move |value| seen_in_listener.set(*value));
//!
//! count.update(|c| *c += 1);
//! count.update(|c| *c += 1);
//! assert_eq!(seen.get(), 2);
//!
//! sub.unsubscribe();
//! count.set(0);
//! assert_eq!(seen.get(), 2);
//! ```
//!
//! # Notification rules
//!
//! - The subscriber list is snapshotted before a pass starts. A subscriber
//!   removed during the pass (by itself or by another subscriber) does not
//!   stop the rest of the snapshot from being called.
//! - No internal borrow is held while subscribers run, so they may read the
//!   store, write to it again, subscribe or unsubscribe.
//! - A write made from inside a pass starts a new pass with the new value.
//!   The interrupted pass stops there, so no subscriber ever receives a value
//!   after a newer one.
//! - Writes are never de-duplicated; setting an equal value notifies again.
//!
//! Stores are single-threaded (`Rc`-based) and cheap to clone; clones share
//! the same state.

use crate::trace_log;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identifier of a registered subscriber.
pub type SubscriptionId = u64;

type Listener<S> = Rc<dyn Fn(&S)>;

struct Inner<S> {
    state: Rc<S>,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_id: SubscriptionId,
    version: u64,
}

impl<S> Inner<S> {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

/// Shared, observable state.
pub struct Store<S: 'static> {
    inner: Rc<RefCell<Inner<S>>>,
}

impl<S: 'static> Store<S> {
    /// Create a store holding `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state: Rc::new(initial),
                listeners: Vec::new(),
                next_id: 0,
                version: 0,
            })),
        }
    }

    /// Current value as a shared snapshot.
    pub fn snapshot(&self) -> Rc<S> {
        Rc::clone(&self.inner.borrow().state)
    }

    /// Run `f` against the current value.
    pub fn with<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        let state = self.snapshot();
        f(&state)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: S) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = Rc::new(value);
            inner.version += 1;
        }
        self.notify();
    }

    /// Register a subscriber. It is not called for the current value.
    pub fn subscribe(&self, listener: impl Fn(&S) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        trace_log!("Subscriber {} registered ({} total)", id, inner.listeners.len());

        let weak: Weak<RefCell<Inner<S>>> = Rc::downgrade(&self.inner);
        Subscription::new(id, move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().remove(id);
            }
        })
    }

    /// Remove a subscriber by id. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().remove(id)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Drop every subscriber.
    pub fn clear_subscribers(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    /// Call every subscriber with the current value.
    ///
    /// If a subscriber writes to the store, the rest of this pass is skipped;
    /// the write already notified everyone with the newer value.
    pub fn notify(&self) {
        let (state, version, snapshot) = {
            let inner = self.inner.borrow();
            (Rc::clone(&inner.state), inner.version, inner.listeners.clone())
        };
        trace_log!("Notifying {} subscriber(s)", snapshot.len());
        for (id, listener) in snapshot {
            if self.inner.borrow().version != version {
                trace_log!("Pass superseded by a newer write before subscriber {}", id);
                break;
            }
            listener(&state);
        }
    }
}

impl<S: Clone + 'static> Store<S> {
    /// Clone of the current value.
    pub fn get(&self) -> S {
        S::clone(&self.inner.borrow().state)
    }

    /// Modify a copy of the value and store it, notifying subscribers.
    ///
    /// The closure runs without any borrow held, so it may read the store.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }
}

impl<S: 'static> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: fmt::Debug + 'static> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("state", &inner.state)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

impl<S: Default + 'static> Default for Store<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does **not** unsubscribe; call
/// [`unsubscribe`](Self::unsubscribe). Unsubscribing twice is harmless, and
/// so is unsubscribing after the store itself is gone.
pub struct Subscription {
    id: SubscriptionId,
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            id,
            cancel: RefCell::new(Some(Box::new(cancel))),
        }
    }

    /// Id of the subscriber this handle controls.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the subscriber.
    pub fn unsubscribe(&self) {
        let cancel = self.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    /// `false` once [`unsubscribe`](Self::unsubscribe) has been called.
    pub fn is_active(&self) -> bool {
        self.cancel.borrow().is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_store_basic() {
        let store = Store::new(42);
        assert_eq!(store.get(), 42);

        store.set(100);
        assert_eq!(store.get(), 100);

        store.update(|v| *v += 1);
        assert_eq!(store.get(), 101);
        assert_eq!(store.with(|v| v * 2), 202);
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let store = Store::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            store.subscribe(move |v: &i32| log.borrow_mut().push(format!("{name}{v}")));
        }

        store.set(1);
        assert_eq!(*log.borrow(), ["a1", "b1", "c1"]);
    }

    #[test]
    fn test_set_same_value_notifies_again() {
        let store = Store::new(5);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        store.subscribe(move |_| c.set(c.get() + 1));

        store.set(5);
        store.set(5);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = Store::new(0);
        let sub = store.subscribe(|_| {});
        assert_eq!(store.subscriber_count(), 1);

        sub.unsubscribe();
        sub.unsubscribe();
        assert!(!sub.is_active());
        assert_eq!(store.subscriber_count(), 0);
        assert!(!store.unsubscribe(sub.id()));
    }

    #[test]
    fn test_self_unsubscribe_during_notify() {
        let store = Store::new(0);
        let calls = Rc::new(RefCell::new(Vec::new()));

        let c = Rc::clone(&calls);
        store.subscribe(move |_| c.borrow_mut().push("first"));

        let own_id = Rc::new(Cell::new(None));
        let c = Rc::clone(&calls);
        let handle = store.clone();
        let id_slot = Rc::clone(&own_id);
        let sub = store.subscribe(move |_| {
            c.borrow_mut().push("leaver");
            if let Some(id) = id_slot.get() {
                handle.unsubscribe(id);
            }
        });
        own_id.set(Some(sub.id()));

        let c = Rc::clone(&calls);
        store.subscribe(move |_| c.borrow_mut().push("last"));

        store.set(1);
        assert_eq!(*calls.borrow(), ["first", "leaver", "last"]);

        calls.borrow_mut().clear();
        store.set(2);
        assert_eq!(*calls.borrow(), ["first", "last"]);
    }

    #[test]
    fn test_reentrant_write() {
        let store = Store::new(0);
        let inner = store.clone();
        store.subscribe(move |v| {
            if *v < 3 {
                inner.set(v + 1);
            }
        });

        store.set(1);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn test_reentrant_write_supersedes_stale_pass() {
        let store = Store::new(0);
        let inner = store.clone();
        store.subscribe(move |v| {
            if *v == 1 {
                inner.set(2);
            }
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        store.subscribe(move |v: &i32| s.borrow_mut().push(*v));

        store.set(1);
        assert_eq!(store.get(), 2);
        assert_eq!(*seen.borrow(), [2]);
    }

    #[test]
    fn test_update_may_read_store() {
        let store = Store::new(1);
        let other = store.clone();
        store.update(move |v| *v = other.get() + other.with(|x| *x) + 1);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn test_update_keeps_live_snapshot() {
        let store = Store::new(vec![1]);
        let before = store.snapshot();
        store.update(|v| v.push(2));
        assert_eq!(*before, [1]);
        assert_eq!(store.get(), [1, 2]);
    }

    #[test]
    fn test_subscription_outlives_store() {
        let store = Store::new(());
        let sub = store.subscribe(|_| {});
        drop(store);
        sub.unsubscribe();
        assert!(!sub.is_active());
    }
}
