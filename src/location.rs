//! Observable current location.
//!
//! [`LocationStore`] is the single source of navigation state. It is
//! constructed explicitly ([`create`](LocationStore::create)) and handed to
//! whoever needs it; independent instances never share state, which keeps
//! tests isolated. [`dispose`](LocationStore::dispose) detaches every
//! subscriber.
//!
//! Two kinds of input change the location, and subscribers cannot tell them
//! apart:
//!
//! - programmatic navigation: [`navigate`](LocationStore::navigate) and
//!   [`replace`](LocationStore::replace), called from links and buttons;
//! - host signals: [`back`](LocationStore::back),
//!   [`forward`](LocationStore::forward) and
//!   [`handle_host_signal`](LocationStore::handle_host_signal), for when the
//!   user drives the host's history.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use switchyard::LocationStore;
//!
//! let store = LocationStore::create("/");
//! let visited = Rc::new(RefCell::new(Vec::new()));
//!
//! let log = Rc::clone(&visited);
//! store.subscribe(move |location| log.borrow_mut().push(location.path().to_string()));
//!
//! store.navigate("/planets");
//! store.navigate("/planeta/3");
//! store.back();
//!
//! assert_eq!(*visited.borrow(), ["/planets", "/planeta/3", "/planets"]);
//! assert_eq!(store.current().path(), "/planets");
//! ```

use crate::history::{MemoryHistory, NavigationDirection, RouteChangeEvent};
use crate::matching::strip_query;
use crate::store::{Store, Subscription, SubscriptionId};
use crate::{debug_log, info_log, QueryParams, RouterConfig};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Immutable snapshot of where the application is.
///
/// Built from an href such as `/socios?plan=gold#top`; the fragment is
/// dropped, the query is kept separately and never takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    search: String,
}

impl Location {
    /// Parse an href into a location.
    pub fn new(href: &str) -> Self {
        let without_fragment = href.split_once('#').map_or(href, |(before, _)| before);
        let path = strip_query(without_fragment);
        let search = without_fragment[path.len()..]
            .strip_prefix('?')
            .unwrap_or_default();

        Self {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            search: search.to_string(),
        }
    }

    /// Path part, e.g. `/planeta/3`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string without the `?` (possibly empty).
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Parsed query string.
    pub fn query(&self) -> QueryParams {
        QueryParams::from_query_string(&self.search)
    }

    /// Path plus query, as it would appear in an address bar.
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.search)
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl From<&str> for Location {
    fn from(href: &str) -> Self {
        Self::new(href)
    }
}

/// Navigation signals raised by the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSignal {
    /// User pressed back.
    Back,
    /// User pressed forward.
    Forward,
    /// Host already moved to `href` on its own (e.g. a `popstate` event).
    Pop { href: String },
}

/// Observable holder of the current [`Location`].
///
/// Cheap to clone; clones share the same state and subscribers.
#[derive(Clone)]
pub struct LocationStore {
    location: Store<Location>,
    history: Rc<RefCell<MemoryHistory>>,
}

impl LocationStore {
    /// Create a store positioned at `initial`.
    pub fn create(initial: &str) -> Self {
        Self::with_history(MemoryHistory::new(initial))
    }

    /// Create a store from a [`RouterConfig`].
    pub fn with_config(config: &RouterConfig) -> Self {
        let mut history = MemoryHistory::new(config.initial_path.as_str());
        if let Some(limit) = config.history_limit {
            history = history.with_limit(limit);
        }
        Self::with_history(history)
    }

    /// Create a store over an existing history; the location starts at its
    /// current entry.
    pub fn with_history(history: MemoryHistory) -> Self {
        let location = Location::new(history.current());
        Self {
            location: Store::new(location),
            history: Rc::new(RefCell::new(history)),
        }
    }

    /// Current location.
    pub fn current(&self) -> Location {
        self.location.get()
    }

    /// Register a subscriber, called after every location change.
    pub fn subscribe(&self, listener: impl Fn(&Location) + 'static) -> Subscription {
        self.location.subscribe(listener)
    }

    /// Remove a subscriber by id.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.location.unsubscribe(id)
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.location.subscriber_count()
    }

    /// Navigate to `href`, pushing a history entry.
    ///
    /// Subscribers are notified even if `href` equals the current location.
    pub fn navigate(&self, href: &str) {
        let event = self.history.borrow_mut().push(href);
        self.apply(&event);
    }

    /// Navigate to `href`, replacing the current history entry.
    pub fn replace(&self, href: &str) {
        let event = self.history.borrow_mut().replace(href);
        self.apply(&event);
    }

    /// Step back. Returns `false` (and notifies nobody) at the first entry.
    pub fn back(&self) -> bool {
        self.handle_host_signal(HostSignal::Back)
    }

    /// Step forward. Returns `false` at the last entry.
    pub fn forward(&self) -> bool {
        self.handle_host_signal(HostSignal::Forward)
    }

    /// Apply a signal from the host environment.
    ///
    /// Returns `false` when the signal could not move the location.
    pub fn handle_host_signal(&self, signal: HostSignal) -> bool {
        let event = {
            let mut history = self.history.borrow_mut();
            match signal {
                HostSignal::Back => history.back(),
                HostSignal::Forward => history.forward(),
                HostSignal::Pop { href } => {
                    let mut event = history.replace(href);
                    event.direction = NavigationDirection::Pop;
                    Some(event)
                }
            }
        };

        match event {
            Some(event) => {
                self.apply(&event);
                true
            }
            None => {
                debug_log!("Host signal ignored at history boundary");
                false
            }
        }
    }

    /// Check if `back()` would move.
    pub fn can_go_back(&self) -> bool {
        self.history.borrow().can_go_back()
    }

    /// Check if `forward()` would move.
    pub fn can_go_forward(&self) -> bool {
        self.history.borrow().can_go_forward()
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    /// Detach every subscriber. The store keeps working but tells nobody.
    pub fn dispose(&self) {
        debug_log!(
            "Disposing location store ({} subscriber(s))",
            self.location.subscriber_count()
        );
        self.location.clear_subscribers();
    }

    fn apply(&self, event: &RouteChangeEvent) {
        info_log!(
            "Navigation {:?}: '{}' → '{}'",
            event.direction,
            event.from,
            event.to
        );
        self.location.set(Location::new(&event.to));
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::with_config(&RouterConfig::default())
    }
}

impl fmt::Debug for LocationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationStore")
            .field("location", &self.current())
            .field("history_len", &self.history_len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
