//! Router: a route table kept in sync with a location store.
//!
//! [`Router::mount`] subscribes to a [`LocationStore`] and re-resolves the
//! [`RouteTable`] on every location change. The outcome is exposed as a
//! [`RouteState`]:
//!
//! ```text
//!            location change              location change
//!   Resolved ───────────────▶ NotFound ──────────────────▶ Resolved
//!      ▲  │                                                  ...
//!      └──┘ (another match, or the same one with new params)
//! ```
//!
//! `Unmatched` takes the place of `NotFound` when the table has no fallback;
//! [`render`](Router::render) then yields
//! [`RouterError::NoRouteMatched`] and the caller decides what to show.
//! There is no terminal state: a router lives until
//! [`dispose`](Router::dispose) detaches it.
//!
//! UI layers observe transitions through [`on_change`](Router::on_change)
//! instead of relying on framework reactivity.
//!
//! # Example
//!
//! ```
//! use switchyard::{LocationStore, RouteState, RouteTable, Router};
//!
//! let table = RouteTable::builder()
//!     .route("/", |_| "home".to_string())
//!     .route("/planeta/:id", |p| format!("planet {}", p.get("id").unwrap_or("?")))
//!     .fallback(|_| "not found".to_string())
//!     .build()
//!     .unwrap();
//!
//! let location = LocationStore::create("/");
//! let router = Router::mount(&location, table);
//! assert_eq!(router.render().unwrap(), "home");
//!
//! location.navigate("/planeta/3");
//! assert_eq!(router.render().unwrap(), "planet 3");
//!
//! location.navigate("/nowhere");
//! assert_eq!(router.state(), RouteState::NotFound { path: "/nowhere".into() });
//! ```

use crate::matching::normalize_path;
use crate::store::{Store, Subscription};
use crate::table::{ResolveTarget, Resolved};
use crate::{debug_log, LocationStore, RouteParams, RouteTable, RouterError};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Observable state of a mounted router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteState {
    /// A registered entry matched.
    Resolved {
        /// Index of the entry in registration order.
        index: usize,
        /// Parameters it captured.
        params: RouteParams,
    },
    /// Nothing matched; the fallback handler is active.
    NotFound {
        /// The unmatched path.
        path: String,
    },
    /// Nothing matched and the table has no fallback.
    Unmatched {
        /// The unmatched path.
        path: String,
    },
}

impl RouteState {
    /// `true` for [`RouteState::Resolved`].
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// `true` for [`RouteState::NotFound`] and [`RouteState::Unmatched`].
    pub fn is_not_found(&self) -> bool {
        !self.is_resolved()
    }

    /// Parameters of the active entry (empty when not resolved).
    pub fn params(&self) -> RouteParams {
        match self {
            Self::Resolved { params, .. } => params.clone(),
            Self::NotFound { .. } | Self::Unmatched { .. } => RouteParams::new(),
        }
    }

    fn from_outcome<R>(outcome: &Result<Resolved<R>, RouterError>, path: &str) -> Self {
        let path = normalize_path(path);
        match outcome {
            Ok(resolved) => match resolved.target() {
                ResolveTarget::Entry(index) => Self::Resolved {
                    index,
                    params: resolved.params().clone(),
                },
                ResolveTarget::Fallback | ResolveTarget::Unmatched => Self::NotFound { path },
            },
            Err(_) => Self::Unmatched { path },
        }
    }
}

type Outcome<R> = Result<Resolved<R>, RouterError>;

/// A route table bound to a location store.
pub struct Router<R: 'static> {
    table: Rc<RouteTable<R>>,
    location: LocationStore,
    active: Rc<RefCell<Outcome<R>>>,
    state: Store<RouteState>,
    subscription: Subscription,
}

impl<R: 'static> Router<R> {
    /// Resolve the current location and start following `location`.
    pub fn mount(location: &LocationStore, table: RouteTable<R>) -> Self {
        let table = Rc::new(table);
        let path = location.current().path().to_string();
        let outcome = table.resolve(&path);
        let state = Store::new(RouteState::from_outcome(&outcome, &path));
        let active = Rc::new(RefCell::new(outcome));

        debug_log!("Router mounted at '{}': {:?}", path, state.snapshot());

        let subscription = {
            let table = Rc::clone(&table);
            let active = Rc::clone(&active);
            let state = state.clone();
            location.subscribe(move |loc| {
                let outcome = table.resolve(loc.path());
                let next = RouteState::from_outcome(&outcome, loc.path());
                debug_log!("Router state for '{}': {:?}", loc.path(), next);
                *active.borrow_mut() = outcome;
                state.set(next);
            })
        };

        Self {
            table,
            location: location.clone(),
            active,
            state,
            subscription,
        }
    }

    /// Render the active handler.
    ///
    /// Fails with [`RouterError::NoRouteMatched`] only in the `Unmatched`
    /// state.
    pub fn render(&self) -> Result<R, RouterError> {
        let resolved = self.active.borrow().clone()?;
        Ok(resolved.render())
    }

    /// The active handler and its parameters.
    pub fn resolved(&self) -> Result<Resolved<R>, RouterError> {
        self.active.borrow().clone()
    }

    /// Current state.
    pub fn state(&self) -> RouteState {
        self.state.get()
    }

    /// Parameters of the active entry.
    pub fn params(&self) -> RouteParams {
        self.state.with(RouteState::params)
    }

    /// Observe state transitions. Called after every location change.
    pub fn on_change(&self, listener: impl Fn(&RouteState) + 'static) -> Subscription {
        self.state.subscribe(listener)
    }

    /// The location store this router follows.
    pub fn location(&self) -> &LocationStore {
        &self.location
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable<R> {
        &self.table
    }

    /// Shorthand for `self.location().navigate(href)`.
    pub fn navigate(&self, href: &str) {
        self.location.navigate(href);
    }

    /// Stop following the location store and drop state observers.
    ///
    /// Dropping the router does the same.
    pub fn dispose(&self) {
        self.subscription.unsubscribe();
        self.state.clear_subscribers();
    }

    /// `false` once [`dispose`](Self::dispose) has been called.
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }
}

impl<R: 'static> Drop for Router<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<R: 'static> fmt::Debug for Router<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("location", &self.location.current())
            .field("state", &self.state())
            .field("mounted", &self.is_mounted())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn table(with_fallback: bool) -> RouteTable<String> {
        let builder = RouteTable::builder()
            .route("/", |_| "home".to_string())
            .route("/planets", |_| "list".to_string())
            .route("/planeta/:id", |p| format!("detail:{}", p.get("id").unwrap_or_default()));
        if with_fallback {
            builder.fallback(|_| "404".to_string()).build().unwrap()
        } else {
            builder.build().unwrap()
        }
    }

    #[test]
    fn test_initial_state_from_location() {
        let location = LocationStore::create("/planeta/5");
        let router = Router::mount(&location, table(true));
        assert_eq!(
            router.state(),
            RouteState::Resolved {
                index: 2,
                params: RouteParams::from_pairs([("id", "5")]),
            }
        );
        assert_eq!(router.render().unwrap(), "detail:5");
    }

    #[test]
    fn test_transitions_follow_location() {
        let location = LocationStore::create("/");
        let router = Router::mount(&location, table(true));

        location.navigate("/xyz");
        assert!(router.state().is_not_found());
        assert_eq!(router.render().unwrap(), "404");

        location.navigate("/planets");
        assert!(router.state().is_resolved());
        assert_eq!(router.render().unwrap(), "list");

        location.back();
        assert_eq!(router.state(), RouteState::NotFound { path: "/xyz".into() });
    }

    #[test]
    fn test_unmatched_without_fallback() {
        let location = LocationStore::create("/xyz");
        let router = Router::mount(&location, table(false));
        assert_eq!(router.state(), RouteState::Unmatched { path: "/xyz".into() });
        assert_eq!(
            router.render().unwrap_err(),
            RouterError::NoRouteMatched { path: "/xyz".into() }
        );
    }

    #[test]
    fn test_on_change_and_dispose() {
        let location = LocationStore::create("/");
        let router = Router::mount(&location, table(true));
        let changes = Rc::new(Cell::new(0));
        let c = Rc::clone(&changes);
        router.on_change(move |_| c.set(c.get() + 1));

        router.navigate("/planets");
        router.navigate("/planets");
        assert_eq!(changes.get(), 2);

        router.dispose();
        assert!(!router.is_mounted());
        location.navigate("/planeta/1");
        assert_eq!(changes.get(), 2);
        assert_eq!(router.render().unwrap(), "list");
        assert_eq!(location.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_releases_location_subscription() {
        let location = LocationStore::create("/");
        for _ in 0..3 {
            let router = Router::mount(&location, table(true));
            assert_eq!(location.subscriber_count(), 1);
            drop(router);
        }
        assert_eq!(location.subscriber_count(), 0);
    }

    #[test]
    fn test_not_found_path_is_normalized() {
        let location = LocationStore::create("/xyz/");
        let router = Router::mount(&location, table(false));
        let err = router.render().unwrap_err();
        assert_eq!(router.state(), RouteState::Unmatched { path: "/xyz".into() });
        assert_eq!(err.subject(), "/xyz");

        let router = Router::mount(&location, table(true));
        location.navigate("//nowhere//?q=1");
        assert_eq!(router.state(), RouteState::NotFound { path: "/nowhere".into() });
    }

    #[test]
    fn test_redirecting_listener_before_router() {
        let location = LocationStore::create("/");
        let redirect_to = location.clone();
        let _redirect = location.subscribe(move |loc| {
            if loc.path() == "/old" {
                redirect_to.navigate("/planets");
            }
        });
        let router = Router::mount(&location, table(true));

        location.navigate("/old");

        assert_eq!(location.current().path(), "/planets");
        assert_eq!(router.render().unwrap(), "list");
        assert!(router.state().is_resolved());
    }

    #[test]
    fn test_handler_may_navigate() {
        let location = LocationStore::create("/");
        let redirect_to = location.clone();
        let table = RouteTable::builder()
            .route("/", move |_| {
                redirect_to.navigate("/planets");
                "redirected".to_string()
            })
            .route("/planets", |_| "list".to_string())
            .build()
            .unwrap();

        let router = Router::mount(&location, table);
        assert_eq!(router.render().unwrap(), "redirected");
        assert_eq!(router.render().unwrap(), "list");
    }
}
