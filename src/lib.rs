//! # switchyard
//!
//! A small, framework-agnostic client-side router.
//!
//! - [`PathPattern`] — compiles `/planeta/:id` style patterns.
//! - [`match_path`] — matches a path against a pattern, capturing params.
//! - [`LocationStore`] — observable current location, fed by navigation and
//!   host back/forward signals.
//! - [`RouteTable`] — ordered routes, first match wins, optional fallback.
//! - [`Router`] — keeps a route table resolved against a location store.
//! - [`Store`] — the observable container the location store is built on,
//!   usable for any shared application state.
//! - [`StaticRepository`] — read-only record lookup for detail handlers.
//!
//! Everything is single-threaded and synchronous: a navigation notifies
//! subscribers, re-resolves, and returns before the next event is handled.
//!
//! # Quick start
//!
//! ```
//! use switchyard::{LocationStore, RouteTable, Router};
//!
//! let table = RouteTable::builder()
//!     .route("/", |_| "Home".to_string())
//!     .route("/planets", |_| "Planet list".to_string())
//!     .route("/planeta/:id", |params| {
//!         format!("Planet #{}", params.get("id").unwrap_or_default())
//!     })
//!     .fallback(|_| "404 - Not Found".to_string())
//!     .build()?;
//!
//! let location = LocationStore::create("/");
//! let router = Router::mount(&location, table);
//!
//! location.navigate("/planeta/4");
//! assert_eq!(router.render()?, "Planet #4");
//!
//! location.navigate("/pluto");
//! assert_eq!(router.render()?, "404 - Not Found");
//! # Ok::<(), switchyard::RouterError>(())
//! ```
//!
//! # Feature flags
//!
//! | Feature   | Default | Purpose                                  |
//! |-----------|---------|------------------------------------------|
//! | `log`     | yes     | diagnostics through the `log` crate      |
//! | `tracing` | no      | diagnostics through the `tracing` crate  |
//! | `cache`   | yes     | LRU memo of path → resolution            |

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod logging;

#[cfg(feature = "cache")]
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod matching;
pub mod params;
pub mod pattern;
pub mod repository;
pub mod router;
pub mod store;
pub mod table;

pub use config::RouterConfig;
pub use error::{DataError, PatternError, Result, RouterError};
pub use history::{MemoryHistory, NavigationDirection, RouteChangeEvent};
pub use location::{HostSignal, Location, LocationStore};
pub use matching::{match_path, MatchResult};
pub use params::{QueryParams, RouteParams};
pub use pattern::{PathPattern, Segment};
pub use repository::{lookup_param, Lookup, Record, Repository, StaticRepository};
pub use router::{RouteState, Router};
pub use store::{Store, Subscription, SubscriptionId};
pub use table::{Handler, ResolveTarget, Resolved, RouteEntry, RouteTable, RouteTableBuilder};
