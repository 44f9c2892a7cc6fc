//! Ordered route table and dispatch.
//!
//! A [`RouteTable`] is an ordered list of `(pattern, handler)` entries plus
//! an optional fallback. [`resolve`](RouteTable::resolve) walks the entries
//! in registration order and the **first** entry whose pattern matches wins;
//! there is no specificity ranking. If nothing matches, the fallback is used;
//! without a fallback the caller gets [`RouterError::NoRouteMatched`] and
//! decides whether that is fatal.
//!
//! Handlers are plain closures from [`RouteParams`] to whatever the UI layer
//! renders (`R`). The table never looks at `R`.
//!
//! # Example
//!
//! ```
//! use switchyard::RouteTable;
//!
//! let table = RouteTable::builder()
//!     .route("/", |_| "home".to_string())
//!     .route("/planets", |_| "list".to_string())
//!     .route("/planeta/:id", |p| format!("detail {}", p.get("id").unwrap_or("?")))
//!     .fallback(|_| "404".to_string())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.resolve("/planeta/3").unwrap().render(), "detail 3");
//! assert_eq!(table.resolve("/xyz").unwrap().render(), "404");
//! ```

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, CachedResolution, ResolveCache};
use crate::matching::{match_path, normalize_path};
use crate::{
    debug_log, error_log, info_log, warn_log, PathPattern, RouteParams, RouterConfig, RouterError,
};
#[cfg(feature = "cache")]
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A route handler: turns captured parameters into a render output.
pub type Handler<R> = Rc<dyn Fn(&RouteParams) -> R>;

/// Which handler a path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveTarget {
    /// Index of the matching entry in registration order.
    Entry(usize),
    /// Nothing matched; the fallback handler applies.
    Fallback,
    /// Nothing matched and there is no fallback.
    Unmatched,
}

/// One registered route.
pub struct RouteEntry<R> {
    pattern: PathPattern,
    name: Option<String>,
    handler: Handler<R>,
}

impl<R> RouteEntry<R> {
    /// The compiled pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Optional route name used by [`RouteTable::url_for`].
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The handler.
    pub fn handler(&self) -> &Handler<R> {
        &self.handler
    }
}

impl<R> fmt::Debug for RouteEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A handler bound to the parameters it matched with.
pub struct Resolved<R> {
    target: ResolveTarget,
    handler: Handler<R>,
    params: RouteParams,
}

impl<R> Resolved<R> {
    /// Invoke the handler with its bound parameters.
    pub fn render(&self) -> R {
        (self.handler)(&self.params)
    }

    /// The captured parameters (empty for the fallback).
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Index of the matching entry, or `None` for the fallback.
    pub fn index(&self) -> Option<usize> {
        match self.target {
            ResolveTarget::Entry(i) => Some(i),
            ResolveTarget::Fallback | ResolveTarget::Unmatched => None,
        }
    }

    /// `true` when the fallback handler was selected.
    pub fn is_fallback(&self) -> bool {
        self.target == ResolveTarget::Fallback
    }

    /// Which handler was selected.
    pub fn target(&self) -> ResolveTarget {
        self.target
    }
}

impl<R> Clone for Resolved<R> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            handler: Rc::clone(&self.handler),
            params: self.params.clone(),
        }
    }
}

impl<R> fmt::Debug for Resolved<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("target", &self.target)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable set of routes with an optional fallback.
pub struct RouteTable<R> {
    entries: Vec<RouteEntry<R>>,
    fallback: Option<Handler<R>>,
    #[cfg(feature = "cache")]
    cache: Option<RefCell<ResolveCache>>,
}

impl<R: 'static> RouteTable<R> {
    /// Start building a table.
    pub fn builder() -> RouteTableBuilder<R> {
        RouteTableBuilder::new()
    }

    /// Resolve `path` to a bound handler.
    ///
    /// The query string, if any, is ignored.
    pub fn resolve(&self, path: &str) -> Result<Resolved<R>, RouterError> {
        let key = normalize_path(path);

        #[cfg(feature = "cache")]
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.borrow_mut().get(&key) {
                return self.bind(hit.target, hit.params, &key);
            }
        }

        let (target, params) = self.find(&key);

        #[cfg(feature = "cache")]
        if let Some(cache) = &self.cache {
            cache.borrow_mut().insert(
                key.clone(),
                CachedResolution {
                    target,
                    params: params.clone(),
                },
            );
        }

        self.bind(target, params, &key)
    }

    /// Build the path for a named route.
    ///
    /// Returns `None` for an unknown name or a missing parameter.
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        self.entries
            .iter()
            .find(|e| e.name.as_deref() == Some(name))?
            .pattern
            .to_path(params)
    }

    /// Registered entries in order.
    pub fn entries(&self) -> &[RouteEntry<R>] {
        &self.entries
    }

    /// Number of entries (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when a fallback handler is registered.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve-cache statistics, if caching is enabled.
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.borrow().stats().clone())
    }

    fn find(&self, path: &str) -> (ResolveTarget, RouteParams) {
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(params) = match_path(&entry.pattern, path).into_params() {
                return (ResolveTarget::Entry(index), params);
            }
        }
        if self.fallback.is_some() {
            (ResolveTarget::Fallback, RouteParams::new())
        } else {
            (ResolveTarget::Unmatched, RouteParams::new())
        }
    }

    fn bind(
        &self,
        target: ResolveTarget,
        params: RouteParams,
        path: &str,
    ) -> Result<Resolved<R>, RouterError> {
        let handler = match (target, &self.fallback) {
            (ResolveTarget::Entry(i), _) => Rc::clone(&self.entries[i].handler),
            (ResolveTarget::Fallback, Some(fallback)) => {
                debug_log!("'{}' fell through to the fallback route", path);
                Rc::clone(fallback)
            }
            (ResolveTarget::Fallback | ResolveTarget::Unmatched, _) => {
                warn_log!("No route matched '{}' and no fallback is registered", path);
                return Err(RouterError::NoRouteMatched {
                    path: path.to_string(),
                });
            }
        };

        Ok(Resolved {
            target,
            handler,
            params,
        })
    }
}

impl<R> fmt::Debug for RouteTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("entries", &self.entries)
            .field("has_fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`RouteTable`].
///
/// Patterns are compiled as they are added; the first invalid one is kept
/// and returned by [`build`](Self::build), which aborts construction.
pub struct RouteTableBuilder<R> {
    entries: Vec<RouteEntry<R>>,
    fallback: Option<Handler<R>>,
    #[cfg_attr(not(feature = "cache"), allow(dead_code))]
    config: RouterConfig,
    error: Option<RouterError>,
}

impl<R: 'static> RouteTableBuilder<R> {
    /// Create an empty builder with default configuration.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: None,
            config: RouterConfig::default(),
            error: None,
        }
    }

    /// Use `config` (cache capacity).
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a route.
    pub fn route(self, pattern: &str, handler: impl Fn(&RouteParams) -> R + 'static) -> Self {
        self.push(None, pattern, Rc::new(handler))
    }

    /// Append a route that can be addressed by name via
    /// [`RouteTable::url_for`].
    pub fn named_route(
        self,
        name: &str,
        pattern: &str,
        handler: impl Fn(&RouteParams) -> R + 'static,
    ) -> Self {
        self.push(Some(name.to_string()), pattern, Rc::new(handler))
    }

    /// Set the handler used when nothing matches. Replaces any earlier one.
    pub fn fallback(mut self, handler: impl Fn(&RouteParams) -> R + 'static) -> Self {
        self.fallback = Some(Rc::new(handler));
        self
    }

    /// Finish building.
    pub fn build(self) -> Result<RouteTable<R>, RouterError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        info_log!(
            "Route table built: {} route(s){}",
            self.entries.len(),
            if self.fallback.is_some() { " + fallback" } else { "" }
        );

        Ok(RouteTable {
            entries: self.entries,
            fallback: self.fallback,
            #[cfg(feature = "cache")]
            cache: (self.config.cache_capacity > 0)
                .then(|| RefCell::new(ResolveCache::with_capacity(self.config.cache_capacity))),
        })
    }

    fn push(mut self, name: Option<String>, pattern: &str, handler: Handler<R>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match PathPattern::compile(pattern) {
            Ok(pattern) => {
                if let Some(name) = &name {
                    info_log!("Registered route '{}' (name: '{}')", pattern, name);
                } else {
                    info_log!("Registered route '{}'", pattern);
                }
                self.entries.push(RouteEntry {
                    pattern,
                    name,
                    handler,
                });
            }
            Err(err) => {
                error_log!("Rejected route pattern: {}", err);
                self.error = Some(err);
            }
        }
        self
    }
}

impl<R: 'static> Default for RouteTableBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
