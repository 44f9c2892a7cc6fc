//! Router configuration.
//!
//! Compile-time switches are Cargo features (`log`, `tracing`, `cache`).
//! Runtime knobs live in [`RouterConfig`], which has sensible defaults,
//! builder-style setters, and can be deserialized from JSON:
//!
//! ```
//! use switchyard::RouterConfig;
//!
//! let config: RouterConfig =
//!     serde_json::from_str(r#"{ "initial_path": "/planets", "history_limit": 50 }"#).unwrap();
//! assert_eq!(config.initial_path, "/planets");
//! assert_eq!(config.history_limit, Some(50));
//! assert_eq!(config.cache_capacity, RouterConfig::DEFAULT_CACHE_CAPACITY);
//! ```

use serde::Deserialize;

/// Runtime configuration shared by the location store and route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path the location store starts at.
    pub initial_path: String,
    /// Maximum number of history entries kept (`None` = unbounded).
    pub history_limit: Option<usize>,
    /// Capacity of the resolve cache. Zero disables caching.
    pub cache_capacity: usize,
}

impl RouterConfig {
    /// Default resolve cache capacity.
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    /// Same as `RouterConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting path.
    pub fn initial_path(mut self, path: impl Into<String>) -> Self {
        self.initial_path = path.into();
        self
    }

    /// Bound the history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the resolve cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            initial_path: "/".to_string(),
            history_limit: None,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }
}
