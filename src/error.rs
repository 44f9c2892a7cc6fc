//! Error handling for the router.
//!
//! Two families of failure exist and they are deliberately kept apart:
//!
//! - [`RouterError`] — routing-level failures. An invalid pattern is fatal
//!   while a [`RouteTable`](crate::RouteTable) is being built; a path that
//!   matches nothing is only an error when no fallback route was registered.
//! - [`DataError`] — loading a static dataset for a
//!   [`StaticRepository`](crate::StaticRepository) failed.
//!
//! A route that matched but whose parameter names no existing record is
//! neither; it is reported as [`Lookup::Missing`](crate::Lookup::Missing) and
//! the handler renders its own not-found view.
//!
//! # Examples
//!
//! ```
//! use switchyard::{PathPattern, PatternError, RouterError};
//!
//! let err = PathPattern::compile("/planeta/:id/moon/:id").unwrap_err();
//! assert!(matches!(
//!     err,
//!     RouterError::InvalidPattern { reason: PatternError::DuplicateParam(_), .. }
//! ));
//! assert_eq!(
//!     err.to_string(),
//!     "Invalid route pattern '/planeta/:id/moon/:id': parameter ':id' appears more than once"
//! );
//! ```

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

/// Why a path pattern was rejected by the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `:` segment with nothing after it.
    #[error("segment {position} is a parameter with an empty name")]
    EmptyParamName { position: usize },

    /// The same parameter name used twice in one pattern.
    #[error("parameter ':{0}' appears more than once")]
    DuplicateParam(String),

    /// A `*` segment that is not the last one.
    #[error("wildcard segment {position} must be the last segment")]
    WildcardNotLast { position: usize },
}

/// Routing-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A route pattern could not be compiled. Raised at registration time.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        pattern: String,
        reason: PatternError,
    },

    /// No entry matched and the table has no fallback route.
    #[error("No route matched '{path}'")]
    NoRouteMatched { path: String },
}

impl RouterError {
    /// `true` for errors that can only happen while building a table.
    pub fn is_registration_error(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }

    /// The offending pattern or path, for diagnostics.
    pub fn subject(&self) -> &str {
        match self {
            Self::InvalidPattern { pattern, .. } => pattern,
            Self::NoRouteMatched { path } => path,
        }
    }
}

/// Failure while loading a static dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The bundled JSON could not be parsed into records.
    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records share the same id.
    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),
}
