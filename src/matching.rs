//! Segment-based path matching.
//!
//! # Design
//!
//! - Split paths by '/' into segments, dropping empty ones
//! - Literal segments must be equal (case-sensitive)
//! - `:param` segments capture the path segment verbatim, as a string
//! - Segment counts must be equal; there is no prefix matching
//! - A trailing wildcard relaxes the count check and captures the rest
//!
//! Callers that need a number out of a parameter convert it themselves (see
//! [`RouteParams::get_as`]); a failed conversion is an application-level
//! "not found", never a match failure.

use crate::pattern::{PathPattern, Segment};
use crate::RouteParams;

/// Outcome of matching one path against one pattern.
///
/// Created fresh for every attempt. On failure `params` is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the path matched.
    pub matched: bool,
    /// Captured parameters (empty unless `matched`).
    pub params: RouteParams,
}

impl MatchResult {
    /// A failed match.
    pub fn no_match() -> Self {
        Self::default()
    }

    /// A successful match with the given captures.
    pub fn matched(params: RouteParams) -> Self {
        Self {
            matched: true,
            params,
        }
    }

    /// Shorthand for `self.matched`.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// Convert into `Some(params)` on success.
    pub fn into_params(self) -> Option<RouteParams> {
        self.matched.then_some(self.params)
    }
}

/// Match a path against a compiled pattern, extracting parameters.
///
/// # Examples
///
/// ```
/// use switchyard::{match_path, PathPattern};
///
/// let pattern = PathPattern::compile("/planeta/:id").unwrap();
///
/// let result = match_path(&pattern, "/planeta/42");
/// assert!(result.matched);
/// assert_eq!(result.params.get("id"), Some("42"));
///
/// assert!(!match_path(&pattern, "/planeta/42/moons").matched);
/// assert!(!match_path(&pattern, "/Planeta/42").matched);
/// ```
pub fn match_path(pattern: &PathPattern, path: &str) -> MatchResult {
    let path_segments = split_path(path);
    let pattern_segments = pattern.segments();

    let fixed = pattern_segments.len();
    let count_ok = if pattern.has_wildcard() {
        path_segments.len() >= fixed
    } else {
        path_segments.len() == fixed
    };
    if !count_ok {
        return MatchResult::no_match();
    }

    let mut params = RouteParams::new();

    for (pattern_seg, path_seg) in pattern_segments.iter().zip(&path_segments) {
        match pattern_seg {
            Segment::Literal(text) if text == path_seg => {}
            Segment::Literal(_) => return MatchResult::no_match(),
            Segment::Param(name) => params.insert(name.as_str(), *path_seg),
        }
    }

    if let Some(name) = pattern.wildcard() {
        params.insert(name, path_segments[fixed..].join("/"));
    }

    MatchResult::matched(params)
}

/// Split a path into segments, filtering empty segments.
///
/// A query string or fragment, if present, is not part of the path and is
/// cut off first.
///
/// # Examples
///
/// ```
/// use switchyard::matching::split_path;
///
/// assert_eq!(split_path("/users/123"), ["users", "123"]);
/// assert_eq!(split_path("/users/?page=2"), ["users"]);
/// assert!(split_path("/").is_empty());
/// assert!(split_path("").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    strip_query(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Cut a path at the first `?` or `#`.
pub(crate) fn strip_query(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |pos| &path[..pos])
}

/// Normalize a path for use as a cache or comparison key.
///
/// Leading slash ensured, trailing and repeated slashes removed, query cut
/// off. The empty path is the root.
///
/// ```
/// use switchyard::matching::normalize_path;
///
/// assert_eq!(normalize_path("planets/"), "/planets");
/// assert_eq!(normalize_path("//planeta//3"), "/planeta/3");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    format!("/{}", split_path(path).join("/"))
}
