//! Path pattern compilation.
//!
//! A pattern such as `/planeta/:id` is compiled once, at registration time,
//! into a [`PathPattern`]: an ordered list of [`Segment`]s plus an optional
//! trailing wildcard. Matching against concrete paths is done by
//! [`match_path`](crate::matching::match_path).
//!
//! # Syntax
//!
//! | Segment  | Meaning                                              |
//! |----------|------------------------------------------------------|
//! | `text`   | literal, compared exactly (case-sensitive)           |
//! | `:name`  | named parameter, captures one path segment           |
//! | `*`      | trailing wildcard, captures the rest under `"*"`     |
//! | `*name`  | trailing wildcard, captures the rest under `"name"`  |
//!
//! Empty segments are ignored, so `/planets`, `planets` and `/planets/`
//! compile to the same pattern.
//!
//! # Examples
//!
//! ```
//! use switchyard::{PathPattern, Segment};
//!
//! let pattern = PathPattern::compile("/planeta/:id").unwrap();
//! assert_eq!(
//!     pattern.segments(),
//!     [Segment::Literal("planeta".into()), Segment::Param("id".into())]
//! );
//! assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["id"]);
//! ```

use crate::error::{PatternError, RouterError};
use crate::matching::split_path;
use crate::RouteParams;
use std::collections::HashSet;
use std::fmt;

/// Capture key used by an unnamed `*` wildcard.
pub const WILDCARD_KEY: &str = "*";

/// One compiled segment of a [`PathPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Captures the path segment under this name.
    Param(String),
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    wildcard: Option<String>,
}

impl PathPattern {
    /// Compile a pattern string.
    ///
    /// Fails with [`RouterError::InvalidPattern`] when a parameter name is
    /// empty, a name repeats, or a wildcard is not the last segment.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let raw = split_path(pattern);
        let mut segments = Vec::with_capacity(raw.len());
        let mut wildcard = None;
        let mut seen = HashSet::new();

        for (position, seg) in raw.iter().enumerate() {
            if let Some(rest) = seg.strip_prefix('*') {
                if position + 1 != raw.len() {
                    return Err(invalid(PatternError::WildcardNotLast { position }));
                }
                let name = if rest.is_empty() { WILDCARD_KEY } else { rest };
                if !seen.insert(name) {
                    return Err(invalid(PatternError::DuplicateParam(name.to_string())));
                }
                wildcard = Some(name.to_string());
            } else if let Some(name) = seg.strip_prefix(':') {
                if name.is_empty() {
                    return Err(invalid(PatternError::EmptyParamName { position }));
                }
                if !seen.insert(name) {
                    return Err(invalid(PatternError::DuplicateParam(name.to_string())));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal((*seg).to_string()));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            wildcard,
        })
    }

    /// The string this pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Segments before the wildcard, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Capture name of the trailing wildcard, if any.
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// `true` if the pattern ends with a wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }

    /// Names of all captures, in pattern order (wildcard last).
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .chain(self.wildcard.as_deref())
    }

    /// `true` if the pattern has no parameters and no wildcard.
    pub fn is_static(&self) -> bool {
        self.wildcard.is_none() && self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Build a concrete path by substituting `params` into the pattern.
    ///
    /// Returns `None` when a required parameter is missing. A missing
    /// wildcard capture is treated as empty.
    ///
    /// ```
    /// use switchyard::{PathPattern, RouteParams};
    ///
    /// let pattern = PathPattern::compile("/socios/:id").unwrap();
    /// let path = pattern.to_path(&RouteParams::from_pairs([("id", "12")]));
    /// assert_eq!(path.as_deref(), Some("/socios/12"));
    /// assert_eq!(pattern.to_path(&RouteParams::new()), None);
    /// ```
    pub fn to_path(&self, params: &RouteParams) -> Option<String> {
        let mut parts = Vec::with_capacity(self.segments.len() + 1);
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => parts.push(text.as_str()),
                Segment::Param(name) => parts.push(params.get(name)?),
            }
        }
        if let Some(rest) = self.wildcard.as_deref().and_then(|w| params.get(w)) {
            let rest = rest.trim_matches('/');
            if !rest.is_empty() {
                parts.push(rest);
            }
        }
        Some(format!("/{}", parts.join("/")))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for PathPattern {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}
