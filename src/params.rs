//! Route parameters and query string parsing.
//!
//! - [`RouteParams`] — values captured from `:name` (and wildcard) segments
//!   of a matched [`PathPattern`](crate::PathPattern). Values are always kept
//!   as the raw path segment; [`get_as`](RouteParams::get_as) is the explicit
//!   conversion step and returns `None` when the text does not parse.
//! - [`QueryParams`] — the `?key=value&...` part of a
//!   [`Location`](crate::Location). Multi-valued keys are supported.
//!
//! # Example
//!
//! ```
//! use switchyard::{QueryParams, RouteParams};
//!
//! let params = RouteParams::from_pairs([("id", "42")]);
//! assert_eq!(params.get("id"), Some("42"));
//! assert_eq!(params.get_as::<u32>("id"), Some(42));
//!
//! let query = QueryParams::from_query_string("page=1&sort=name");
//! assert_eq!(query.get_as::<u32>("page"), Some(1));
//! assert_eq!(query.get("sort"), Some("name"));
//! ```

use std::collections::HashMap;

/// Parameters extracted from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create empty route parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Get a parameter value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Return `true` if the given name is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Iterate over all `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> HashMap<String, String> {
        self.params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Query parameters parsed from a URL query string.
///
/// Keys keep their first-seen order, so [`to_query_string`](Self::to_query_string)
/// is deterministic.
///
/// # Example
///
/// ```
/// use switchyard::QueryParams;
///
/// let query = QueryParams::from_query_string("plan=gold&tag=a&tag=b");
/// assert_eq!(query.get("plan"), Some("gold"));
/// assert_eq!(query.get_all("tag"), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Create empty query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string, with or without the leading `?`.
    ///
    /// Pairs without `=` are kept with an empty value. `+` decodes to a space.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            parsed.insert(decode_component(key), decode_component(value));
        }

        parsed
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values(key)?.first().map(String::as_str)
    }

    /// Get every value for a key (empty if absent).
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values(key).map_or(&[], Vec::as_slice)
    }

    /// Get the first value for a key, parsed as type `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Append a value for the given key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.params.push((key, vec![value])),
        }
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values(key).is_some()
    }

    /// Serialize back into a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .flat_map(|(key, values)| {
                values.iter().map(move |value| {
                    format!(
                        "{}={}",
                        urlencoding::encode(key),
                        urlencoding::encode(value)
                    )
                })
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Return the number of distinct keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    fn values(&self, key: &str) -> Option<&Vec<String>> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values)
    }
}

/// Decode a query component. Malformed escapes are kept verbatim.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
