//! Read-only record lookup for route handlers.
//!
//! Detail pages receive an id as a string parameter and look it up in a
//! static dataset. [`Repository`] is that lookup; [`StaticRepository`] is the
//! in-memory implementation, built from a `Vec` or from bundled JSON.
//!
//! A lookup that finds nothing is **not** a routing failure. The route has
//! already matched; the handler gets [`Lookup::Missing`] and renders its own
//! not-found view. That includes ids that fail to parse (`/planeta/abc`).
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use switchyard::{lookup_param, Lookup, Record, RouteParams, StaticRepository};
//!
//! #[derive(Deserialize)]
//! struct Planet {
//!     id: u32,
//!     planeta: String,
//! }
//!
//! impl Record for Planet {
//!     type Id = u32;
//!     fn id(&self) -> Option<u32> {
//!         Some(self.id)
//!     }
//! }
//!
//! let planets: StaticRepository<Planet> =
//!     StaticRepository::from_json(r#"[{"id": 3, "planeta": "Tierra"}]"#).unwrap();
//!
//! let found = lookup_param(&planets, &RouteParams::from_pairs([("id", "3")]), "id");
//! assert!(matches!(found, Lookup::Found(p) if p.planeta == "Tierra"));
//!
//! let missing = lookup_param(&planets, &RouteParams::from_pairs([("id", "99")]), "id");
//! assert!(missing.is_missing());
//! ```

use crate::error::DataError;
use crate::{debug_log, RouteParams};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// A record with an (optional) identity.
pub trait Record {
    /// Key type; parsed from route parameters.
    type Id: Eq + Hash + Clone + FromStr + fmt::Display;

    /// The record's id, or `None` for records that cannot be addressed.
    fn id(&self) -> Option<Self::Id>;
}

/// Read-only access to a set of entities by id.
pub trait Repository {
    /// Key type.
    type Id;
    /// Stored entity.
    type Entity;

    /// Look up one entity.
    fn get_by_id(&self, id: &Self::Id) -> Option<&Self::Entity>;

    /// Every entity in dataset order, addressable or not.
    fn all(&self) -> &[Self::Entity];
}

/// In-memory repository over a fixed list of records.
pub struct StaticRepository<E: Record> {
    records: Vec<E>,
    index: HashMap<E::Id, usize>,
}

impl<E: Record> StaticRepository<E> {
    /// Index `records` by id.
    ///
    /// Records without an id are kept (they show up in
    /// [`all`](Repository::all)) but cannot be looked up. Two records with
    /// the same id are rejected.
    pub fn new(records: Vec<E>) -> Result<Self, DataError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let Some(id) = record.id() else {
                debug_log!("Record at position {} has no id; not addressable", position);
                continue;
            };
            if index.insert(id.clone(), position).is_some() {
                return Err(DataError::DuplicateId(id.to_string()));
            }
        }
        Ok(Self { records, index })
    }

    /// Number of records, addressable or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.records.iter()
    }
}

impl<E: Record + DeserializeOwned> StaticRepository<E> {
    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let records: Vec<E> = serde_json::from_str(json)?;
        Self::new(records)
    }
}

impl<E: Record> Repository for StaticRepository<E> {
    type Id = E::Id;
    type Entity = E;

    fn get_by_id(&self, id: &E::Id) -> Option<&E> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    fn all(&self) -> &[E] {
        &self.records
    }
}

impl<E: Record + fmt::Debug> fmt::Debug for StaticRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticRepository")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

/// Result of looking a route parameter up in a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The entity exists.
    Found(T),
    /// No entity for this parameter (absent, unparsable, or unknown id).
    Missing,
}

impl<T> Lookup<T> {
    /// `true` for [`Lookup::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// `true` for [`Lookup::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Convert into an `Option`.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Map the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::Missing => Lookup::Missing,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Self::Found)
    }
}

/// Convert `params[key]` to the repository's id type and look it up.
///
/// Every failure (missing parameter, conversion error, unknown id) is
/// [`Lookup::Missing`].
pub fn lookup_param<'r, Repo>(
    repo: &'r Repo,
    params: &RouteParams,
    key: &str,
) -> Lookup<&'r Repo::Entity>
where
    Repo: Repository,
    Repo::Id: FromStr,
{
    let Some(raw) = params.get(key) else {
        return Lookup::Missing;
    };
    let Ok(id) = raw.parse::<Repo::Id>() else {
        debug_log!("Parameter '{}'='{}' is not a valid id", key, raw);
        return Lookup::Missing;
    };
    repo.get_by_id(&id).into()
}
