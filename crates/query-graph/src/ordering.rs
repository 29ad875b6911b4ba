//! Ordering configuration for query graphs
//!
//! Ordering is tri-state: keep the model's default ordering, explicitly clear
//! it, or order by an explicit list of keys. Keys follow the ORM lookup
//! convention where a leading `-` marks a descending key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// A single sort key expression, e.g. `"name"` or `"-created_at"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderKey(String);

impl OrderKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Ascending key on `field`
    pub fn asc(field: &str) -> Self {
        Self(field.to_string())
    }

    /// Descending key on `field`
    pub fn desc(field: &str) -> Self {
        Self(format!("-{}", field))
    }

    /// The key exactly as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The field path without the direction prefix
    pub fn field(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }

    pub fn direction(&self) -> OrderDirection {
        if self.0.starts_with('-') {
            OrderDirection::Desc
        } else {
            OrderDirection::Asc
        }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for OrderKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Ordering to apply when a graph is compiled
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Ordering {
    /// Leave the model's natural default ordering in place
    #[default]
    Default,
    /// Explicitly clear any default ordering
    Unordered,
    /// Order by these keys
    Keys(Vec<OrderKey>),
}

impl Ordering {
    /// Build an explicit ordering; an empty key list disables ordering
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<OrderKey>,
    {
        let keys: Vec<OrderKey> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            Ordering::Unordered
        } else {
            Ordering::Keys(keys)
        }
    }

    /// Returns true unless ordering is explicitly disabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Ordering::Unordered)
    }

    /// Explicit keys, if any
    pub fn explicit_keys(&self) -> Option<&[OrderKey]> {
        match self {
            Ordering::Keys(keys) => Some(keys),
            _ => None,
        }
    }
}

impl From<bool> for Ordering {
    fn from(enabled: bool) -> Self {
        if enabled {
            Ordering::Default
        } else {
            Ordering::Unordered
        }
    }
}

impl From<Option<bool>> for Ordering {
    fn from(enabled: Option<bool>) -> Self {
        enabled.unwrap_or(false).into()
    }
}

impl From<&str> for Ordering {
    fn from(key: &str) -> Self {
        Ordering::keys([key])
    }
}

impl From<String> for Ordering {
    fn from(key: String) -> Self {
        Ordering::keys([key])
    }
}

impl From<OrderKey> for Ordering {
    fn from(key: OrderKey) -> Self {
        Ordering::Keys(vec![key])
    }
}

impl<K: Into<OrderKey>> From<Vec<K>> for Ordering {
    fn from(keys: Vec<K>) -> Self {
        Ordering::keys(keys)
    }
}

impl<K: Into<OrderKey>, const N: usize> From<[K; N]> for Ordering {
    fn from(keys: [K; N]) -> Self {
        Ordering::keys(keys)
    }
}

impl<K: Into<OrderKey> + Clone> From<&[K]> for Ordering {
    fn from(keys: &[K]) -> Self {
        Ordering::keys(keys.iter().cloned())
    }
}
