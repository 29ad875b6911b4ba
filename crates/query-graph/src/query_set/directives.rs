//! Query Set directives and the consuming builder methods that record them

use std::fmt;

use super::builder::QuerySet;
use crate::adapter::Prefetch;
use crate::ordering::OrderKey;

/// One recorded call on a [`QuerySet`]
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    SelectRelated(Vec<String>),
    Only(Vec<String>),
    OrderBy(Vec<OrderKey>),
    ClearOrdering,
    PrefetchRelated(Vec<Prefetch<QuerySet>>),
}

impl Directive {
    pub fn name(&self) -> &'static str {
        match self {
            Directive::SelectRelated(_) => "select_related",
            Directive::Only(_) => "only",
            Directive::OrderBy(_) => "order_by",
            Directive::ClearOrdering => "clear_ordering",
            Directive::PrefetchRelated(_) => "prefetch_related",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::SelectRelated(paths) | Directive::Only(paths) => {
                write!(f, "{}({})", self.name(), paths.join(", "))
            }
            Directive::OrderBy(keys) => {
                let keys: Vec<&str> = keys.iter().map(OrderKey::as_str).collect();
                write!(f, "order_by({})", keys.join(", "))
            }
            Directive::ClearOrdering => write!(f, "order_by()"),
            Directive::PrefetchRelated(prefetches) => {
                let lookups: Vec<&str> = prefetches.iter().map(|p| p.lookup.as_str()).collect();
                write!(f, "prefetch_related({})", lookups.join(", "))
            }
        }
    }
}

impl QuerySet {
    /// Join single-valued relations inline
    pub fn select_related<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .push(Directive::SelectRelated(paths.into_iter().map(Into::into).collect()));
        self
    }

    /// Load only these fields
    pub fn only<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .push(Directive::Only(fields.into_iter().map(Into::into).collect()));
        self
    }

    /// Order by explicit keys
    pub fn order_by<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<OrderKey>,
    {
        self.directives
            .push(Directive::OrderBy(keys.into_iter().map(Into::into).collect()));
        self
    }

    /// Remove any ordering, including the model default
    pub fn clear_ordering(mut self) -> Self {
        self.directives.push(Directive::ClearOrdering);
        self
    }

    /// Attach eager loads
    pub fn prefetch_related(mut self, prefetches: Vec<Prefetch<QuerySet>>) -> Self {
        self.directives.push(Directive::PrefetchRelated(prefetches));
        self
    }
}

impl fmt::Display for QuerySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)?;
        for directive in &self.directives {
            write!(f, ".{}", directive)?;
        }
        Ok(())
    }
}
