//! Query adapter - the contract a backing query engine fulfills
//!
//! A query graph compiles into calls on a [`QueryAdapter`]. Each backend
//! (relational query sets, graph node sets, or the recording [`QuerySet`]
//! shipped with this crate) implements the trait once; graphs never inspect
//! backend types at runtime.
//!
//! [`QuerySet`]: crate::query_set::QuerySet

use crate::meta::SubjectType;
use crate::ordering::OrderKey;

/// An eager-load directive: fetch `lookup` with `query` as a separate batch
#[derive(Debug, Clone, PartialEq)]
pub struct Prefetch<Q> {
    pub lookup: String,
    pub query: Q,
}

impl<Q> Prefetch<Q> {
    pub fn new(lookup: impl Into<String>, query: Q) -> Self {
        Self {
            lookup: lookup.into(),
            query,
        }
    }
}

/// Capability interface for a backing query engine
pub trait QueryAdapter {
    /// Lazy query object produced by the backend
    type Query;

    /// Error raised by the backend while configuring a query
    type Error: std::error::Error;

    /// Unfiltered query over all rows of `subject`
    fn default_query(&self, subject: &SubjectType) -> Result<Self::Query, Self::Error>;

    /// Whether field restriction is safe for `subject` on this backend
    fn supports_field_restriction(&self, subject: &SubjectType) -> bool {
        subject.supports_field_restriction()
    }

    /// Join single-valued relations inline
    fn select_related(&self, query: Self::Query, paths: &[String]) -> Result<Self::Query, Self::Error>;

    /// Load only these fields
    fn only(&self, query: Self::Query, fields: &[String]) -> Result<Self::Query, Self::Error>;

    /// Order by explicit keys
    fn order_by(&self, query: Self::Query, keys: &[OrderKey]) -> Result<Self::Query, Self::Error>;

    /// Remove any default ordering
    fn clear_ordering(&self, query: Self::Query) -> Result<Self::Query, Self::Error>;

    /// Attach eager-load directives
    fn prefetch_related(
        &self,
        query: Self::Query,
        prefetches: Vec<Prefetch<Self::Query>>,
    ) -> Result<Self::Query, Self::Error>;
}
