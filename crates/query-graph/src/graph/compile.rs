//! Compilation of a query graph into adapter calls

use super::QueryGraph;
use crate::adapter::{Prefetch, QueryAdapter};
use crate::ordering::Ordering;

impl QueryGraph {
    /// Configure a query for this graph
    ///
    /// Starts from `seed` when given, otherwise from the adapter's default
    /// query for the subject. Every eager load is compiled from a fresh query
    /// for its own subject. Adapter errors are returned unchanged.
    pub fn compile<A: QueryAdapter>(
        &self,
        adapter: &A,
        seed: Option<A::Query>,
    ) -> Result<A::Query, A::Error> {
        let mut query = match seed {
            Some(query) => query,
            None => adapter.default_query(&self.subject)?,
        };

        if !self.select_related.is_empty() {
            query = adapter.select_related(query, &self.select_related)?;
        }

        if adapter.supports_field_restriction(&self.subject) {
            query = adapter.only(query, &self.field_names)?;
        } else {
            tracing::debug!("Skipping field restriction for {}", self.model_name());
        }

        match &self.ordering {
            Ordering::Keys(keys) => query = adapter.order_by(query, keys)?,
            Ordering::Unordered => query = adapter.clear_ordering(query)?,
            Ordering::Default => {}
        }

        if !self.prefetch.is_empty() {
            let prefetches = self
                .prefetch
                .iter()
                .map(|(lookup, graph)| Ok(Prefetch::new(lookup.clone(), graph.compile(adapter, None)?)))
                .collect::<Result<Vec<_>, A::Error>>()?;
            query = adapter.prefetch_related(query, prefetches)?;
        }

        tracing::debug!("Compiled query graph for {}", self.model_name());
        Ok(query)
    }

    /// Configure a fresh query for this graph
    pub fn compile_default<A: QueryAdapter>(&self, adapter: &A) -> Result<A::Query, A::Error> {
        self.compile(adapter, None)
    }
}
