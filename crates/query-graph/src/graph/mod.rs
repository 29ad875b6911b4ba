//! Query Graph - declarative load specification for a model
//!
//! A [`QueryGraph`] states, for one subject type, which fields to load, which
//! to-one relations to join inline, how to order the rows and which to-many
//! relations to eager-load in separate batches. Nested to-one graphs are
//! flattened into their parent when the graph is built, so a finished graph
//! already carries every dotted path reachable through its joins.

pub mod builder;
pub mod classify;
pub mod compile;
pub mod describe;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::meta::SubjectType;
use crate::ordering::Ordering;

pub use builder::QueryGraphBuilder;
pub use classify::{classify_relation, RelationKind};

/// Immutable, validated and flattened load specification
#[derive(Debug, Clone)]
pub struct QueryGraph {
    subject: SubjectType,
    field_names: Vec<String>,
    select_related: Vec<String>,
    prefetch: IndexMap<String, Arc<QueryGraph>>,
    ordering: Ordering,
}

impl QueryGraph {
    /// Start building a graph for `subject`
    pub fn builder(subject: SubjectType) -> QueryGraphBuilder {
        QueryGraphBuilder::new(subject)
    }

    /// Build a graph in one call
    ///
    /// Relations cover both to-one joins and to-many eager loads; the subject's
    /// metadata decides which is which.
    pub fn new<F, R, K, G>(
        subject: SubjectType,
        fields: F,
        order: impl Into<Ordering>,
        relations: R,
    ) -> crate::GraphResult<Self>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        R: IntoIterator<Item = (K, G)>,
        K: Into<String>,
        G: Into<Arc<QueryGraph>>,
    {
        relations
            .into_iter()
            .fold(
                QueryGraphBuilder::new(subject).fields(fields).order(order),
                |builder, (name, graph)| builder.relation(name, graph),
            )
            .build()
    }

    pub fn subject(&self) -> &SubjectType {
        &self.subject
    }

    /// Name of the subject type
    pub fn model_name(&self) -> &str {
        self.subject.type_name()
    }

    /// Fields to load, including dotted paths into joined relations
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// To-one relation paths joined inline
    pub fn select_related(&self) -> &[String] {
        &self.select_related
    }

    /// To-many relation paths and the graphs they are loaded with, in declaration order
    pub fn prefetch(&self) -> &IndexMap<String, Arc<QueryGraph>> {
        &self.prefetch
    }

    /// Graph used to eager-load `path`
    pub fn prefetch_graph(&self, path: &str) -> Option<&Arc<QueryGraph>> {
        self.prefetch.get(path)
    }

    pub fn ordering(&self) -> &Ordering {
        &self.ordering
    }
}

/// Structural equality: same subject name, same flattened lists and the same
/// eager loads in the same order.
impl PartialEq for QueryGraph {
    fn eq(&self, other: &Self) -> bool {
        self.model_name() == other.model_name()
            && self.field_names == other.field_names
            && self.select_related == other.select_related
            && self.ordering == other.ordering
            && self.prefetch.len() == other.prefetch.len()
            && self
                .prefetch
                .iter()
                .zip(other.prefetch.iter())
                .all(|((a_path, a), (b_path, b))| a_path == b_path && a == b)
    }
}
